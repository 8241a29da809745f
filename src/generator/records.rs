//! Output records and the assembled semantic model.
//!
//! A [`Record`] is an ordered field map tagged with its section. Records are
//! built once by [`crate::generator::schema_builder`] and never mutated
//! afterwards; the serializer only reads them.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::classifier::sections::SectionType;
pub use crate::parser::cells::FieldValue;

/// One output entry of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    section: SectionType,
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Wrap an ordered field map.
    pub fn new(section: SectionType, fields: IndexMap<String, FieldValue>) -> Self {
        Self { section, fields }
    }

    /// Section this record belongs to.
    pub fn section(&self) -> SectionType {
        self.section
    }

    /// Fields in output order.
    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    /// Value of one field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Value of one field rendered as text (numbers and booleans included).
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Field names in output order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// The four top-level sequences, serialized in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SemanticModel {
    /// Cube records.
    pub cubes: Vec<Record>,
    /// Join records.
    pub joins: Vec<Record>,
    /// Dimension records.
    pub dimensions: Vec<Record>,
    /// Measure records.
    pub measures: Vec<Record>,
}

impl SemanticModel {
    /// Records of one section.
    pub fn records(&self, section: SectionType) -> &[Record] {
        match section {
            SectionType::Cube => &self.cubes,
            SectionType::Join => &self.joins,
            SectionType::Dimension => &self.dimensions,
            SectionType::Measure => &self.measures,
        }
    }

    pub(crate) fn records_mut(&mut self, section: SectionType) -> &mut Vec<Record> {
        match section {
            SectionType::Cube => &mut self.cubes,
            SectionType::Join => &mut self.joins,
            SectionType::Dimension => &mut self.dimensions,
            SectionType::Measure => &mut self.measures,
        }
    }

    /// Total number of records across all sections.
    pub fn len(&self) -> usize {
        SectionType::ALL
            .iter()
            .map(|&section| self.records(section).len())
            .sum()
    }

    /// Whether every section is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
