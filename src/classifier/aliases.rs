use crate::classifier::sections::SectionType;
use crate::parser::names::normalize_header;

const CUBE_ALIASES: &[(&str, &str)] = &[
    ("table_name", "table"),
    ("cube_table", "table"),
    ("sqltable", "sql_table"),
    ("cube_name", "name"),
    ("cube", "name"),
    ("desc", "description"),
    ("datasource", "data_source"),
];

const JOIN_ALIASES: &[(&str, &str)] = &[
    ("relation", "relationship"),
    ("relationship_type", "relationship"),
    ("primary_table_key", "primary_table_key_column"),
    ("primary_key_column", "primary_table_key_column"),
    ("secondary_table_key", "secondary_table_key_column"),
    ("secondary_key_column", "secondary_table_key_column"),
    ("join_sql", "sql"),
    ("join_name", "name"),
];

const DIMENSION_ALIASES: &[(&str, &str)] = &[
    ("primary_key", "primarykey"),
    ("is_primary_key", "primarykey"),
    ("pk", "primarykey"),
    ("datatype", "type"),
    ("data_type", "type"),
    ("desc", "description"),
];

const MEASURE_ALIASES: &[(&str, &str)] = &[
    ("aggregation", "type"),
    ("aggregate", "type"),
    ("agg", "type"),
    ("desc", "description"),
];

/// Outcome of resolving one header against a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The header is a canonical field or one of its synonyms.
    Canonical(&'static str),
    /// The header has no mapping and is carried through as-is.
    Unknown(String),
}

impl Resolved {
    /// The field name this header contributes to a record.
    pub fn field_name(&self) -> &str {
        match self {
            Resolved::Canonical(name) => name,
            Resolved::Unknown(name) => name,
        }
    }

    /// The canonical field, if any.
    pub fn canonical(&self) -> Option<&'static str> {
        match self {
            Resolved::Canonical(name) => Some(*name),
            Resolved::Unknown(_) => None,
        }
    }
}

/// Synonym table for a section, as `(synonym, canonical)` pairs.
pub fn alias_table(section: SectionType) -> &'static [(&'static str, &'static str)] {
    match section {
        SectionType::Cube => CUBE_ALIASES,
        SectionType::Join => JOIN_ALIASES,
        SectionType::Dimension => DIMENSION_ALIASES,
        SectionType::Measure => MEASURE_ALIASES,
    }
}

/// Resolve a header to a canonical field of `section`.
///
/// Matching is case-insensitive and treats spaces like underscores, so
/// `"Primary Key"`, `"primary_key"` and `"PK"` all resolve for dimensions.
pub fn resolve(header: &str, section: SectionType) -> Resolved {
    let key = normalize_header(header);

    let canonical = section
        .required_fields()
        .iter()
        .chain(section.optional_fields())
        .find(|field| **field == key)
        .copied()
        .or_else(|| {
            alias_table(section)
                .iter()
                .find(|(synonym, _)| *synonym == key)
                .map(|(_, canonical)| *canonical)
        });

    match canonical {
        Some(field) => Resolved::Canonical(field),
        None => Resolved::Unknown(key),
    }
}

/// Field name a header contributes to a record of `section`.
pub fn canonical_name(header: &str, section: SectionType) -> String {
    resolve(header, section).field_name().to_string()
}
