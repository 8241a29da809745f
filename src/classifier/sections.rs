use std::fmt;

/// The four record archetypes a sheet can hold.
///
/// Variant order is the tie-break priority: when two sections score the same,
/// the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionType {
    /// Fact table definitions.
    Cube,
    /// Relationships between tables.
    Join,
    /// Attribute field definitions.
    Dimension,
    /// Aggregatable field definitions.
    Measure,
}

impl SectionType {
    /// All sections in priority order.
    pub const ALL: [SectionType; 4] = [
        SectionType::Cube,
        SectionType::Join,
        SectionType::Dimension,
        SectionType::Measure,
    ];

    /// Canonical fields a row must carry to produce a record.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            SectionType::Cube => &["table", "sql_table", "name"],
            SectionType::Join => &["primary_table", "secondary_table"],
            SectionType::Dimension | SectionType::Measure => &["name", "sql", "type"],
        }
    }

    /// Canonical fields that are recognized but may be absent.
    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            SectionType::Cube => &["title", "description", "data_source"],
            SectionType::Join => &[
                "name",
                "relationship",
                "primary_table_key_column",
                "secondary_table_key_column",
                "sql",
            ],
            SectionType::Dimension => &["title", "description", "primarykey"],
            SectionType::Measure => &["title", "description"],
        }
    }

    /// Whether `field` is one of this section's canonical fields.
    pub fn is_canonical(self, field: &str) -> bool {
        self.required_fields().contains(&field) || self.optional_fields().contains(&field)
    }

    /// Whether `field` holds a boolean.
    pub fn is_boolean_field(self, field: &str) -> bool {
        matches!((self, field), (SectionType::Dimension, "primarykey"))
    }

    /// Substrings of a sheet name that hint at this section.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionType::Cube => &["cube"],
            SectionType::Join => &["join", "relationship"],
            SectionType::Dimension => &["dimension", "dim"],
            SectionType::Measure => &["measure", "metric"],
        }
    }

    /// Output key of the top-level sequence for this section.
    pub fn plural(self) -> &'static str {
        match self {
            SectionType::Cube => "cubes",
            SectionType::Join => "joins",
            SectionType::Dimension => "dimensions",
            SectionType::Measure => "measures",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::Cube => write!(f, "cube"),
            SectionType::Join => write!(f, "join"),
            SectionType::Dimension => write!(f, "dimension"),
            SectionType::Measure => write!(f, "measure"),
        }
    }
}
