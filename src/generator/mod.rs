/// Output records and the four-section semantic model.
pub mod records;
/// Turns classified tables into records: validation, join synthesis, filtering.
pub mod schema_builder;
