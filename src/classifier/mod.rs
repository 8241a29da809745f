/// Per-section synonym tables and header-to-field resolution.
pub mod aliases;
/// Header-presence scoring and sheet-to-section assignment.
pub mod section_classifier;
/// The closed set of section types and their field sets.
pub mod sections;
