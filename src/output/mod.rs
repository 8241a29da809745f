/// Renders the semantic model as YAML or JSON and writes it to disk.
pub mod formatter;
/// Builds a Markdown classification report from scored sheets.
pub mod report;
