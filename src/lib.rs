//! Convert semantic-model spreadsheets (cubes, joins, dimensions, measures) into YAML configuration.
#![warn(missing_docs)]

use std::path::Path;

use tracing::debug;

/// Sheet classification: section types, header aliases, and scoring.
pub mod classifier;
/// Error type shared by every stage of the conversion.
pub mod error;
/// Record assembly from classified tables.
pub mod generator;
/// Serialization of the model and the classification report.
pub mod output;
/// Workbook reading, cell cleaning, and table normalization.
pub mod parser;

pub use error::{ConvertError, Result};

use classifier::section_classifier::{self, Classification};
use generator::records::SemanticModel;
use generator::schema_builder::{self, BuildOptions, BuildOutput, BuildStats};
use parser::table::{self, RawSheet};
use parser::workbook;

/// Everything produced by one conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Every non-blank sheet with its scores, in sheet order.
    pub classifications: Vec<Classification>,
    /// The assembled model.
    pub model: SemanticModel,
    /// Rows and records dropped while building.
    pub stats: BuildStats,
}

/// Read `input` and build the semantic model from its sheets.
pub fn convert(input: &Path, options: &BuildOptions) -> Result<ConversionResult> {
    let sheets = workbook::read_workbook(input)?;
    convert_sheets(input, &sheets, options)
}

/// Build the semantic model from sheets already in memory.
///
/// `source` only names the input in errors. Fails when no sheet can be
/// assigned a section.
pub fn convert_sheets(
    source: &Path,
    sheets: &[RawSheet],
    options: &BuildOptions,
) -> Result<ConversionResult> {
    let tables = sheets
        .iter()
        .filter_map(|sheet| {
            let table = table::normalize_sheet(sheet);
            if table.is_none() {
                debug!(sheet = %sheet.name, "skipping empty sheet");
            }
            table
        })
        .collect();

    let classifications = section_classifier::classify_tables(tables);
    if classifications.iter().all(|c| c.section.is_none()) {
        return Err(ConvertError::NoClassifiableSheets(source.to_path_buf()));
    }

    let BuildOutput { model, stats } = schema_builder::build_model(&classifications, options);
    Ok(ConversionResult {
        classifications,
        model,
        stats,
    })
}
