use std::path::PathBuf;

/// Errors that abort a conversion.
///
/// Row-level problems (missing required fields) never surface here: those rows
/// are dropped by the schema builder and counted in its build statistics.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input extension is not a supported spreadsheet or CSV format.
    #[error("unsupported input format '{extension}' for {}", path.display())]
    UnsupportedFormat {
        /// Offending input path.
        path: PathBuf,
        /// Extension as found on the path (may be empty).
        extension: String,
    },

    /// The spreadsheet backend could not open or read a workbook.
    #[error("failed to read workbook {}: {source}", path.display())]
    Workbook {
        /// Workbook path.
        path: PathBuf,
        /// Backend error.
        #[source]
        source: calamine::Error,
    },

    /// The CSV reader rejected the input.
    #[error("failed to read CSV {}: {source}", path.display())]
    Csv {
        /// CSV path.
        path: PathBuf,
        /// Reader error.
        #[source]
        source: csv::Error,
    },

    /// No sheet scored high enough to be assigned a section type.
    #[error(
        "no recognizable sections found in {}; ensure sheet headers match the expected columns",
        .0.display()
    )]
    NoClassifiableSheets(PathBuf),

    /// The model could not be rendered as text.
    #[error("failed to serialize output: {0}")]
    Serialize(String),

    /// The output (or report) path could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Process exit code for this error: 1 when there was nothing to emit, 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::NoClassifiableSheets(_) => 1,
            _ => 2,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConvertError>;
