use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::NaiveTime;
use tracing::debug;

use crate::error::{ConvertError, Result};
use crate::parser::cells::CellValue;
use crate::parser::table::RawSheet;

/// Input container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Multi-sheet workbook (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`).
    Workbook,
    /// Single-sheet comma-separated file.
    Csv,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(ConvertError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Read every sheet of the input file in workbook order.
///
/// A CSV file is read as one sheet named after its file stem.
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => read_spreadsheet(path),
        InputFormat::Csv => read_csv(path).map(|sheet| vec![sheet]),
    }
}

fn read_spreadsheet(path: &Path) -> Result<Vec<RawSheet>> {
    let workbook_error = |source: calamine::Error| ConvertError::Workbook {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(workbook_error)?;
        // The range starts at the first used cell; pad back to A1 so row
        // numbers match the sheet.
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset as usize];
        rows.extend(range.rows().map(|row| {
            std::iter::repeat(CellValue::Empty)
                .take(col_offset as usize)
                .chain(row.iter().map(cell_from_data))
                .collect::<Vec<_>>()
        }));
        debug!(sheet = %name, rows = rows.len(), "read worksheet");
        sheets.push(RawSheet { name, rows });
    }
    Ok(sheets)
}

fn read_csv(path: &Path) -> Result<RawSheet> {
    let csv_error = |source: csv::Error| ConvertError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        rows.push(
            record
                .iter()
                .map(|field| CellValue::Text(decode_field(field)))
                .collect(),
        );
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet")
        .to_string();
    debug!(sheet = %name, rows = rows.len(), "read csv");
    Ok(RawSheet { name, rows })
}

/// Decode a CSV field as UTF-8, falling back to Latin-1 for legacy exports.
fn decode_field(field: &[u8]) -> String {
    match std::str::from_utf8(field) {
        Ok(text) => text.to_string(),
        Err(_) => field.iter().map(|&byte| char::from(byte)).collect(),
    }
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(int) => CellValue::Int(*int),
        Data::Float(float) => CellValue::Float(*float),
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(datetime) => CellValue::Text(format_excel_datetime(datetime)),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// ISO 8601 text for a date-formatted cell: `2024-01-15` for whole days,
/// `2024-01-15T10:30:00` otherwise, `PT5400S` for durations.
fn format_excel_datetime(datetime: &ExcelDateTime) -> String {
    if datetime.is_duration() {
        if let Some(duration) = datetime.as_duration() {
            return duration.to_string();
        }
    }
    match datetime.as_datetime() {
        Some(value) if value.time() == NaiveTime::MIN => value.format("%Y-%m-%d").to_string(),
        Some(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => datetime.as_f64().to_string(),
    }
}
