//! Single-cell cleaning.
//!
//! Every raw cell has a defined cleaned form: text is trimmed, de-quoted and
//! flattened to one line, blanks become `None`, and boolean-typed targets
//! accept the usual spreadsheet spellings of true and false.

use std::fmt;

use serde::Serialize;

/// A raw cell as read from a workbook or CSV file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or empty cell.
    #[default]
    Empty,
    /// Text as typed by the author.
    Text(String),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Native boolean cell.
    Bool(bool),
}

impl CellValue {
    /// True when the cell cleans to nothing.
    pub fn is_blank(&self) -> bool {
        clean_cell(self).is_none()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// A cleaned, non-null cell value as it appears in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Single-line, trimmed, de-quoted text.
    Text(String),
    /// Integer number.
    Int(i64),
    /// Non-integral finite number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl FieldValue {
    /// True only for `Bool(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Int(int) => write!(f, "{int}"),
            FieldValue::Float(float) => write!(f, "{float}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Strip surrounding whitespace and any number of matching outer quote pairs.
///
/// `' "users" '` -> `users`, `"'a'"` -> `a`, `"a'` is left alone.
pub fn strip_quotes(text: &str) -> &str {
    let mut current = text.trim();
    loop {
        let bytes = current.as_bytes();
        let len = bytes.len();
        if len >= 2 && matches!(bytes[0], b'"' | b'\'') && bytes[0] == bytes[len - 1] {
            current = current[1..len - 1].trim();
        } else {
            return current;
        }
    }
}

/// Join the non-blank lines of `text` with single spaces.
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean free text: one line, trimmed, de-quoted, `None` when blank.
pub fn clean_text(text: &str) -> Option<String> {
    let collapsed = collapse_lines(text);
    let stripped = strip_quotes(&collapsed);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Recognize a boolean-like token, case-insensitively.
///
/// Truthy: `true`, `1`, `yes`, `y`, `t`. Falsy: `false`, `0`, `no`, `n`, `f`.
pub fn parse_bool_token(text: &str) -> Option<bool> {
    match strip_quotes(text).to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

/// Clean a cell for a field without a declared type.
pub fn clean_cell(cell: &CellValue) -> Option<FieldValue> {
    match cell {
        CellValue::Empty => None,
        CellValue::Text(text) => clean_text(text).map(FieldValue::Text),
        CellValue::Int(int) => Some(FieldValue::Int(*int)),
        CellValue::Float(float) => clean_float(*float),
        CellValue::Bool(b) => Some(FieldValue::Bool(*b)),
    }
}

/// Clean a cell for a boolean-typed field.
///
/// Recognized tokens and the numbers 0 and 1 become booleans; any other value
/// is cleaned as in [`clean_cell`] and left for the caller to judge.
pub fn clean_bool_cell(cell: &CellValue) -> Option<FieldValue> {
    match clean_cell(cell)? {
        FieldValue::Int(0) => Some(FieldValue::Bool(false)),
        FieldValue::Int(1) => Some(FieldValue::Bool(true)),
        FieldValue::Text(text) => Some(
            parse_bool_token(&text).map_or(FieldValue::Text(text), FieldValue::Bool),
        ),
        other => Some(other),
    }
}

// Spreadsheet engines store every number as a float.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn clean_float(float: f64) -> Option<FieldValue> {
    if !float.is_finite() {
        return None;
    }
    if float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        return Some(FieldValue::Int(float as i64));
    }
    Some(FieldValue::Float(float))
}
