use crate::parser::cells::{clean_cell, CellValue};
use crate::parser::names::{dedupe_headers, normalize_header, placeholder_header};

/// A raw sheet: its name and the cell grid in row-major order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSheet {
    /// Display name of the sheet (file stem for CSV input).
    pub name: String,
    /// Rows of cells; rows may have different lengths.
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Build a sheet from rows of text, mostly useful in tests.
    pub fn from_text_rows(name: &str, rows: &[&[&str]]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect())
                .collect(),
        }
    }
}

/// One data row of a normalized table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 1-based position of the row in the source grid (the header is row 1
    /// unless leading rows were blank).
    pub source_row: usize,
    /// One cell per table header.
    pub cells: Vec<CellValue>,
}

/// A sheet with blank rows and columns removed and unique normalized headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Display name of the source sheet.
    pub name: String,
    /// Normalized, de-duplicated headers.
    pub headers: Vec<String>,
    /// Data rows, all of width `headers.len()`.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize a raw sheet into a [`Table`].
///
/// The first non-blank row is the header row. Returns `None` when the sheet
/// has no non-blank cell at all; a sheet with headers but no data rows yields
/// an empty table.
pub fn normalize_sheet(sheet: &RawSheet) -> Option<Table> {
    let kept_rows: Vec<usize> = sheet
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| !cell.is_blank()))
        .map(|(idx, _)| idx)
        .collect();

    let (&header_idx, data_idx) = kept_rows.split_first()?;
    let width = kept_rows
        .iter()
        .map(|&idx| sheet.rows[idx].len())
        .max()
        .unwrap_or(0);

    let cell_at = |row: usize, col: usize| sheet.rows[row].get(col);
    let kept_columns: Vec<usize> = (0..width)
        .filter(|&col| {
            kept_rows
                .iter()
                .any(|&row| cell_at(row, col).is_some_and(|cell| !cell.is_blank()))
        })
        .collect();

    let raw_headers = kept_columns.iter().map(|&col| {
        let header = cell_at(header_idx, col)
            .and_then(clean_cell)
            .map(|value| normalize_header(&value.to_string()))
            .unwrap_or_default();
        if header.is_empty() {
            placeholder_header(col)
        } else {
            header
        }
    });
    let headers = dedupe_headers(raw_headers);

    let rows = data_idx
        .iter()
        .map(|&row| TableRow {
            source_row: row + 1,
            cells: kept_columns
                .iter()
                .map(|&col| cell_at(row, col).cloned().unwrap_or_default())
                .collect(),
        })
        .collect();

    Some(Table {
        name: sheet.name.clone(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sheet_skips_all_blank_sheets() {
        let sheet = RawSheet::from_text_rows("Blank", &[&["", "  "], &[], &["\"\""]]);
        assert!(normalize_sheet(&sheet).is_none());
    }

    #[test]
    fn normalize_sheet_uses_first_non_blank_row_as_header() {
        let sheet = RawSheet::from_text_rows(
            "Cubes",
            &[
                &["", ""],
                &["Name", "SQL Table"],
                &["orders", "public.orders"],
            ],
        );
        let table = normalize_sheet(&sheet).expect("table");
        assert_eq!(table.headers, vec!["name", "sql_table"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].source_row, 3);
    }

    #[test]
    fn normalize_sheet_pads_ragged_rows() {
        let sheet = RawSheet::from_text_rows("Cubes", &[&["name", "title"], &["orders"]]);
        let table = normalize_sheet(&sheet).expect("table");
        assert_eq!(
            table.rows[0].cells,
            vec![CellValue::from("orders"), CellValue::Empty]
        );
    }
}
