/// Single-cell cleaning: trimming, de-quoting, blank detection and boolean coercion.
pub mod cells;
/// Header and sheet-name normalization helpers.
pub mod names;
/// Raw sheets and their normalization into tables with unique headers.
pub mod table;
/// Reading workbooks (via `calamine`) and CSV files into raw sheets.
pub mod workbook;
