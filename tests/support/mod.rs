#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use sheet2cube::generator::schema_builder::BuildOptions;
use sheet2cube::parser::table::RawSheet;
use sheet2cube::ConversionResult;

pub(crate) type SheetRows<'a> = (&'a str, &'a [&'a [&'a str]]);

pub(crate) fn sheet(name: &str, rows: &[&[&str]]) -> RawSheet {
    RawSheet::from_text_rows(name, rows)
}

pub(crate) fn convert_sheets(sheets: &[RawSheet], options: &BuildOptions) -> ConversionResult {
    sheet2cube::convert_sheets(Path::new("memory.xlsx"), sheets, options)
        .expect("sheets should convert")
}

/// Write an `.xlsx` workbook with one worksheet per entry; blank cells are left unwritten.
pub(crate) fn write_xlsx(dir: &Path, file_name: &str, sheets: &[SheetRows<'_>]) -> PathBuf {
    let path = dir.join(file_name);
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name should be valid");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, *cell)
                    .expect("cell should be writable");
            }
        }
    }
    workbook.save(&path).expect("workbook should save");
    path
}

pub(crate) fn write_csv(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, content).expect("should write csv fixture");
    path
}

/// A workbook exercising all four sections, shared by the end-to-end and CLI tests.
pub(crate) fn write_semantic_template(dir: &Path) -> PathBuf {
    write_xlsx(
        dir,
        "template.xlsx",
        &[
            (
                "Cubes",
                &[
                    &["Table", "SQL Table", "Name", "Description", "Owner"],
                    &["orders", "public.orders", "orders", "Order facts", "sales"],
                    &["users", "public.users", "users", "", ""],
                ],
            ),
            (
                "Joins",
                &[
                    &[
                        "Primary Table",
                        "Secondary Table",
                        "Relationship",
                        "Primary Table Key Column",
                        "Secondary Table Key Column",
                    ],
                    &["orders", "users", "many_to_one", "user_id", "id"],
                ],
            ),
            (
                "Dimensions",
                &[
                    &["name", "sql", "type", "primary key"],
                    &["id", "id", "number", "yes"],
                    &["status", "status", "string", "no"],
                ],
            ),
            (
                "Measures",
                &[
                    &["name", "sql", "aggregation"],
                    &["count", "id", "count"],
                ],
            ),
            ("Notes", &[&["Free text only"], &["nothing to see"]]),
        ],
    )
}
