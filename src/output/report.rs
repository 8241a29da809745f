use std::fmt::Write;

use crate::classifier::section_classifier::Classification;
use crate::classifier::sections::SectionType;
use crate::generator::records::SemanticModel;
use crate::generator::schema_builder::BuildStats;

/// Build a markdown report with per-sheet scores, record counts and dropped rows.
pub fn build_report(
    classifications: &[Classification],
    model: &SemanticModel,
    stats: &BuildStats,
) -> String {
    let mut report = String::new();

    writeln!(report, "# sheet2cube Classification Report").unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Sheets").unwrap();
    writeln!(report).unwrap();
    writeln!(
        report,
        "| Sheet | Rows | Cube | Join | Dimension | Measure | Section |"
    )
    .unwrap();
    writeln!(
        report,
        "|-------|------|------|------|-----------|---------|---------|"
    )
    .unwrap();

    for classification in classifications {
        let section = classification
            .section
            .map_or_else(|| "unclassified".to_string(), |s| s.to_string());
        writeln!(
            report,
            "| {} | {} | {} | {} | {} | {} | {} |",
            escape_table_cell(&classification.table.name),
            classification.table.rows.len(),
            classification.score_for(SectionType::Cube),
            classification.score_for(SectionType::Join),
            classification.score_for(SectionType::Dimension),
            classification.score_for(SectionType::Measure),
            section
        )
        .unwrap();
    }

    writeln!(report).unwrap();
    writeln!(report, "## Records").unwrap();
    writeln!(report).unwrap();
    for section in SectionType::ALL {
        writeln!(
            report,
            "- {}: {}",
            section.plural(),
            model.records(section).len()
        )
        .unwrap();
    }
    if stats.filtered_cubes > 0 {
        writeln!(report, "- cubes removed by name filter: {}", stats.filtered_cubes).unwrap();
    }
    if stats.filtered_joins > 0 {
        writeln!(report, "- joins removed by scoping: {}", stats.filtered_joins).unwrap();
    }

    if !stats.dropped_rows.is_empty() {
        writeln!(report).unwrap();
        writeln!(report, "## Dropped Rows").unwrap();
        writeln!(report).unwrap();

        for dropped in &stats.dropped_rows {
            writeln!(
                report,
                "- **{}** row {} ({}): missing {}",
                dropped.sheet,
                dropped.source_row,
                dropped.section,
                dropped.missing.join(", ")
            )
            .unwrap();
        }
    }

    report
}

/// Escape pipes so a sheet name cannot split a Markdown table cell.
fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
