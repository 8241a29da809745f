use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::classifier::aliases::{self, Resolved};
use crate::classifier::section_classifier::Classification;
use crate::classifier::sections::SectionType;
use crate::generator::records::{FieldValue, Record, SemanticModel};
use crate::parser::cells::{clean_bool_cell, clean_cell};
use crate::parser::table::{Table, TableRow};

const CUBE_OUTPUT_FIELDS: &[&str] = &[
    "name",
    "title",
    "description",
    "table",
    "sql_table",
    "data_source",
];
const DIMENSION_OUTPUT_FIELDS: &[&str] = &["name", "title", "description", "sql", "type"];
const MEASURE_OUTPUT_FIELDS: &[&str] = &["name", "title", "description", "sql", "type"];
const JOIN_OUTPUT_FIELDS: &[&str] = &["name", "relationship", "sql"];

/// Output key of the dimension primary-key flag.
pub const PRIMARY_KEY_OUTPUT: &str = "primaryKey";

/// Which joins survive a cube-name filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinScope {
    /// Keep every join regardless of the selected cube.
    #[default]
    All,
    /// Keep joins whose primary table is the selected cube's name or table.
    SelectedCube,
}

/// Knobs for [`build_model`].
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Keep only the cube with this name.
    pub only_cube: Option<String>,
    /// Carry headers without a canonical mapping through to the records.
    pub include_unknown: bool,
    /// Join policy when `only_cube` is set.
    pub join_scope: JoinScope,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            only_cube: None,
            include_unknown: true,
            join_scope: JoinScope::All,
        }
    }
}

/// A row dropped because required fields were missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// Sheet the row came from.
    pub sheet: String,
    /// 1-based row position in the sheet.
    pub source_row: usize,
    /// Section the sheet was classified as.
    pub section: SectionType,
    /// Required fields that were absent or blank.
    pub missing: Vec<&'static str>,
}

/// Bookkeeping collected while building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Rows dropped for missing required fields.
    pub dropped_rows: Vec<DroppedRow>,
    /// Cubes removed by the cube-name filter.
    pub filtered_cubes: usize,
    /// Joins removed by join scoping.
    pub filtered_joins: usize,
}

/// Result of [`build_model`].
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// The assembled model.
    pub model: SemanticModel,
    /// What was dropped along the way.
    pub stats: BuildStats,
}

/// A table row after alias resolution and cell cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
struct ResolvedRow {
    canonical: IndexMap<&'static str, FieldValue>,
    unknown: IndexMap<String, FieldValue>,
}

impl ResolvedRow {
    fn text(&self, field: &str) -> Option<String> {
        self.canonical.get(field).map(ToString::to_string)
    }

    fn missing_required(&self, section: SectionType) -> Vec<&'static str> {
        section
            .required_fields()
            .iter()
            .filter(|field| !self.canonical.contains_key(*field))
            .copied()
            .collect()
    }
}

/// Assemble the semantic model from classified tables.
///
/// Tables of the same section are concatenated in sheet order; unclassified
/// tables are ignored.
pub fn build_model(classifications: &[Classification], options: &BuildOptions) -> BuildOutput {
    let mut stats = BuildStats::default();
    let mut model = SemanticModel::default();
    let mut join_candidates: Vec<(Option<String>, Record)> = Vec::new();

    for classification in classifications {
        let Some(section) = classification.section else {
            continue;
        };
        let table = &classification.table;
        let resolutions: Vec<Resolved> = table
            .headers
            .iter()
            .map(|header| aliases::resolve(header, section))
            .collect();

        for row in &table.rows {
            let resolved = resolve_row(&resolutions, row, section);
            let missing = resolved.missing_required(section);
            if !missing.is_empty() {
                debug!(
                    sheet = %table.name,
                    row = row.source_row,
                    %section,
                    missing = ?missing,
                    "dropping row without required fields"
                );
                stats.dropped_rows.push(DroppedRow {
                    sheet: table.name.clone(),
                    source_row: row.source_row,
                    section,
                    missing,
                });
                continue;
            }

            match section {
                SectionType::Join => {
                    let primary_table = resolved.text("primary_table");
                    join_candidates.push((primary_table, build_join(&resolved, options)));
                }
                _ => {
                    let record = build_record(section, &resolved, table, row, options);
                    model.records_mut(section).push(record);
                }
            }
        }
    }

    if let Some(only_cube) = &options.only_cube {
        let before = model.cubes.len();
        model
            .cubes
            .retain(|cube| cube.text("name").as_deref() == Some(only_cube.as_str()));
        stats.filtered_cubes = before - model.cubes.len();
        if model.cubes.is_empty() {
            warn!(cube = %only_cube, "no cube matches the requested name");
        }
    }

    let allowed_primaries = selected_join_primaries(&model.cubes, options);
    for (primary_table, join) in join_candidates {
        if let Some(allowed) = &allowed_primaries {
            let keep = primary_table
                .as_deref()
                .is_some_and(|primary| allowed.contains(primary));
            if !keep {
                stats.filtered_joins += 1;
                continue;
            }
        }
        model.joins.push(join);
    }

    BuildOutput { model, stats }
}

/// Primary-table names a join must reference under [`JoinScope::SelectedCube`],
/// or `None` when joins are not scoped.
fn selected_join_primaries(cubes: &[Record], options: &BuildOptions) -> Option<HashSet<String>> {
    let only_cube = options.only_cube.as_ref()?;
    if options.join_scope != JoinScope::SelectedCube {
        return None;
    }
    let mut allowed: HashSet<String> = HashSet::from([only_cube.clone()]);
    allowed.extend(cubes.iter().filter_map(|cube| cube.text("table")));
    Some(allowed)
}

fn resolve_row(resolutions: &[Resolved], row: &TableRow, section: SectionType) -> ResolvedRow {
    let mut resolved = ResolvedRow::default();
    for (resolution, cell) in resolutions.iter().zip(&row.cells) {
        match resolution {
            Resolved::Canonical(field) => {
                let value = if section.is_boolean_field(field) {
                    clean_bool_cell(cell)
                } else {
                    clean_cell(cell)
                };
                if let Some(value) = value {
                    resolved.canonical.entry(*field).or_insert(value);
                }
            }
            Resolved::Unknown(header) => {
                if let Some(value) = clean_cell(cell) {
                    resolved.unknown.entry(header.clone()).or_insert(value);
                }
            }
        }
    }
    resolved
}

fn build_record(
    section: SectionType,
    resolved: &ResolvedRow,
    table: &Table,
    row: &TableRow,
    options: &BuildOptions,
) -> Record {
    let mut fields = copy_fields(resolved, output_fields(section));

    if section == SectionType::Dimension {
        match resolved.canonical.get("primarykey") {
            Some(FieldValue::Bool(true)) => {
                fields.insert(PRIMARY_KEY_OUTPUT.to_string(), FieldValue::Bool(true));
            }
            Some(FieldValue::Bool(false)) | None => {}
            Some(other) => warn!(
                sheet = %table.name,
                row = row.source_row,
                value = %other,
                "primary key flag is not a boolean; omitting it"
            ),
        }
    }

    if options.include_unknown {
        append_unknown(&mut fields, resolved);
    }
    Record::new(section, fields)
}

/// Build a join: `name` falls back to the secondary table and `sql` to
/// `{primary_key}={secondary_key}`.
fn build_join(resolved: &ResolvedRow, options: &BuildOptions) -> Record {
    let mut fields = IndexMap::new();

    if let Some(name) = resolved
        .canonical
        .get("name")
        .or_else(|| resolved.canonical.get("secondary_table"))
    {
        fields.insert("name".to_string(), name.clone());
    }
    if let Some(relationship) = resolved.canonical.get("relationship") {
        fields.insert("relationship".to_string(), relationship.clone());
    }

    let sql = resolved.canonical.get("sql").cloned().or_else(|| {
        let primary_key = resolved.text("primary_table_key_column")?;
        let secondary_key = resolved.text("secondary_table_key_column")?;
        Some(FieldValue::Text(format!("{primary_key}={secondary_key}")))
    });
    if let Some(sql) = sql {
        fields.insert("sql".to_string(), sql);
    }

    if options.include_unknown {
        append_unknown(&mut fields, resolved);
    }
    Record::new(SectionType::Join, fields)
}

/// Canonical fields copied to a record, in output order.
fn output_fields(section: SectionType) -> &'static [&'static str] {
    match section {
        SectionType::Cube => CUBE_OUTPUT_FIELDS,
        SectionType::Join => JOIN_OUTPUT_FIELDS,
        SectionType::Dimension => DIMENSION_OUTPUT_FIELDS,
        SectionType::Measure => MEASURE_OUTPUT_FIELDS,
    }
}

fn copy_fields(resolved: &ResolvedRow, output_fields: &[&str]) -> IndexMap<String, FieldValue> {
    output_fields
        .iter()
        .filter_map(|&field| {
            resolved
                .canonical
                .get(field)
                .map(|value| (field.to_string(), value.clone()))
        })
        .collect()
}

fn append_unknown(fields: &mut IndexMap<String, FieldValue>, resolved: &ResolvedRow) {
    for (header, value) in &resolved.unknown {
        fields
            .entry(header.clone())
            .or_insert_with(|| value.clone());
    }
}
