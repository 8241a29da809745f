use std::collections::HashSet;

use tracing::{debug, info};

use crate::classifier::aliases;
use crate::classifier::sections::SectionType;
use crate::parser::names::normalize_sheet_name;
use crate::parser::table::Table;

/// A table scoring below this is left unclassified.
pub const MIN_CLASSIFICATION_SCORE: usize = 2;

/// Bonus added when the sheet name contains one of the section's keywords.
pub const KEYWORD_BONUS: usize = 2;

/// How well one table matches one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionScore {
    /// Section being scored.
    pub section: SectionType,
    /// Canonical fields present after alias resolution, in canonical order.
    pub matched_fields: Vec<&'static str>,
    /// Whether the sheet name contains one of the section's keywords.
    pub keyword_hit: bool,
}

impl SectionScore {
    /// Matched field count plus the keyword bonus.
    pub fn score(&self) -> usize {
        let bonus = if self.keyword_hit { KEYWORD_BONUS } else { 0 };
        self.matched_fields.len() + bonus
    }
}

/// A table together with its scores and the section it was assigned to.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The classified table.
    pub table: Table,
    /// One score per section, in priority order.
    pub scores: Vec<SectionScore>,
    /// Winning section, `None` when no section reached the minimum score.
    pub section: Option<SectionType>,
}

impl Classification {
    /// Score of a given section.
    pub fn score_for(&self, section: SectionType) -> usize {
        self.scores
            .iter()
            .find(|s| s.section == section)
            .map_or(0, SectionScore::score)
    }
}

/// True when the sheet name contains one of `section`'s keywords.
pub fn sheet_name_hints(sheet_name: &str, section: SectionType) -> bool {
    let lname = normalize_sheet_name(sheet_name);
    section.keywords().iter().any(|kw| lname.contains(kw))
}

/// Score a header set against one section.
///
/// Each canonical field counts once, however many headers resolve to it.
pub fn score_section<'a, I>(headers: I, section: SectionType, sheet_name: &str) -> SectionScore
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&'static str> = headers
        .into_iter()
        .filter_map(|header| aliases::resolve(header, section).canonical())
        .collect();

    let matched_fields = section
        .required_fields()
        .iter()
        .chain(section.optional_fields())
        .filter(|field| present.contains(*field))
        .copied()
        .collect();

    SectionScore {
        section,
        matched_fields,
        keyword_hit: sheet_name_hints(sheet_name, section),
    }
}

/// Pick the winning section from scores given in priority order.
///
/// The highest score wins; ties go to the earlier (higher-priority) section.
pub fn pick_section(scores: &[SectionScore]) -> Option<SectionType> {
    let best = scores.iter().map(SectionScore::score).max()?;
    if best < MIN_CLASSIFICATION_SCORE {
        return None;
    }
    scores
        .iter()
        .find(|s| s.score() == best)
        .map(|s| s.section)
}

/// Classify one normalized table by its headers and sheet name.
pub fn classify_table(table: Table) -> Classification {
    let scores: Vec<SectionScore> = SectionType::ALL
        .iter()
        .map(|&section| {
            score_section(
                table.headers.iter().map(String::as_str),
                section,
                &table.name,
            )
        })
        .collect();
    let section = pick_section(&scores);

    debug!(
        sheet = %table.name,
        cube = scores[0].score(),
        join = scores[1].score(),
        dimension = scores[2].score(),
        measure = scores[3].score(),
        "scored sheet"
    );

    Classification {
        table,
        scores,
        section,
    }
}

/// Classify every table, preserving sheet order.
pub fn classify_tables(tables: Vec<Table>) -> Vec<Classification> {
    tables
        .into_iter()
        .map(|table| {
            let classification = classify_table(table);
            match classification.section {
                Some(section) => info!(
                    sheet = %classification.table.name,
                    %section,
                    rows = classification.table.rows.len(),
                    "classified sheet"
                ),
                None => info!(
                    sheet = %classification.table.name,
                    "sheet does not match any section; skipping"
                ),
            }
            classification
        })
        .collect()
}
