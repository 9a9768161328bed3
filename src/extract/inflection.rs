//! Inflection tables of the part-of-speech block.
//!
//! A table is read as a grid (spans already expanded by [`table_cells`]) and
//! every value cell becomes one `label → form` pair. The label is built from
//! the current section title row, the leading header cells of the row and the
//! column header, joined by `_`: `Nominativ_Singular`, `Präsens_ich`.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Result;
use indexmap::IndexSet;
use regex::Regex;
use scraper::ElementRef;

use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::entry::Inflection;
use crate::labels::{Labels, TableLabels};
use crate::markup::{self, table_cells, Cell, Outline, Stop};

/// Part-of-speech headings are real headings, never label paragraphs.
const POS_MAX_LEVEL: u8 = 6;

/// `er/sie/es` on Flexion pages is `er, sie, es` on the entry page.
static PERSON_SLASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());

pub struct InflectionExtractor;

impl Extractor for InflectionExtractor {
    fn id(&self) -> SectionId {
        SectionId::Inflection
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels)?.map(SectionValue::Inflection))
    }
}

/// Forms from the tables between the part-of-speech heading and the first label.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<Inflection>> {
    let Some(nodes) = outline.section(
        labels.for_section(SectionId::Inflection),
        Some(POS_MAX_LEVEL),
        Stop::AnyHeading,
    ) else {
        return Ok(SectionResult::Absent);
    };
    forms_from_tables(&markup::tables(&nodes), &labels.tables)
}

/// Union of the forms of `tables`; on a repeated key the earlier table wins.
pub fn forms_from_tables(tables: &[ElementRef<'_>], vocab: &TableLabels) -> Result<SectionResult<Inflection>> {
    let mut forms = Inflection::new();
    for table in tables {
        let cells = table_cells(*table)?;
        for (key, form) in table_forms(&cells, vocab) {
            forms.entry(key).or_insert(form);
        }
    }
    Ok(if forms.is_empty() {
        SectionResult::Absent
    } else {
        SectionResult::Present(forms)
    })
}

/// Label every value cell of one table.
///
/// `cells` must be sorted by row, then column.
pub fn table_forms(cells: &[Cell], vocab: &TableLabels) -> Inflection {
    let mut forms = Inflection::new();
    let mut title: Option<String> = None;
    let mut columns: HashMap<usize, String> = HashMap::new();

    for row in cells.chunk_by(|a, b| a.row == b.row) {
        if row.iter().all(|c| c.text.is_empty()) {
            continue;
        }

        if row.iter().all(|c| c.header) {
            let distinct: IndexSet<&str> = row
                .iter()
                .map(|c| c.text.as_str())
                .filter(|t| !t.is_empty())
                .collect();
            if distinct.len() == 1 {
                // One title spanning the table, e.g. `Präsens`.
                title = distinct.first().map(|t| t.to_string());
            } else {
                columns = row.iter().map(|c| (c.col, c.text.clone())).collect();
            }
            continue;
        }

        let mut label: Vec<String> = Vec::new();
        let mut leading = true;
        for (i, cell) in row.iter().enumerate() {
            if cell.header {
                if cell.text.is_empty() {
                    continue;
                }
                let text = row_label(&cell.text);
                if leading {
                    if label.last() != Some(&text) {
                        label.push(text);
                    }
                } else {
                    label.pop();
                    label.push(text);
                }
                continue;
            }
            leading = false;

            let column = columns.get(&cell.col).map(String::as_str);
            let is_last = i + 1 == row.len();
            let labels_row = match column {
                Some(header) => vocab.is_label_column(header),
                None => label.is_empty() && !is_last && title.is_some(),
            };
            if labels_row {
                if !cell.text.is_empty() {
                    label = vec![row_label(&cell.text)];
                }
                continue;
            }

            if cell.text.is_empty() || vocab.is_placeholder(&cell.text) {
                continue;
            }

            let mut parts: Vec<&str> = Vec::new();
            if let Some(t) = title.as_deref() {
                parts.push(t);
            }
            parts.extend(label.iter().map(String::as_str));
            if let Some(header) = column {
                if !parts.contains(&header) {
                    parts.push(header);
                }
            }
            parts.retain(|p| !p.is_empty() && !vocab.is_ignored(p));
            if parts.is_empty() {
                continue;
            }
            forms.entry(parts.join("_")).or_insert_with(|| cell.text.clone());
        }
    }

    forms
}

fn row_label(text: &str) -> String {
    PERSON_SLASH_RE.replace_all(text, ", ").into_owned()
}

// ── Tests ──
