use anyhow::Result;

use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::entry::Hyphenation;
use crate::labels::Labels;
use crate::markup::{self, text, Outline, Stop};

const SYLLABLE_SEPARATORS: &[char] = &['·', '‧', '•'];

pub struct HyphenationExtractor;

impl Extractor for HyphenationExtractor {
    fn id(&self) -> SectionId {
        SectionId::Hyphenation
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Hyphenation))
    }
}

/// Syllables of the headword form, taken from the first line of the section.
///
/// `ge·hen, Präteritum: ging, …` yields `["ge", "hen"]`; the forms after the
/// first comma belong to other words.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Hyphenation> {
    let Some(nodes) = outline.section(labels.for_section(SectionId::Hyphenation), None, Stop::AnyHeading) else {
        return SectionResult::Absent;
    };
    let first_line = markup::list_items(&nodes)
        .into_iter()
        .next()
        .or_else(|| {
            nodes
                .iter()
                .map(|n| text::inline_text(*n))
                .find(|t| !t.is_empty())
        });
    let Some(line) = first_line else {
        return SectionResult::Absent;
    };
    let line = text::strip_sense_markers(&line);
    let headword = line.split(',').next().unwrap_or_default().trim();
    if labels.tables.is_placeholder(headword) {
        return SectionResult::Absent;
    }
    SectionResult::from_items(syllables(headword))
}

fn syllables(word: &str) -> Vec<String> {
    word.split(SYLLABLE_SEPARATORS)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ── Tests ──
