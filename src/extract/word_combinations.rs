use anyhow::Result;

use super::{phrase_list, Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::Outline;

pub struct WordCombinationsExtractor;

impl Extractor for WordCombinationsExtractor {
    fn id(&self) -> SectionId {
        SectionId::WordCombinations
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::WordCombinations))
    }
}

/// Collocations. Only `;` separates them since commas occur inside a phrase.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Vec<String>> {
    phrase_list(outline, labels, SectionId::WordCombinations, &[';'])
}

// ── Tests ──
