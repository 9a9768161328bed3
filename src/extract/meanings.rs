use anyhow::Result;

use super::{phrase_list, Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::Outline;

pub struct MeaningsExtractor;

impl Extractor for MeaningsExtractor {
    fn id(&self) -> SectionId {
        SectionId::Meanings
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Meanings))
    }
}

/// One string per sense, sub-senses following their parent.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Vec<String>> {
    phrase_list(outline, labels, SectionId::Meanings, &[])
}

// ── Tests ──
