use anyhow::Result;

use super::{phrase_list, Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::Outline;

pub struct ExamplesExtractor;

impl Extractor for ExamplesExtractor {
    fn id(&self) -> SectionId {
        SectionId::Examples
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Examples))
    }
}

/// Usage sentences as a flat list; the sense each belongs to is not kept.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Vec<String>> {
    phrase_list(outline, labels, SectionId::Examples, &[])
}

// ── Tests ──
