use anyhow::Result;

use super::{phrase_list, Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::Outline;

pub struct SynonymsExtractor;

impl Extractor for SynonymsExtractor {
    fn id(&self) -> SectionId {
        SectionId::Synonyms
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Synonyms))
    }
}

pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Vec<String>> {
    phrase_list(outline, labels, SectionId::Synonyms, &[',', ';'])
}

// ── Tests ──
