use anyhow::Result;

use super::inflection::forms_from_tables;
use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::entry::Inflection;
use crate::labels::Labels;
use crate::markup::{self, Outline, Stop};

/// Reads the conjugation tables of a `Flexion:<verb>` page.
pub struct VerbInflectionExtractor;

impl Extractor for VerbInflectionExtractor {
    fn id(&self) -> SectionId {
        SectionId::VerbInflection
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels)?.map(SectionValue::Inflection))
    }
}

/// Forms from every table under the finite-forms heading, sub-headings included.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<Inflection>> {
    let Some(nodes) = outline.section(labels.for_section(SectionId::VerbInflection), None, Stop::SameLevel) else {
        return Ok(SectionResult::Absent);
    };
    forms_from_tables(&markup::tables(&nodes), &labels.tables)
}

// ── Tests ──
