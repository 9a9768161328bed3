use anyhow::Result;

use super::{phrase_list, Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::Outline;

pub struct IdiomsExtractor;

impl Extractor for IdiomsExtractor {
    fn id(&self) -> SectionId {
        SectionId::Idioms
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Idioms))
    }
}

pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Vec<String>> {
    phrase_list(outline, labels, SectionId::Idioms, &[])
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Document;

    #[test]
    fn whole_items_kept() {
        let markup = std::fs::read_to_string("tests/fixtures/haus.html").unwrap();
        let doc = Document::parse(&markup);
        let r = extract(&doc.outline(), &Labels::builtin().unwrap());
        assert_eq!(
            r.into_option().unwrap(),
            vec!["das Haus hüten – nicht ausgehen", "mit der Tür ins Haus fallen"]
        );
    }

    #[test]
    fn proverbs_label() {
        let doc = Document::parse("<p>Sprichwörter:</p><dl><dd>[1] Wer rastet, der rostet.</dd></dl>");
        let r = extract(&doc.outline(), &Labels::builtin().unwrap());
        assert_eq!(r, SectionResult::Present(vec!["Wer rastet, der rostet.".to_string()]));
    }
}
