use anyhow::Result;

use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::labels::Labels;
use crate::markup::{text, Outline, Stop};

pub struct OriginExtractor;

impl Extractor for OriginExtractor {
    fn id(&self) -> SectionId {
        SectionId::Origin
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Origin))
    }
}

/// Etymology prose, one line per item or paragraph.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<String> {
    let Some(nodes) = outline.section(labels.for_section(SectionId::Origin), None, Stop::AnyHeading) else {
        return SectionResult::Absent;
    };
    let lines: Vec<String> = nodes
        .iter()
        .flat_map(|node| {
            let items = text::list_items(*node);
            if items.is_empty() {
                vec![text::inline_text(*node)]
            } else {
                items
            }
        })
        .map(|line| text::strip_sense_markers(&line))
        .filter(|line| !line.is_empty() && !labels.tables.is_placeholder(line))
        .collect();

    if lines.is_empty() {
        SectionResult::Absent
    } else {
        SectionResult::Present(lines.join("\n"))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Document;

    fn run(markup: &str) -> SectionResult<String> {
        let doc = Document::parse(markup);
        extract(&doc.outline(), &Labels::builtin().unwrap())
    }

    #[test]
    fn footnotes_removed() {
        let markup = std::fs::read_to_string("tests/fixtures/haus.html").unwrap();
        assert_eq!(
            run(&markup),
            SectionResult::Present("mittelhochdeutsch, althochdeutsch hūs, germanisch *hūsa-".to_string())
        );
    }

    #[test]
    fn multiple_items_joined_by_newline() {
        let r = run("<p>Herkunft:</p><dl><dd>von lateinisch <i>domus</i></dd><dd>Lehnwort</dd></dl><p>Synonyme:</p>");
        assert_eq!(r, SectionResult::Present("von lateinisch domus\nLehnwort".to_string()));
    }

    #[test]
    fn sense_markers_stripped() {
        let r = run("<p>Herkunft:</p><dl><dd>[1] von lat. domus</dd><dd>[2, 3] Lehnwort</dd></dl>");
        assert_eq!(r, SectionResult::Present("von lat. domus\nLehnwort".to_string()));
    }

    #[test]
    fn empty_section_is_absent() {
        assert_eq!(run("<p>Herkunft:</p><dl><dd>—</dd></dl>"), SectionResult::Absent);
        assert_eq!(run("<p>Synonyme:</p><dl><dd>Bau</dd></dl>"), SectionResult::Absent);
    }
}
