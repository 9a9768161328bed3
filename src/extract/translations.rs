use anyhow::Result;

use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::entry::Translations;
use crate::labels::Labels;
use crate::markup::{self, text, Outline, Stop};

/// Longer prefixes before a colon are prose, not a language name.
const MAX_LANGUAGE_CHARS: usize = 40;

pub struct TranslationsExtractor;

impl Extractor for TranslationsExtractor {
    fn id(&self) -> SectionId {
        SectionId::Translations
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Translations))
    }
}

/// Language name to translated forms, from items shaped `Englisch: [1] house; [2] family`.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Translations> {
    let Some(nodes) = outline.section(labels.for_section(SectionId::Translations), None, Stop::AnyHeading) else {
        return SectionResult::Absent;
    };

    let mut translations = Translations::new();
    for item in markup::list_items(&nodes) {
        let Some((language, rest)) = item.split_once(':') else {
            continue;
        };
        let language = language.trim();
        if language.is_empty() || language.chars().count() > MAX_LANGUAGE_CHARS {
            continue;
        }
        let forms: Vec<String> = text::split_phrases(&text::strip_sense_markers(rest), &[',', ';'])
            .into_iter()
            .filter(|f| !labels.tables.is_placeholder(f))
            .collect();
        if forms.is_empty() {
            continue;
        }
        translations
            .entry(language.to_string())
            .or_default()
            .extend(forms);
    }

    if translations.is_empty() {
        SectionResult::Absent
    } else {
        SectionResult::Present(translations)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Document;

    fn run(markup: &str) -> SectionResult<Translations> {
        let doc = Document::parse(markup);
        extract(&doc.outline(), &Labels::builtin().unwrap())
    }

    #[test]
    fn languages_in_order_with_repeats_extended() {
        let markup = std::fs::read_to_string("tests/fixtures/haus.html").unwrap();
        let t = run(&markup).into_option().unwrap();
        let languages: Vec<&str> = t.keys().map(String::as_str).collect();
        assert_eq!(languages, vec!["Englisch", "Französisch", "Spanisch"]);
        assert_eq!(t["Englisch"], vec!["house", "family", "household", "house"]);
        assert_eq!(t["Französisch"], vec!["maison f"]);
    }

    #[test]
    fn items_without_language_skipped() {
        let r = run("<h4>Übersetzungen</h4><ul><li>siehe auch</li><li>Italienisch: [1] —</li></ul>");
        assert_eq!(r, SectionResult::Absent);
    }

    #[test]
    fn nested_dialect_items() {
        let r = run(
            "<h4>Übersetzungen</h4><ul><li>Englisch: [1] house<ul><li>Schottisch: [1] hoose</li></ul></li></ul>",
        );
        let t = r.into_option().unwrap();
        assert_eq!(t["Englisch"], vec!["house"]);
        assert_eq!(t["Schottisch"], vec!["hoose"]);
    }
}
