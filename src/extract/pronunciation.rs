use std::sync::LazyLock;

use anyhow::Result;
use indexmap::IndexSet;
use regex::Regex;

use super::{Extractor, SectionId, SectionResult, SectionValue};
use crate::entry::Pronunciation;
use crate::labels::Labels;
use crate::markup::{self, text, Outline, Stop};

/// Bracketed transcription like `[ˈɡeːən]` in markup without `ipa` spans.
static BRACKETED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]").unwrap());

/// Sense references that look bracketed but are not IPA.
static NOT_IPA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[a-z]?(?:\s*[,–-]\s*\d+[a-z]?)*\s*$").unwrap());

pub struct PronunciationExtractor;

impl Extractor for PronunciationExtractor {
    fn id(&self) -> SectionId {
        SectionId::Pronunciation
    }

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>> {
        Ok(extract(outline, labels).map(SectionValue::Pronunciation))
    }
}

/// Distinct IPA transcriptions, first occurrence first.
pub fn extract(outline: &Outline<'_>, labels: &Labels) -> SectionResult<Pronunciation> {
    let Some(nodes) = outline.section(labels.for_section(SectionId::Pronunciation), None, Stop::AnyHeading) else {
        return SectionResult::Absent;
    };

    let mut found: Pronunciation = nodes
        .iter()
        .flat_map(|n| text::find_elements(*n, |e| e.classes().any(|c| c == "ipa")))
        .filter_map(|span| clean(&text::inline_text(span)))
        .collect();

    if found.is_empty() {
        found = markup::list_items(&nodes)
            .iter()
            .flat_map(|item| {
                BRACKETED_RE
                    .captures_iter(item)
                    .filter_map(|c| c.get(1))
                    .filter(|m| !NOT_IPA_RE.is_match(m.as_str()))
                    .filter_map(|m| clean(m.as_str()))
                    .collect::<Vec<_>>()
            })
            .collect::<IndexSet<_>>();
    }

    if found.is_empty() {
        SectionResult::Absent
    } else {
        SectionResult::Present(found)
    }
}

fn clean(raw: &str) -> Option<String> {
    let t = raw.trim().trim_matches(['[', ']', '/']).trim();
    if t.is_empty() || t.chars().all(|c| matches!(c, '…' | '.' | '—' | '–' | '-' | '?')) {
        return None;
    }
    Some(t.to_string())
}

// ── Tests ──
