//! Section extractors: one per linguistic section, all behind [`Extractor`].
//!
//! Extractors are pure functions of the outline they are handed. A missing
//! section is [`SectionResult::Absent`], never an error.

pub mod antonyms;
pub mod examples;
pub mod hyphenation;
pub mod idioms;
pub mod inflection;
pub mod meanings;
pub mod origin;
pub mod pronunciation;
pub mod synonyms;
pub mod translations;
pub mod verb_inflection;
pub mod word_combinations;

use anyhow::Result;

use crate::entry::{Hyphenation, Inflection, LexicalEntry, Pronunciation, Translations};
use crate::labels::Labels;
use crate::markup::{self, text, Outline, Stop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hyphenation,
    Pronunciation,
    Origin,
    Meanings,
    Synonyms,
    Antonyms,
    Examples,
    Idioms,
    WordCombinations,
    Translations,
    Inflection,
    VerbInflection,
}

impl SectionId {
    pub const ALL: [SectionId; 12] = [
        SectionId::Hyphenation,
        SectionId::Pronunciation,
        SectionId::Origin,
        SectionId::Meanings,
        SectionId::Synonyms,
        SectionId::Antonyms,
        SectionId::Examples,
        SectionId::Idioms,
        SectionId::WordCombinations,
        SectionId::Translations,
        SectionId::Inflection,
        SectionId::VerbInflection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Hyphenation => "hyphenation",
            SectionId::Pronunciation => "pronunciation",
            SectionId::Origin => "origin",
            SectionId::Meanings => "meanings",
            SectionId::Synonyms => "synonyms",
            SectionId::Antonyms => "antonyms",
            SectionId::Examples => "examples",
            SectionId::Idioms => "idioms",
            SectionId::WordCombinations => "word_combinations",
            SectionId::Translations => "translations",
            SectionId::Inflection => "inflection",
            SectionId::VerbInflection => "verb_inflection",
        }
    }
}

/// Outcome of one extractor: a populated sub-record or an explicit absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionResult<T> {
    Present(T),
    Absent,
}

impl<T> SectionResult<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, SectionResult::Present(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            SectionResult::Present(value) => Some(value),
            SectionResult::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SectionResult<U> {
        match self {
            SectionResult::Present(value) => SectionResult::Present(f(value)),
            SectionResult::Absent => SectionResult::Absent,
        }
    }
}

impl<T> From<Option<T>> for SectionResult<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(SectionResult::Absent, SectionResult::Present)
    }
}

impl SectionResult<Vec<String>> {
    /// Present only when at least one non-empty string survives.
    pub fn from_items(items: Vec<String>) -> Self {
        let items: Vec<String> = items.into_iter().filter(|s| !s.trim().is_empty()).collect();
        if items.is_empty() {
            SectionResult::Absent
        } else {
            SectionResult::Present(items)
        }
    }
}

/// Typed payload of a present section, tagged by the entry field it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValue {
    Hyphenation(Hyphenation),
    Pronunciation(Pronunciation),
    Origin(String),
    Meanings(Vec<String>),
    Synonyms(Vec<String>),
    Antonyms(Vec<String>),
    Examples(Vec<String>),
    Idioms(Vec<String>),
    WordCombinations(Vec<String>),
    Translations(Translations),
    Inflection(Inflection),
}

impl SectionValue {
    pub fn apply_to(self, entry: &mut LexicalEntry) {
        match self {
            SectionValue::Hyphenation(v) => entry.hyphenation = Some(v),
            SectionValue::Pronunciation(v) => entry.pronunciation = Some(v),
            SectionValue::Origin(v) => entry.origin = Some(v),
            SectionValue::Meanings(v) => entry.meanings = Some(v),
            SectionValue::Synonyms(v) => entry.synonyms = Some(v),
            SectionValue::Antonyms(v) => entry.antonyms = Some(v),
            SectionValue::Examples(v) => entry.examples = Some(v),
            SectionValue::Idioms(v) => entry.idioms = Some(v),
            SectionValue::WordCombinations(v) => entry.word_combinations = Some(v),
            SectionValue::Translations(v) => entry.translations = Some(v),
            SectionValue::Inflection(v) => entry.merge_inflection(v),
        }
    }
}

pub trait Extractor: Send + Sync {
    fn id(&self) -> SectionId;

    fn extract(&self, outline: &Outline<'_>, labels: &Labels) -> Result<SectionResult<SectionValue>>;
}

/// Extractors run against the primary page, in merge order.
pub const PRIMARY_EXTRACTORS: &[&dyn Extractor] = &[
    &hyphenation::HyphenationExtractor,
    &pronunciation::PronunciationExtractor,
    &meanings::MeaningsExtractor,
    &origin::OriginExtractor,
    &synonyms::SynonymsExtractor,
    &antonyms::AntonymsExtractor,
    &examples::ExamplesExtractor,
    &idioms::IdiomsExtractor,
    &translations::TranslationsExtractor,
    &word_combinations::WordCombinationsExtractor,
    &inflection::InflectionExtractor,
];

/// Extractors run against the secondary (inflection) page.
pub const SECONDARY_EXTRACTORS: &[&dyn Extractor] = &[&verb_inflection::VerbInflectionExtractor];

/// List items of the section, sense markers stripped, optionally split into phrases.
pub(crate) fn phrase_list(
    outline: &Outline<'_>,
    labels: &Labels,
    id: SectionId,
    separators: &[char],
) -> SectionResult<Vec<String>> {
    let Some(nodes) = outline.section(labels.for_section(id), None, Stop::AnyHeading) else {
        return SectionResult::Absent;
    };
    let items = markup::list_items(&nodes)
        .iter()
        .map(|item| text::strip_sense_markers(item))
        .flat_map(|item| {
            if separators.is_empty() {
                vec![item]
            } else {
                text::split_phrases(&item, separators)
            }
        })
        .filter(|item| !labels.tables.is_placeholder(item))
        .collect();
    SectionResult::from_items(items)
}

// ── Tests ──
