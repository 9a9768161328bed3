//! Versioned heading-label data for locating sections.
//!
//! The defaults ship in `config/labels.toml` and are compiled in; a file given
//! at runtime is layered on top so markup drift upstream can be patched
//! without a rebuild.

use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::extract::SectionId;

pub const SUPPORTED_VERSION: u32 = 1;

const BUILTIN_LABELS: &str = include_str!("../config/labels.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Labels {
    pub version: u32,
    pub sections: SectionLabels,
    pub tables: TableLabels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionLabels {
    pub hyphenation: Vec<String>,
    pub pronunciation: Vec<String>,
    pub origin: Vec<String>,
    pub meanings: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub examples: Vec<String>,
    pub idioms: Vec<String>,
    pub word_combinations: Vec<String>,
    pub translations: Vec<String>,
    pub inflection: Vec<String>,
    pub verb_inflection: Vec<String>,
}

/// Header vocabulary used when turning inflection tables into form keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableLabels {
    #[serde(default)]
    pub label_columns: Vec<String>,
    #[serde(default)]
    pub ignored_headers: Vec<String>,
    #[serde(default)]
    pub placeholders: Vec<String>,
}

impl Labels {
    /// The compiled-in label set.
    pub fn builtin() -> Result<Self> {
        Self::load(None)
    }

    /// Built-in labels with an optional override file layered on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(BUILTIN_LABELS, FileFormat::Toml));
        if let Some(path) = path {
            info!("Loading label overrides from {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }
        let labels: Labels = builder.build()?.try_deserialize()?;
        if labels.version > SUPPORTED_VERSION {
            return Err(Error::Config(config::ConfigError::Message(format!(
                "labels version {} is newer than supported version {}",
                labels.version, SUPPORTED_VERSION
            ))));
        }
        Ok(labels)
    }

    pub fn for_section(&self, id: SectionId) -> &[String] {
        let s = &self.sections;
        match id {
            SectionId::Hyphenation => &s.hyphenation,
            SectionId::Pronunciation => &s.pronunciation,
            SectionId::Origin => &s.origin,
            SectionId::Meanings => &s.meanings,
            SectionId::Synonyms => &s.synonyms,
            SectionId::Antonyms => &s.antonyms,
            SectionId::Examples => &s.examples,
            SectionId::Idioms => &s.idioms,
            SectionId::WordCombinations => &s.word_combinations,
            SectionId::Translations => &s.translations,
            SectionId::Inflection => &s.inflection,
            SectionId::VerbInflection => &s.verb_inflection,
        }
    }
}

impl TableLabels {
    pub fn is_label_column(&self, header: &str) -> bool {
        contains_ci(&self.label_columns, header)
    }

    pub fn is_ignored(&self, header: &str) -> bool {
        contains_ci(&self.ignored_headers, header)
    }

    pub fn is_placeholder(&self, value: &str) -> bool {
        self.placeholders.iter().any(|p| p == value.trim())
    }
}

fn contains_ci(list: &[String], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    list.iter().any(|s| s.to_lowercase() == needle)
}

// ── Tests ──
