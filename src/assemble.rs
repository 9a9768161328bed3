//! Run every extractor against a page and fold the results into one entry.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use crate::entry::LexicalEntry;
use crate::extract::{Extractor, SectionId, SectionResult, SectionValue, PRIMARY_EXTRACTORS, SECONDARY_EXTRACTORS};
use crate::labels::Labels;
use crate::markup::{Document, Outline};

/// A section that failed to extract. The rest of the entry is still built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub section: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn is_for(&self, id: SectionId) -> bool {
        self.section == id.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub entry: LexicalEntry,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Assembler {
    labels: Labels,
}

impl Assembler {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    /// Parse both markups and assemble. A blank secondary markup counts as none.
    pub fn assemble_markup(&self, page_id: u64, title: &str, primary: &str, secondary: Option<&str>) -> Assembly {
        let primary_doc = Document::parse(primary);
        let secondary_doc = secondary
            .filter(|markup| !markup.trim().is_empty())
            .map(Document::parse);
        let primary_outline = primary_doc.outline();
        let secondary_outline = secondary_doc.as_ref().map(Document::outline);
        self.assemble(page_id, title, &primary_outline, secondary_outline.as_ref())
    }

    pub fn assemble(
        &self,
        page_id: u64,
        title: &str,
        primary: &Outline<'_>,
        secondary: Option<&Outline<'_>>,
    ) -> Assembly {
        let mut entry = LexicalEntry::new(page_id, title);
        let mut diagnostics = Vec::new();

        for extractor in PRIMARY_EXTRACTORS {
            if let Some(value) = self.run(*extractor, primary, &mut diagnostics) {
                value.apply_to(&mut entry);
            }
        }

        // Secondary forms only fill keys the primary page left open.
        if let Some(secondary) = secondary {
            for extractor in SECONDARY_EXTRACTORS {
                if let Some(value) = self.run(*extractor, secondary, &mut diagnostics) {
                    value.apply_to(&mut entry);
                }
            }
        }

        debug!(
            "Assembled {:?} ({}) with {} failed section(s)",
            title,
            page_id,
            diagnostics.len()
        );
        Assembly { entry, diagnostics }
    }

    fn run(
        &self,
        extractor: &dyn Extractor,
        outline: &Outline<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<SectionValue> {
        let section = extractor.id();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(outline, &self.labels)));
        let message = match outcome {
            Ok(Ok(SectionResult::Present(value))) => return Some(value),
            Ok(Ok(SectionResult::Absent)) => return None,
            Ok(Err(e)) => format!("{:#}", e),
            Err(payload) => panic_message(payload.as_ref()),
        };
        warn!("Section {} failed: {}", section.name(), message);
        diagnostics.push(Diagnostic {
            section: section.name(),
            message,
        });
        None
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "extractor panicked".to_string()
    }
}

// ── Tests ──
