//! Word and page lookups: resolve pages upstream, then assemble entries.

use tracing::{debug, info};

use crate::assemble::{Assembler, Assembly};
use crate::error::{Error, Result};
use crate::upstream::{PageRef, PageSource};

pub struct Lookup<S> {
    source: S,
    assembler: Assembler,
    section: u32,
}

impl<S: PageSource> Lookup<S> {
    pub fn new(source: S, assembler: Assembler, section: u32) -> Self {
        Self {
            source,
            assembler,
            section,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Candidate pages for `word`. A blank word is a missing parameter.
    pub async fn search(&self, word: &str) -> Result<Vec<PageRef>> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::MissingInput("word"));
        }
        let pages = self.source.find_candidate_pages(word).await?;
        info!("Search {:?}: {} page(s)", word, pages.len());
        Ok(pages)
    }

    /// Fetch a page and its inflection page, and assemble the entry.
    ///
    /// An inflection lookup failure fails the whole request, the same as a
    /// primary fetch failure.
    pub async fn page(&self, page_id: u64) -> Result<Assembly> {
        let primary = self.source.fetch_page_section(page_id, self.section).await?;

        let secondary = if primary.title.trim().is_empty() {
            None
        } else {
            self.source
                .find_inflection_page(&primary.title, self.section)
                .await?
        };
        debug!(
            "Page {} {:?}: inflection page {}",
            page_id,
            primary.title,
            if secondary.is_some() { "found" } else { "absent" }
        );

        let secondary_markup = secondary.as_ref().map(|s| s.markup.as_str());
        Ok(self
            .assembler
            .assemble_markup(primary.page_id, &primary.title, &primary.markup, secondary_markup))
    }

    /// Search, then assemble the candidate titled exactly `word`, else the
    /// first one. `None` when nothing matches.
    pub async fn word(&self, word: &str) -> Result<Option<Assembly>> {
        let pages = self.search(word).await?;
        let best = pages
            .iter()
            .find(|p| p.title.trim() == word.trim())
            .or_else(|| pages.first());
        match best {
            Some(page) => Ok(Some(self.page(page.pageid).await?)),
            None => Ok(None),
        }
    }
}

// ── Tests ──
