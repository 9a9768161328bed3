//! Section-scoped querying over rendered wiki markup.
//!
//! The content root's children are flattened into a block sequence; headings
//! (`h1`–`h6`, `mw-heading` wrappers and `Label:` paragraphs) split it into
//! sections that the extractors look up by label.

pub mod blocks;
pub mod table;
pub mod text;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use blocks::{label_matches, Block, BlockKind, LABEL_LEVEL};
pub use table::{table_cells, Cell};

static CONTENT_ROOT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-parser-output").expect("valid selector for content root"));

/// Owned parse of one page's markup.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    pub fn outline(&self) -> Outline<'_> {
        let root = self
            .html
            .select(&CONTENT_ROOT)
            .next()
            .unwrap_or_else(|| self.html.root_element());
        Outline {
            blocks: blocks::classify_nodes(root),
        }
    }
}

/// A located heading: its position in the block sequence and its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub index: usize,
    pub level: u8,
    pub label: String,
}

/// Where a section's content ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// At the next heading of any level, label paragraphs included.
    AnyHeading,
    /// At the next heading of the same or a higher level.
    SameLevel,
}

#[derive(Debug, Clone)]
pub struct Outline<'a> {
    blocks: Vec<Block<'a>>,
}

impl<'a> Outline<'a> {
    pub fn blocks(&self) -> &[Block<'a>] {
        &self.blocks
    }

    /// First heading whose text or id matches `label`. With `max_level`, deeper
    /// headings are ignored (`Some(6)` excludes label paragraphs).
    pub fn find_heading(&self, label: &str, max_level: Option<u8>) -> Option<Heading> {
        self.blocks.iter().enumerate().find_map(|(index, block)| {
            let BlockKind::Heading { level, label: text, id } = &block.kind else {
                return None;
            };
            if max_level.is_some_and(|max| *level > max) {
                return None;
            }
            let id_matches = id
                .as_deref()
                .is_some_and(|id| label_matches(&id.replace('_', " "), label));
            if label_matches(text, label) || id_matches {
                Some(Heading {
                    index,
                    level: *level,
                    label: text.clone(),
                })
            } else {
                None
            }
        })
    }

    /// Try `labels` in order and return the heading of the first one present.
    pub fn find_first(&self, labels: &[String], max_level: Option<u8>) -> Option<Heading> {
        labels
            .iter()
            .find_map(|label| self.find_heading(label, max_level))
    }

    /// Nodes after `heading` up to the next heading whose level is `<= level`.
    pub fn collect_until_next_heading(&self, heading: &Heading, level: u8) -> Vec<ElementRef<'a>> {
        self.blocks
            .iter()
            .skip(heading.index + 1)
            .take_while(|b| b.heading_level().map_or(true, |l| l > level))
            .map(|b| b.node)
            .collect()
    }

    /// Content of the first section labelled by any of `labels`, or `None` when absent.
    pub fn section(&self, labels: &[String], max_level: Option<u8>, stop: Stop) -> Option<Vec<ElementRef<'a>>> {
        let heading = self.find_first(labels, max_level)?;
        let level = match stop {
            Stop::AnyHeading => LABEL_LEVEL,
            Stop::SameLevel => heading.level,
        };
        Some(self.collect_until_next_heading(&heading, level))
    }
}

/// List items of every node, flattened in order.
pub fn list_items(nodes: &[ElementRef<'_>]) -> Vec<String> {
    nodes.iter().flat_map(|n| text::list_items(*n)).collect()
}

/// All tables at or below `nodes`, in document order.
pub fn tables<'a>(nodes: &[ElementRef<'a>]) -> Vec<ElementRef<'a>> {
    nodes
        .iter()
        .flat_map(|n| text::find_elements(*n, |e| e.name() == "table"))
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<div class="mw-content-ltr mw-parser-output" lang="de" dir="ltr">
<h2 id="Haus_(Deutsch)">Haus (<a href="/wiki/Deutsch">Deutsch</a>)</h2>
<h3 id="Substantiv,_n">Substantiv, <i>n</i></h3>
<table class="inflection-table"><tr><th>Kasus</th><th>Singular</th></tr></table>
<p title="Trennungsmöglichkeiten am Zeilenumbruch">Worttrennung:</p>
<dl><dd>Haus, <i>Plural:</i> Häu·ser</dd></dl>
<p title="bedeutungsgleich gebrauchte Wörter">Synonyme:</p>
<dl><dd>[1] Gebäude</dd><dd>[2] Familie</dd></dl>
<h4 id="Übersetzungen">Übersetzungen</h4>
<div><ul><li>Englisch: [1] house</li></ul></div>
<p>Referenzen:</p>
<dl><dd>[1] Wikipedia</dd></dl>
</div>"#;

    #[test]
    fn finds_label_paragraph() {
        let doc = Document::parse(PAGE);
        let outline = doc.outline();
        let h = outline.find_heading("Synonyme", None).unwrap();
        assert_eq!(h.level, LABEL_LEVEL);
        let nodes = outline.collect_until_next_heading(&h, LABEL_LEVEL);
        assert_eq!(list_items(&nodes), vec!["[1] Gebäude", "[2] Familie"]);
    }

    #[test]
    fn absent_heading_is_none() {
        let doc = Document::parse(PAGE);
        let outline = doc.outline();
        assert!(outline.find_heading("Gegenwörter", None).is_none());
        assert!(outline
            .section(&["Gegenwörter".to_string()], None, Stop::AnyHeading)
            .is_none());
    }

    #[test]
    fn variants_tried_in_order() {
        let doc = Document::parse(PAGE);
        let outline = doc.outline();
        let labels = vec!["Sinnverwandte Wörter".to_string(), "Synonyme".to_string()];
        assert_eq!(outline.find_first(&labels, None).unwrap().label, "Synonyme");
    }

    #[test]
    fn max_level_excludes_label_paragraphs() {
        let doc = Document::parse(PAGE);
        let outline = doc.outline();
        assert!(outline.find_heading("Worttrennung", Some(6)).is_none());
        assert_eq!(outline.find_heading("Substantiv", Some(6)).unwrap().level, 3);
    }

    #[test]
    fn stop_rules() {
        let doc = Document::parse(PAGE);
        let outline = doc.outline();
        let pos = vec!["Substantiv".to_string()];
        let intro = outline.section(&pos, Some(6), Stop::AnyHeading).unwrap();
        assert_eq!(tables(&intro).len(), 1);
        assert_eq!(intro.len(), 1);

        let whole = outline.section(&pos, Some(6), Stop::SameLevel).unwrap();
        assert!(whole.len() > intro.len());

        let tr = vec!["Übersetzungen".to_string()];
        let nodes = outline.section(&tr, None, Stop::AnyHeading).unwrap();
        assert_eq!(list_items(&nodes), vec!["Englisch: [1] house"]);
    }

    #[test]
    fn bare_fragment_without_content_root() {
        let doc = Document::parse("<p>Herkunft:</p><dl><dd>von lat. domus</dd></dl>");
        let outline = doc.outline();
        assert_eq!(outline.blocks().len(), 2);
        assert!(outline.find_heading("Herkunft", None).is_some());
    }
}
