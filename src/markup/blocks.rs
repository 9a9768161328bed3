use scraper::ElementRef;

use super::text;

/// Level given to label paragraphs such as `Worttrennung:`; deeper than any `h*`.
pub const LABEL_LEVEL: u8 = 7;

const MAX_LABEL_CHARS: usize = 60;
const NESTED_CONTENT_TAGS: &[&str] = &["dl", "ul", "ol", "table"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Heading {
        level: u8,
        label: String,
        id: Option<String>,
    },
    Content,
}

/// One top-level node of the content root.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub node: ElementRef<'a>,
}

impl Block<'_> {
    pub fn heading_level(&self) -> Option<u8> {
        match &self.kind {
            BlockKind::Heading { level, .. } => Some(*level),
            BlockKind::Content => None,
        }
    }
}

/// Flatten the children of `root` into blocks. `<section>` wrappers are transparent.
pub fn classify_nodes(root: ElementRef<'_>) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    push_children(root, &mut blocks);
    blocks
}

fn push_children<'a>(parent: ElementRef<'a>, blocks: &mut Vec<Block<'a>>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        if child.value().name() == "section" {
            push_children(child, blocks);
            continue;
        }
        blocks.push(Block {
            kind: classify(child),
            node: child,
        });
    }
}

fn classify(node: ElementRef<'_>) -> BlockKind {
    let element = node.value();

    // <h3>…</h3>
    if let Some(level) = heading_level(element.name()) {
        return heading(node, level);
    }

    // <div class="mw-heading mw-heading3"><h3>…</h3><span class="mw-editsection">…</span></div>
    if element.classes().any(|c| c == "mw-heading") {
        let inner = node
            .children()
            .filter_map(ElementRef::wrap)
            .find_map(|c| heading_level(c.value().name()).map(|level| (c, level)));
        if let Some((h, level)) = inner {
            return heading(h, level);
        }
    }

    // <p title="…">Worttrennung:</p>
    if matches!(element.name(), "p" | "div" | "dt") {
        if let Some(label) = label_paragraph(node) {
            return BlockKind::Heading {
                level: LABEL_LEVEL,
                label,
                id: None,
            };
        }
    }

    BlockKind::Content
}

fn heading(node: ElementRef<'_>, level: u8) -> BlockKind {
    let id = node.value().id().map(str::to_string).or_else(|| {
        text::find_elements(node, |e| e.classes().any(|c| c == "mw-headline"))
            .into_iter()
            .find_map(|h| h.value().id().map(str::to_string))
    });
    BlockKind::Heading {
        level,
        label: text::inline_text(node),
        id,
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn label_paragraph(node: ElementRef<'_>) -> Option<String> {
    let has_nested_content = node
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|e| NESTED_CONTENT_TAGS.contains(&e.value().name()));
    if has_nested_content {
        return None;
    }
    let text = text::inline_text(node);
    let label = text.strip_suffix(':')?.trim();
    if label.is_empty() || label.contains(':') || label.chars().count() > MAX_LABEL_CHARS {
        return None;
    }
    Some(label.to_string())
}

/// Case-insensitive label comparison. `Substantiv, n` matches `Substantiv`,
/// `Bedeutungen:` matches `Bedeutungen`, but `Bedeutungen` does not match `Bedeutung`.
pub fn label_matches(text: &str, label: &str) -> bool {
    let text = normalize_label(text);
    let label = normalize_label(label);
    if label.is_empty() {
        return false;
    }
    if text == label {
        return true;
    }
    text.strip_prefix(&label)
        .is_some_and(|rest| rest.starts_with([' ', ',', '(']))
}

fn normalize_label(s: &str) -> String {
    text::normalize_whitespace(s.trim().trim_end_matches(':')).to_lowercase()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn kinds(markup: &str) -> Vec<BlockKind> {
        let html = Html::parse_fragment(markup);
        classify_nodes(html.root_element())
            .into_iter()
            .map(|b| b.kind)
            .collect()
    }

    #[test]
    fn h_tag_heading() {
        let k = kinds(r#"<h4><span class="mw-headline" id="Übersetzungen">Übersetzungen</span><span class="mw-editsection">[Bearbeiten]</span></h4>"#);
        assert_eq!(
            k[0],
            BlockKind::Heading {
                level: 4,
                label: "Übersetzungen".into(),
                id: Some("Übersetzungen".into())
            }
        );
    }

    #[test]
    fn wrapped_heading() {
        let k = kinds(r#"<div class="mw-heading mw-heading3"><h3 id="Substantiv,_n">Substantiv, <i>n</i></h3></div>"#);
        assert!(matches!(&k[0], BlockKind::Heading { level: 3, label, .. } if label == "Substantiv, n"));
    }

    #[test]
    fn label_paragraph_heading() {
        let k = kinds(r#"<p title="Trennungsmöglichkeiten am Zeilenumbruch">Worttrennung:</p><dl><dd>Haus</dd></dl>"#);
        assert!(matches!(&k[0], BlockKind::Heading { level: LABEL_LEVEL, label, .. } if label == "Worttrennung"));
        assert_eq!(k[1], BlockKind::Content);
    }

    #[test]
    fn prose_is_content() {
        let k = kinds("<p>Das ist ein Satz, der mit einem Doppelpunkt endet und viel zu lang für eine Überschrift ist:</p>");
        assert_eq!(k[0], BlockKind::Content);
    }

    #[test]
    fn sections_are_transparent() {
        let k = kinds("<section><h2>Haus</h2><p>x</p></section>");
        assert_eq!(k.len(), 2);
    }

    #[test]
    fn matching() {
        assert!(label_matches("Substantiv, n", "Substantiv"));
        assert!(label_matches("Bedeutungen:", "bedeutungen"));
        assert!(label_matches("Verb (unregelmäßig)", "Verb"));
        assert!(!label_matches("Bedeutungen", "Bedeutung"));
        assert!(!label_matches("Verbformen", "Verb"));
        assert!(!label_matches("Haus", ""));
    }
}
