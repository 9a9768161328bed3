use std::sync::LazyLock;

use regex::Regex;
use scraper::node::{Element, Node};
use scraper::ElementRef;

/// Sense references like `[1]`, `[1a]`, `[1, 2]`, `[1–3]` and sub-senses `[a]`.
static SENSE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(?:\d+[a-z]?|[a-z])(?:\s*[,–-]\s*(?:\d+[a-z]?|[a-z]))*\s*\]").unwrap()
});

const SKIP_TAGS: &[&str] = &["sup", "style", "script"];
const SKIP_CLASSES: &[&str] = &["mw-editsection", "reference", "noprint"];
const LIST_TAGS: &[&str] = &["ul", "ol", "dl"];
const ITEM_TAGS: &[&str] = &["li", "dd"];
const BLOCK_TAGS: &[&str] = &["p", "div", "dd", "dt", "li", "tr", "td", "th", "table"];

pub fn is_skipped(element: &Element) -> bool {
    SKIP_TAGS.contains(&element.name())
        || element.classes().any(|c| SKIP_CLASSES.contains(&c))
}

pub fn is_list_item(element: &Element) -> bool {
    ITEM_TAGS.contains(&element.name())
}

/// Plain text of `node` with links and emphasis collapsed and whitespace normalized.
pub fn inline_text(node: ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect(node, &mut buf, true);
    normalize_whitespace(&buf)
}

/// Text of a list item without the text of lists nested inside it.
pub fn own_text(node: ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect(node, &mut buf, false);
    normalize_whitespace(&buf)
}

/// Text split at `<br>` boundaries, each line normalized, empty lines dropped.
pub fn lines(node: ElementRef<'_>) -> Vec<String> {
    let mut buf = String::new();
    collect(node, &mut buf, true);
    buf.split('\n')
        .map(normalize_whitespace)
        .filter(|l| !l.is_empty())
        .collect()
}

fn collect(node: ElementRef<'_>, out: &mut String, nested_lists: bool) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if is_skipped(element) {
                    continue;
                }
                let name = element.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if !nested_lists && LIST_TAGS.contains(&name) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    let block = BLOCK_TAGS.contains(&name);
                    if block {
                        out.push(' ');
                    }
                    collect(child_ref, out, nested_lists);
                    if block {
                        out.push(' ');
                    }
                }
            }
            _ => {}
        }
    }
}

/// Own text of every `li`/`dd` at or below `node`, in document order.
///
/// Nested lists are flattened: a sub-item follows its parent item.
pub fn list_items(node: ElementRef<'_>) -> Vec<String> {
    find_elements(node, is_list_item)
        .into_iter()
        .map(own_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// `node` and its descendants matching `pred`, in document order.
pub fn find_elements<'a>(node: ElementRef<'a>, pred: impl Fn(&Element) -> bool) -> Vec<ElementRef<'a>> {
    node.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| pred(el.value()))
        .collect()
}

pub fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

pub fn strip_sense_markers(input: &str) -> String {
    normalize_whitespace(&SENSE_MARKER_RE.replace_all(input, " "))
}

/// Split `input` on any of `separators`, trimming and dropping empty pieces.
pub fn split_phrases(input: &str, separators: &[char]) -> Vec<String> {
    input
        .split(|c| separators.contains(&c))
        .map(|p| p.trim().trim_end_matches('.').trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(html: &'a Html, sel: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(sel).unwrap()).next().unwrap()
    }

    #[test]
    fn collapses_links_and_drops_footnotes() {
        let html = Html::parse_fragment(
            r#"<dd>[1] ein <a href="/wiki/Geb%C3%A4ude">Gebäude</a>, <i>das</i>  dem Wohnen dient<sup class="reference">[3]</sup></dd>"#,
        );
        assert_eq!(inline_text(first(&html, "dd")), "[1] ein Gebäude, das dem Wohnen dient");
    }

    #[test]
    fn own_text_skips_nested_list() {
        let html = Html::parse_fragment("<dl><dd>[1] Oberbegriff<dl><dd>[1a] Unterbegriff</dd></dl></dd></dl>");
        assert_eq!(own_text(first(&html, "dd")), "[1] Oberbegriff");
    }

    #[test]
    fn list_items_flatten_in_order() {
        let html = Html::parse_fragment(
            "<dl><dd>[1] eins<dl><dd>[1a] eins-a</dd></dl></dd><dd>[2] zwei</dd><dd> </dd></dl>",
        );
        let items = list_items(first(&html, "dl"));
        assert_eq!(items, vec!["[1] eins", "[1a] eins-a", "[2] zwei"]);
    }

    #[test]
    fn br_splits_lines() {
        let html = Html::parse_fragment("<table><tr><td>geh!<br/>gehe!</td></tr></table>");
        assert_eq!(lines(first(&html, "td")), vec!["geh!", "gehe!"]);
    }

    #[test]
    fn sense_markers() {
        assert_eq!(strip_sense_markers("[1] Bau, [2a] Hütte"), "Bau, Hütte");
        assert_eq!(strip_sense_markers("[1, 2] Heim; [1–3] Obdach"), "Heim; Obdach");
        assert_eq!(strip_sense_markers("[a] Wohnhaus, [b–c] Bürohaus"), "Wohnhaus, Bürohaus");
        assert_eq!(strip_sense_markers("kein Marker [xy] [Zitat]"), "kein Marker [xy] [Zitat]");
    }

    #[test]
    fn phrases() {
        assert_eq!(
            split_phrases("Gebäude, Bau; Heim.", &[',', ';']),
            vec!["Gebäude", "Bau", "Heim"]
        );
        assert!(split_phrases(" ; , ", &[',', ';']).is_empty());
    }
}
