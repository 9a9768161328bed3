use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

pub type Hyphenation = Vec<String>;
pub type Pronunciation = IndexSet<String>;
pub type Translations = IndexMap<String, Vec<String>>;
/// Form label (e.g. `Nominativ_Singular`, `Präsens_ich`) to inflected form.
pub type Inflection = IndexMap<String, String>;

/// The normalized lexical record for one page. Absent sections are omitted
/// from the JSON form rather than emitted as null or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalEntry {
    #[serde(rename = "pageid")]
    pub page_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyphenation: Option<Hyphenation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<Pronunciation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idioms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_combinations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Translations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflection: Option<Inflection>,
}

impl LexicalEntry {
    pub fn new(page_id: u64, title: impl Into<String>) -> Self {
        Self {
            page_id,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add secondary-page forms. Keys already present are kept as they are.
    pub fn merge_inflection(&mut self, secondary: Inflection) {
        if secondary.is_empty() {
            return;
        }
        match &mut self.inflection {
            Some(primary) => {
                for (key, form) in secondary {
                    primary.entry(key).or_insert(form);
                }
            }
            None => self.inflection = Some(secondary),
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(pairs: &[(&str, &str)]) -> Inflection {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_sections_are_omitted() {
        let mut entry = LexicalEntry::new(12345, "Haus");
        entry.synonyms = Some(vec!["Gebäude".into(), "Bau".into()]);
        let json = serde_json::to_value(&entry).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["pageid"], 12345);
        assert_eq!(obj["title"], "Haus");
        assert_eq!(obj["synonyms"], serde_json::json!(["Gebäude", "Bau"]));
        assert!(!obj.contains_key("antonyms"));
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn camel_case_keys() {
        let mut entry = LexicalEntry::new(1, "x");
        entry.word_combinations = Some(vec!["ein Haus bauen".into()]);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("wordCombinations").is_some());
    }

    #[test]
    fn merge_disjoint_is_union() {
        let mut entry = LexicalEntry::new(1, "gehen");
        entry.inflection = Some(forms(&[("Präsens_ich", "gehe")]));
        entry.merge_inflection(forms(&[("Präsens_du", "gehst")]));
        assert_eq!(
            entry.inflection.unwrap(),
            forms(&[("Präsens_ich", "gehe"), ("Präsens_du", "gehst")])
        );
    }

    #[test]
    fn merge_keeps_primary_on_conflict() {
        let mut entry = LexicalEntry::new(1, "gehen");
        entry.inflection = Some(forms(&[("Präsens_ich", "gehe")]));
        entry.merge_inflection(forms(&[("Präsens_ich", "geh"), ("Präsens_du", "gehst")]));
        let merged = entry.inflection.unwrap();
        assert_eq!(merged["Präsens_ich"], "gehe");
        assert_eq!(merged["Präsens_du"], "gehst");
    }

    #[test]
    fn merge_into_absent_takes_secondary() {
        let mut entry = LexicalEntry::new(1, "gehen");
        entry.merge_inflection(forms(&[("Präsens_du", "gehst")]));
        assert_eq!(entry.inflection.unwrap().len(), 1);

        let mut empty = LexicalEntry::new(1, "gehen");
        empty.merge_inflection(Inflection::new());
        assert!(empty.inflection.is_none());
    }
}
