//! Models a single record of the kaikki.org extract.
//! See <https://kaikki.org/dictionary/rawdata.html>
//!
//! Only the fields sanasto uses are modelled, everything else is ignored.
//! Fields whose shape varies between records are kept as raw JSON values.

use sanasto_core::PartOfSpeech;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys that may hold the display text of a structured term, in order of preference.
pub const TERM_KEYS: [&str; 5] = ["word", "term", "text", "english", "translation"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub word: Option<String>,
    pub pos: Option<String>,
    pub lang_code: Option<String>,
    pub etymology_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senses: Vec<Sense>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forms: Vec<Form>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub derived: Vec<Term>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related: Vec<Term>,
}

impl Record {
    /// The headword, if present and non-empty.
    pub fn lemma(&self) -> Option<&str> {
        self.word.as_deref().filter(|w| !w.is_empty())
    }

    /// The part of speech, if it is one sanasto stores.
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        self.pos.as_deref().and_then(|pos| pos.parse().ok())
    }

    /// The first gloss of the first sense that has any.
    pub fn primary_translation(&self) -> Option<&str> {
        self.senses.iter().find_map(Sense::gloss)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sense {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub glosses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_glosses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_of: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub derived: Vec<Term>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related: Vec<Term>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonyms: Vec<Term>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub antonyms: Vec<Term>,
}

impl Sense {
    /// The first gloss, falling back to the first raw gloss.
    pub fn gloss(&self) -> Option<&str> {
        self.glosses
            .first()
            .or_else(|| self.raw_glosses.first())
            .map(String::as_str)
    }
}

/// An inflected or alternative form of the headword.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Form {
    pub form: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub source: Option<String>,
}

/// A derived term, related term, synonym or antonym.
///
/// The extract uses both plain strings and objects for these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Plain(String),
    Structured(Map<String, Value>),
    Other(Value),
}

impl Term {
    /// The term's display text, trimmed.
    pub fn display(&self) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text.trim()).filter(|t| !t.is_empty()),
            Self::Structured(map) => TERM_KEYS.iter().find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
            }),
            Self::Other(_) => None,
        }
    }

    /// Every key of a structured term except the display text keys and the excluded ones.
    pub fn metadata(&self, exclude: &[&str]) -> Map<String, Value> {
        match self {
            Self::Structured(map) => map
                .iter()
                .filter(|(k, _)| !TERM_KEYS.contains(&k.as_str()) && !exclude.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            Self::Plain(_) | Self::Other(_) => Map::new(),
        }
    }

    /// The term's `tags` value, if it has one.
    pub fn tags(&self) -> Option<&Value> {
        match self {
            Self::Structured(map) => map.get("tags"),
            Self::Plain(_) | Self::Other(_) => None,
        }
    }
}

// the extract occasionally contains explicit nulls for list fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_record() {
        let record: Record = serde_json::from_value(json!({
            "word": "talo",
            "pos": "noun",
            "lang_code": "fi",
            "head_templates": [{"name": "fi-noun"}],
            "senses": [
                {"raw_glosses": ["(raw) house"]},
                {"id": "en-talo-fi-noun-1", "glosses": ["house"], "tags": null}
            ],
            "forms": [{"form": "talon", "tags": ["genitive", "singular"]}],
            "derived": ["talous", {"word": "talollinen", "tags": ["adjective"]}],
            "related": null
        }))
        .unwrap();
        assert_eq!(record.lemma(), Some("talo"));
        assert_eq!(record.part_of_speech(), Some(PartOfSpeech::Noun));
        assert_eq!(record.primary_translation(), Some("(raw) house"));
        assert_eq!(record.senses[1].tags.len(), 0);
        assert_eq!(record.forms[0].tags, ["genitive", "singular"]);
        assert_eq!(record.derived.len(), 2);
        assert!(record.related.is_empty());
    }

    #[test]
    fn ignores_other_parts_of_speech() {
        let record: Record =
            serde_json::from_value(json!({"word": "nopea", "pos": "adj"})).unwrap();
        assert_eq!(record.part_of_speech(), None);
        let record: Record = serde_json::from_value(json!({"word": "", "pos": "verb"})).unwrap();
        assert_eq!(record.lemma(), None);
    }

    #[test]
    fn prefers_glosses_over_raw_glosses() {
        let sense: Sense = serde_json::from_value(json!({
            "glosses": ["to say"],
            "raw_glosses": ["(transitive) to say"]
        }))
        .unwrap();
        assert_eq!(sense.gloss(), Some("to say"));
        let sense: Sense = serde_json::from_value(json!({"glosses": []})).unwrap();
        assert_eq!(sense.gloss(), None);
    }

    #[test]
    fn picks_display_term_by_key_preference() {
        let term: Term = serde_json::from_value(json!({
            "english": "homestead",
            "word": " talonpoika ",
            "sense": "peasant"
        }))
        .unwrap();
        assert_eq!(term.display(), Some("talonpoika"));
        let metadata = term.metadata(&[]);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata["sense"], "peasant");

        let term: Term = serde_json::from_value(json!({"word": "  ", "text": "kota"})).unwrap();
        assert_eq!(term.display(), Some("kota"));

        let term: Term = serde_json::from_value(json!({"tags": ["rare"]})).unwrap();
        assert_eq!(term.display(), None);
        assert_eq!(term.tags(), Some(&json!(["rare"])));
        assert!(term.metadata(&["tags"]).is_empty());

        let term: Term = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(term, Term::Other(json!(3)));
        assert_eq!(term.display(), None);

        let term: Term = serde_json::from_value(json!("  ")).unwrap();
        assert_eq!(term.display(), None);
    }
}
