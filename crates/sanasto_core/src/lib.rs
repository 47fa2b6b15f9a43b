//! sanasto core types.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Placeholder used when one side of a declension is unknown.
pub const MISSING_FORM: &str = "-";

#[derive(Debug, thiserror::Error)]
#[error("Unrecognised {kind} '{value}'")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

/// The parts of speech sanasto stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
}

impl PartOfSpeech {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noun" => Ok(Self::Noun),
            "verb" => Ok(Self::Verb),
            other => Err(ParseError {
                kind: "part of speech",
                value: other.to_string(),
            }),
        }
    }
}

/// A grammatical person, represented by its Finnish personal pronoun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "minä")]
    FirstSingular,
    #[serde(rename = "sinä")]
    SecondSingular,
    #[serde(rename = "hän")]
    ThirdSingular,
    #[serde(rename = "me")]
    FirstPlural,
    #[serde(rename = "te")]
    SecondPlural,
    #[serde(rename = "he")]
    ThirdPlural,
}

impl Person {
    pub const ALL: [Self; 6] = [
        Self::FirstSingular,
        Self::SecondSingular,
        Self::ThirdSingular,
        Self::FirstPlural,
        Self::SecondPlural,
        Self::ThirdPlural,
    ];

    pub fn pronoun(self) -> &'static str {
        match self {
            Self::FirstSingular => "minä",
            Self::SecondSingular => "sinä",
            Self::ThirdSingular => "hän",
            Self::FirstPlural => "me",
            Self::SecondPlural => "te",
            Self::ThirdPlural => "he",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pronoun())
    }
}

impl FromStr for Person {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.pronoun() == s)
            .ok_or_else(|| ParseError {
                kind: "person",
                value: s.to_string(),
            })
    }
}

/// The Finnish grammatical cases, declared in their canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nominative,
    Genitive,
    Partitive,
    Inessive,
    Elative,
    Illative,
    Adessive,
    Ablative,
    Allative,
    Essive,
    Translative,
    Instructive,
    Abessive,
    Comitative,
}

impl Case {
    pub const ALL: [Self; 14] = [
        Self::Nominative,
        Self::Genitive,
        Self::Partitive,
        Self::Inessive,
        Self::Elative,
        Self::Illative,
        Self::Adessive,
        Self::Ablative,
        Self::Allative,
        Self::Essive,
        Self::Translative,
        Self::Instructive,
        Self::Abessive,
        Self::Comitative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Nominative => "nominative",
            Self::Genitive => "genitive",
            Self::Partitive => "partitive",
            Self::Inessive => "inessive",
            Self::Elative => "elative",
            Self::Illative => "illative",
            Self::Adessive => "adessive",
            Self::Ablative => "ablative",
            Self::Allative => "allative",
            Self::Essive => "essive",
            Self::Translative => "translative",
            Self::Instructive => "instructive",
            Self::Abessive => "abessive",
            Self::Comitative => "comitative",
        }
    }

    /// Finds the first case, in canonical order, whose name occurs in the text.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| text.contains(c.name()))
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Case {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseError {
                kind: "case",
                value: s.to_string(),
            })
    }
}

/// A verb with its present indicative conjugations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    pub infinitive: String,
    /// The Kotus conjugation type, 0 when unknown.
    pub verb_type: u32,
    pub conjugations: BTreeMap<Person, String>,
}

impl Verb {
    pub const UNKNOWN_TYPE: u32 = 0;

    pub fn is_complete(&self) -> bool {
        Person::ALL
            .iter()
            .all(|p| self.conjugations.contains_key(p))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declension {
    pub singular: String,
    pub plural: String,
}

/// A noun with its declensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noun {
    pub word: String,
    pub declensions: BTreeMap<Case, Declension>,
}

/// Inflection data for a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WordData {
    Verb(Verb),
    Noun(Noun),
}

impl WordData {
    /// The dictionary form of the word.
    pub fn word(&self) -> &str {
        match self {
            Self::Verb(verb) => &verb.infinitive,
            Self::Noun(noun) => &noun.word,
        }
    }

    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            Self::Verb(_) => PartOfSpeech::Verb,
            Self::Noun(_) => PartOfSpeech::Noun,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_first_case_in_canonical_order() {
        assert_eq!(Case::find_in("nominative plural"), Some(Case::Nominative));
        // both "essive" and "inessive" occur, inessive comes first
        assert_eq!(Case::find_in("inessive"), Some(Case::Inessive));
        assert_eq!(Case::find_in("essive"), Some(Case::Essive));
        assert_eq!(Case::find_in("possessive"), Some(Case::Essive));
        assert_eq!(Case::find_in("vocative"), None);
    }

    #[test]
    fn parses_names() {
        assert_eq!("verb".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Verb);
        assert!("adj".parse::<PartOfSpeech>().is_err());
        assert_eq!("hän".parse::<Person>().unwrap(), Person::ThirdSingular);
        assert_eq!("abessive".parse::<Case>().unwrap(), Case::Abessive);
        assert!("Abessive".parse::<Case>().is_err());
    }

    #[test]
    fn serializes_with_kind() {
        let verb = WordData::Verb(Verb {
            infinitive: "sanoa".to_string(),
            verb_type: 52,
            conjugations: Person::ALL
                .into_iter()
                .map(|p| (p, format!("{p}-form")))
                .collect(),
        });
        let json = serde_json::to_value(&verb).unwrap();
        assert_eq!(json["kind"], "verb");
        assert_eq!(json["verbType"], 52);
        assert_eq!(json["conjugations"]["minä"], "minä-form");

        let noun = WordData::Noun(Noun {
            word: "talo".to_string(),
            declensions: [(
                Case::Genitive,
                Declension {
                    singular: "talon".to_string(),
                    plural: "talojen".to_string(),
                },
            )]
            .into_iter()
            .collect(),
        });
        let json = serde_json::to_value(&noun).unwrap();
        assert_eq!(json["kind"], "noun");
        assert_eq!(json["declensions"]["genitive"]["plural"], "talojen");
    }

    #[test]
    fn checks_completeness() {
        let mut verb = Verb {
            infinitive: "olla".to_string(),
            verb_type: Verb::UNKNOWN_TYPE,
            conjugations: BTreeMap::new(),
        };
        for person in &Person::ALL[..5] {
            verb.conjugations.insert(*person, "x".to_string());
        }
        assert!(!verb.is_complete());
        verb.conjugations.insert(Person::ThirdPlural, "ovat".to_string());
        assert!(verb.is_complete());
    }
}
