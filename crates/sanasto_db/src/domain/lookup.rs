//! Reads words back out of the flat dictionary.

use crate::utils::database;
use diesel::prelude::*;
use sanasto_core::{Case, Declension, Noun, PartOfSpeech, Person, Verb, WordData, MISSING_FORM};
use std::{collections::BTreeMap, path::Path};

/// Looks up a word in the dictionary database at `db_path`.
///
/// A missing database, a database without the dictionary tables and an unknown word all
/// result in `None`. The lookup is an exact match, callers are expected to lower-case the word.
pub fn lookup(db_path: &Path, word: &str) -> eyre::Result<Option<WordData>> {
    if !db_path.is_file() {
        tracing::warn!("Dictionary database not found at '{}'", db_path.display());
        return Ok(None);
    }
    let mut conn = database::establish(db_path)?;
    lookup_word(&mut conn, word)
}

pub fn lookup_word(conn: &mut SqliteConnection, word: &str) -> eyre::Result<Option<WordData>> {
    use crate::schema::words as w;

    if !database::table_exists(conn, "words")? {
        tracing::warn!("Dictionary database has no words table");
        return Ok(None);
    }
    let row = w::table
        .filter(w::word.eq(word))
        .order(w::id)
        .select((w::id, w::word, w::pos))
        .first::<(i32, String, String)>(conn)
        .optional()?;
    let Some((word_id, word, pos)) = row else {
        tracing::warn!("Word '{word}' not found in the dictionary");
        return Ok(None);
    };

    let data = match pos.parse::<PartOfSpeech>()? {
        PartOfSpeech::Verb => WordData::Verb(load_verb(conn, word_id, word)?),
        PartOfSpeech::Noun => WordData::Noun(load_noun(conn, word_id, word)?),
    };
    Ok(Some(data))
}

fn load_verb(conn: &mut SqliteConnection, word_id: i32, infinitive: String) -> eyre::Result<Verb> {
    use crate::schema::verb_conjugations as vc;

    let rows = vc::table
        .filter(vc::word_id.eq(word_id))
        .select((vc::person, vc::form))
        .load::<(String, String)>(conn)?;
    let mut conjugations = BTreeMap::new();
    for (person, form) in rows {
        conjugations.insert(person.parse::<Person>()?, form);
    }
    Ok(Verb {
        infinitive,
        // not stored in the flat schema
        verb_type: Verb::UNKNOWN_TYPE,
        conjugations,
    })
}

fn load_noun(conn: &mut SqliteConnection, word_id: i32, word: String) -> eyre::Result<Noun> {
    use crate::schema::noun_declensions as nd;

    let rows = nd::table
        .filter(nd::word_id.eq(word_id))
        .select((nd::case_name, nd::singular, nd::plural))
        .load::<(String, Option<String>, Option<String>)>(conn)?;
    let mut declensions = BTreeMap::new();
    for (case_name, singular, plural) in rows {
        let declension = Declension {
            singular: singular.unwrap_or_else(|| MISSING_FORM.to_string()),
            plural: plural.unwrap_or_else(|| MISSING_FORM.to_string()),
        };
        declensions.insert(case_name.parse::<Case>()?, declension);
    }
    Ok(Noun { word, declensions })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::flat;
    use kaikki::Records;

    fn populated() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        database::enable_foreign_keys(&mut conn).unwrap();
        let jsonl = r#"
{"word": "olla", "pos": "verb", "lang_code": "fi", "forms": [{"form": "olen", "tags": ["first-person", "singular", "present", "indicative"]}, {"form": "ovat", "tags": ["third-person", "plural", "present", "indicative"]}]}
{"word": "kala", "pos": "noun", "lang_code": "fi", "forms": [{"form": "kalan", "tags": ["genitive", "singular"]}, {"form": "kaloja", "tags": ["partitive", "plural"]}]}
"#;
        flat::import_records(&mut conn, Records::new(jsonl.as_bytes()), "fi").unwrap();
        conn
    }

    #[test]
    fn reconstructs_verb() {
        let mut conn = populated();
        let Some(WordData::Verb(verb)) = lookup_word(&mut conn, "olla").unwrap() else {
            panic!("expected a verb");
        };
        assert_eq!(verb.infinitive, "olla");
        assert_eq!(verb.verb_type, 0);
        assert_eq!(
            verb.conjugations,
            BTreeMap::from([
                (Person::FirstSingular, "olen".to_string()),
                (Person::ThirdPlural, "ovat".to_string()),
            ])
        );
    }

    #[test]
    fn reconstructs_noun_with_placeholders() {
        let mut conn = populated();
        let Some(WordData::Noun(noun)) = lookup_word(&mut conn, "kala").unwrap() else {
            panic!("expected a noun");
        };
        assert_eq!(noun.word, "kala");
        assert_eq!(
            noun.declensions[&Case::Genitive],
            Declension {
                singular: "kalan".to_string(),
                plural: "-".to_string()
            }
        );
        assert_eq!(noun.declensions[&Case::Partitive].singular, "-");
        assert_eq!(noun.declensions[&Case::Partitive].plural, "kaloja");
    }

    #[test]
    fn misses_are_none() {
        let mut conn = populated();
        assert_eq!(lookup_word(&mut conn, "Kala").unwrap(), None);
        assert_eq!(lookup_word(&mut conn, "epäolemassaoleva").unwrap(), None);
    }

    #[test]
    fn absent_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        assert_eq!(lookup(&path, "epäolemassaoleva").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn empty_store_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        std::fs::File::create(&path).unwrap();
        assert_eq!(lookup(&path, "epäolemassaoleva").unwrap(), None);

        let mut conn = database::establish(&path).unwrap();
        flat::init_schema(&mut conn).unwrap();
        drop(conn);
        assert_eq!(lookup(&path, "epäolemassaoleva").unwrap(), None);
    }
}
