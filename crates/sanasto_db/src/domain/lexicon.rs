//! The normalized lexicon: every noun and verb entry of the extract with its senses, forms and
//! related terms.
//!
//! Nested lists that have no table of their own are stored as JSON text. Empty lists and other
//! empty values are stored as NULL.

use super::ImportSummary;
use crate::{eq, query, utils::diesel::SqliteChunks};
use diesel::{connection::SimpleConnection, prelude::*};
use eyre::WrapErr;
use kaikki::{Form, Record, Records, Sense, Term};
use sanasto_core::PartOfSpeech;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::{io::BufRead, path::Path};

const SCHEMA: &str = include_str!("../../sql/lexicon.sql");

/// Drops and recreates the lexicon tables.
pub fn init_schema(conn: &mut SqliteConnection) -> eyre::Result<()> {
    tracing::info!("Recreating lexicon tables");
    conn.batch_execute(SCHEMA)
        .wrap_err("Failed to create lexicon tables")
}

/// Replaces the lexicon with the noun and verb entries of the extract at `source`.
///
/// At most `limit` records are read, whether or not they are inserted.
pub fn import_lexicon(
    conn: &mut SqliteConnection,
    source: &Path,
    limit: Option<usize>,
) -> eyre::Result<ImportSummary> {
    tracing::info!("Opening {}", source.display());
    let records = Records::open(source)
        .wrap_err_with(|| format!("Failed to open file at '{}'", source.display()))?;
    import_records(conn, records, limit)
}

/// Replaces the lexicon with the noun and verb entries read from `records`.
///
/// The records are inserted in a single transaction, a malformed line rolls back the whole import.
pub fn import_records<R: BufRead>(
    conn: &mut SqliteConnection,
    mut records: Records<R>,
    limit: Option<usize>,
) -> eyre::Result<ImportSummary> {
    init_schema(conn)?;
    let summary = conn.transaction(|conn| {
        tracing::info!("Starting transaction");
        let mut summary = ImportSummary::default();
        while limit.map_or(true, |limit| summary.processed < limit) {
            let Some(record) = records.next() else {
                break;
            };
            let raw = record?;
            summary.processed += 1;
            let (Some(word), Some(pos)) = (raw.lemma(), raw.part_of_speech()) else {
                continue;
            };
            let word = word.to_string();
            let line = raw.line();
            let record = raw.into_record()?;
            insert_entry(conn, &record, &word, pos)
                .wrap_err_with(|| format!("Failed to insert entry '{word}' from line {line}"))?;
            summary.inserted += 1;
            if summary.inserted % 10_000 == 0 {
                tracing::debug!("Inserted {} entries", summary.inserted);
            }
        }
        eyre::Ok(summary)
    })?;
    tracing::info!(
        "Finished transaction, inserted {} of {} records",
        summary.inserted,
        summary.processed
    );
    Ok(summary)
}

fn insert_entry(
    conn: &mut SqliteConnection,
    record: &Record,
    word: &str,
    pos: PartOfSpeech,
) -> eyre::Result<i32> {
    use crate::schema::entries as e;

    let pos = pos.as_str();
    let primary_translation = record.primary_translation();
    let etymology = record.etymology_text.as_deref();
    let entry_id = diesel::insert_into(e::table)
        .values(eq!(e, word, pos, primary_translation, etymology))
        .returning(e::id)
        .get_result::<i32>(conn)?;

    for sense in &record.senses {
        insert_sense(conn, entry_id, sense)?;
    }
    insert_forms(conn, entry_id, &record.forms)?;
    insert_derived_terms(conn, entry_id, None, &record.derived)?;
    insert_related_terms(conn, entry_id, None, &record.related)?;
    Ok(entry_id)
}

// synonyms and antonyms share a layout
macro_rules! insert_sense_terms {
    ($conn:expr, $table:ident, $sense_id:expr, $terms:expr) => {{
        use crate::schema::$table as t;

        let rows = term_rows($terms, true)?
            .into_iter()
            .map(|row| {
                (
                    t::sense_id.eq($sense_id),
                    t::term.eq(row.term),
                    t::tags_json.eq(row.tags_json),
                    t::extra_json.eq(row.extra_json),
                )
            })
            .collect::<Vec<_>>();
        for chunk in rows.sqlite_chunks() {
            diesel::insert_into(t::table).values(chunk).execute($conn)?;
        }
    }};
}

fn insert_sense(conn: &mut SqliteConnection, entry_id: i32, sense: &Sense) -> eyre::Result<()> {
    use crate::schema::senses as s;

    let sense_identifier = sense.id.as_deref();
    let gloss = sense.gloss();
    let sense_id = diesel::insert_into(s::table)
        .values((
            s::entry_id.eq(entry_id),
            s::sense_identifier.eq(sense_identifier),
            s::gloss.eq(gloss),
            s::glosses_json.eq(json_list(&sense.glosses)?),
            s::raw_glosses_json.eq(json_list(&sense.raw_glosses)?),
            s::tags_json.eq(json_list(&sense.tags)?),
            s::topics_json.eq(json_list(&sense.topics)?),
            s::links_json.eq(json_list(&sense.links)?),
            s::categories_json.eq(json_list(&sense.categories)?),
            s::examples_json.eq(json_list(&sense.examples)?),
            s::form_of_json.eq(json_list(&sense.form_of)?),
        ))
        .returning(s::id)
        .get_result::<i32>(conn)?;

    insert_sense_terms!(conn, synonyms, sense_id, &sense.synonyms);
    insert_sense_terms!(conn, antonyms, sense_id, &sense.antonyms);
    insert_derived_terms(conn, entry_id, sense_identifier, &sense.derived)?;
    insert_related_terms(conn, entry_id, sense_identifier, &sense.related)?;
    Ok(())
}

fn insert_forms(conn: &mut SqliteConnection, entry_id: i32, forms: &[Form]) -> eyre::Result<()> {
    use crate::schema::forms as f;

    let mut rows = Vec::new();
    for form in forms {
        let Some(text) = form.form.as_deref().filter(|text| !text.is_empty()) else {
            continue;
        };
        rows.push((
            f::entry_id.eq(entry_id),
            f::form.eq(text),
            f::tags_json.eq(json_list(&form.tags)?),
            f::source.eq(form.source.as_deref()),
        ));
    }
    for chunk in rows.sqlite_chunks() {
        diesel::insert_into(f::table).values(chunk).execute(conn)?;
    }
    Ok(())
}

fn insert_derived_terms(
    conn: &mut SqliteConnection,
    entry_id: i32,
    source_sense_identifier: Option<&str>,
    terms: &[Term],
) -> eyre::Result<()> {
    use crate::schema::derived_terms as dt;

    let rows = term_rows(terms, false)?
        .into_iter()
        .map(|row| {
            (
                dt::entry_id.eq(entry_id),
                dt::term.eq(row.term),
                dt::source_sense_identifier.eq(source_sense_identifier),
                dt::extra_json.eq(row.extra_json),
            )
        })
        .collect::<Vec<_>>();
    for chunk in rows.sqlite_chunks() {
        diesel::insert_into(dt::table).values(chunk).execute(conn)?;
    }
    Ok(())
}

fn insert_related_terms(
    conn: &mut SqliteConnection,
    entry_id: i32,
    source_sense_identifier: Option<&str>,
    terms: &[Term],
) -> eyre::Result<()> {
    use crate::schema::related_terms as rt;

    let rows = term_rows(terms, true)?
        .into_iter()
        .map(|row| {
            (
                rt::entry_id.eq(entry_id),
                rt::term.eq(row.term),
                rt::source_sense_identifier.eq(source_sense_identifier),
                rt::tags_json.eq(row.tags_json),
                rt::extra_json.eq(row.extra_json),
            )
        })
        .collect::<Vec<_>>();
    for chunk in rows.sqlite_chunks() {
        diesel::insert_into(rt::table).values(chunk).execute(conn)?;
    }
    Ok(())
}


struct TermRow<'a> {
    term: &'a str,
    tags_json: Option<String>,
    extra_json: Option<String>,
}

// terms without a usable display string are dropped
fn term_rows(terms: &[Term], separate_tags: bool) -> eyre::Result<Vec<TermRow<'_>>> {
    let exclude: &[&str] = if separate_tags { &["tags"] } else { &[] };
    let mut rows = Vec::new();
    for term in terms {
        let Some(display) = term.display() else {
            continue;
        };
        let tags_json = if separate_tags {
            json_value(term.tags())?
        } else {
            None
        };
        rows.push(TermRow {
            term: display,
            tags_json,
            extra_json: json_value(Some(&Value::Object(term.metadata(exclude))))?,
        });
    }
    Ok(rows)
}

fn json_list<T: Serialize>(items: &[T]) -> eyre::Result<Option<String>> {
    if items.is_empty() {
        return Ok(None);
    }
    let json = serde_json::to_string(items).wrap_err("Failed to serialize list")?;
    Ok(Some(json))
}

fn json_value(value: Option<&Value>) -> eyre::Result<Option<String>> {
    match value {
        Some(value) if !is_empty_value(value) => {
            let json = serde_json::to_string(value).wrap_err("Failed to serialize value")?;
            Ok(Some(json))
        }
        _ => Ok(None),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn decode<T: DeserializeOwned + Default>(json: Option<String>) -> eyre::Result<T> {
    match json {
        Some(json) => serde_json::from_str(&json)
            .wrap_err_with(|| format!("Invalid JSON in database: {json}")),
        None => Ok(T::default()),
    }
}

/// An entry read back from the lexicon with all of its child rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconEntry {
    pub id: i32,
    pub word: String,
    pub pos: PartOfSpeech,
    pub primary_translation: Option<String>,
    pub etymology: Option<String>,
    pub senses: Vec<LexiconSense>,
    pub forms: Vec<LexiconForm>,
    pub derived_terms: Vec<LinkedTerm>,
    pub related_terms: Vec<LinkedTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconSense {
    pub sense_identifier: Option<String>,
    pub gloss: Option<String>,
    pub glosses: Vec<String>,
    pub raw_glosses: Vec<String>,
    pub tags: Vec<String>,
    pub topics: Vec<String>,
    pub links: Vec<Value>,
    pub categories: Vec<Value>,
    pub examples: Vec<Value>,
    pub form_of: Vec<Value>,
    pub synonyms: Vec<LinkedTerm>,
    pub antonyms: Vec<LinkedTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconForm {
    pub form: String,
    pub tags: Vec<String>,
    pub source: Option<String>,
}

/// A derived, related, synonym or antonym term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedTerm {
    pub term: String,
    /// Set when the term was listed under a sense rather than the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sense_identifier: Option<String>,
    pub tags: Option<Value>,
    pub extra: Option<Map<String, Value>>,
}

query! {
    struct EntryRow {
        id: i32 = entries::id,
        word: String = entries::word,
        pos: String = entries::pos,
        primary_translation: Option<String> = entries::primary_translation,
        etymology: Option<String> = entries::etymology,
    }
}

query! {
    struct SenseRow {
        id: i32 = senses::id,
        sense_identifier: Option<String> = senses::sense_identifier,
        gloss: Option<String> = senses::gloss,
        glosses_json: Option<String> = senses::glosses_json,
        raw_glosses_json: Option<String> = senses::raw_glosses_json,
        tags_json: Option<String> = senses::tags_json,
        topics_json: Option<String> = senses::topics_json,
        links_json: Option<String> = senses::links_json,
        categories_json: Option<String> = senses::categories_json,
        examples_json: Option<String> = senses::examples_json,
        form_of_json: Option<String> = senses::form_of_json,
    }
}

type TermTuple = (String, Option<String>, Option<String>, Option<String>);

/// Reads every entry with the exact headword, in insertion order.
pub fn entries_by_word(conn: &mut SqliteConnection, word: &str) -> eyre::Result<Vec<LexiconEntry>> {
    use crate::schema::entries as e;

    let rows = e::table
        .filter(e::word.eq(word))
        .order(e::id)
        .select(EntryRow::as_select())
        .load::<EntryRow>(conn)
        .wrap_err_with(|| format!("Failed to load entries for '{word}'"))?;
    rows.into_iter().map(|row| load_entry(conn, row)).collect()
}

fn load_entry(conn: &mut SqliteConnection, row: EntryRow) -> eyre::Result<LexiconEntry> {
    use crate::schema::{derived_terms as dt, forms as f, related_terms as rt, senses as s};

    let pos = row.pos.parse::<PartOfSpeech>()?;
    let senses = s::table
        .filter(s::entry_id.eq(row.id))
        .order(s::id)
        .select(SenseRow::as_select())
        .load::<SenseRow>(conn)?
        .into_iter()
        .map(|sense| load_sense(conn, sense))
        .collect::<eyre::Result<Vec<_>>>()?;
    let forms = f::table
        .filter(f::entry_id.eq(row.id))
        .order(f::id)
        .select((f::form, f::tags_json, f::source))
        .load::<(String, Option<String>, Option<String>)>(conn)?
        .into_iter()
        .map(|(form, tags_json, source)| {
            Ok(LexiconForm {
                form,
                tags: decode(tags_json)?,
                source,
            })
        })
        .collect::<eyre::Result<Vec<_>>>()?;
    let derived_terms = dt::table
        .filter(dt::entry_id.eq(row.id))
        .order(dt::id)
        .select((dt::term, dt::source_sense_identifier, dt::extra_json))
        .load::<(String, Option<String>, Option<String>)>(conn)?
        .into_iter()
        .map(|(term, source_sense_identifier, extra_json)| {
            (term, source_sense_identifier, None, extra_json)
        })
        .collect::<Vec<TermTuple>>();
    let related_terms = rt::table
        .filter(rt::entry_id.eq(row.id))
        .order(rt::id)
        .select((
            rt::term,
            rt::source_sense_identifier,
            rt::tags_json,
            rt::extra_json,
        ))
        .load::<TermTuple>(conn)?;

    Ok(LexiconEntry {
        id: row.id,
        word: row.word,
        pos,
        primary_translation: row.primary_translation,
        etymology: row.etymology,
        senses,
        forms,
        derived_terms: linked_terms(derived_terms)?,
        related_terms: linked_terms(related_terms)?,
    })
}

fn load_sense(conn: &mut SqliteConnection, row: SenseRow) -> eyre::Result<LexiconSense> {
    use crate::schema::{antonyms as a, synonyms as sy};

    let synonyms = sy::table
        .filter(sy::sense_id.eq(row.id))
        .order(sy::id)
        .select((sy::term, sy::tags_json, sy::extra_json))
        .load::<(String, Option<String>, Option<String>)>(conn)?;
    let antonyms = a::table
        .filter(a::sense_id.eq(row.id))
        .order(a::id)
        .select((a::term, a::tags_json, a::extra_json))
        .load::<(String, Option<String>, Option<String>)>(conn)?;
    let sense_terms = |terms: Vec<(String, Option<String>, Option<String>)>| {
        linked_terms(
            terms
                .into_iter()
                .map(|(term, tags, extra)| (term, None, tags, extra))
                .collect(),
        )
    };

    Ok(LexiconSense {
        sense_identifier: row.sense_identifier,
        gloss: row.gloss,
        glosses: decode(row.glosses_json)?,
        raw_glosses: decode(row.raw_glosses_json)?,
        tags: decode(row.tags_json)?,
        topics: decode(row.topics_json)?,
        links: decode(row.links_json)?,
        categories: decode(row.categories_json)?,
        examples: decode(row.examples_json)?,
        form_of: decode(row.form_of_json)?,
        synonyms: sense_terms(synonyms)?,
        antonyms: sense_terms(antonyms)?,
    })
}

fn linked_terms(rows: Vec<TermTuple>) -> eyre::Result<Vec<LinkedTerm>> {
    rows.into_iter()
        .map(|(term, source_sense_identifier, tags_json, extra_json)| {
            Ok(LinkedTerm {
                term,
                source_sense_identifier,
                tags: decode(tags_json)?,
                extra: decode(extra_json)?,
            })
        })
        .collect()
}
