//! The flat lookup schema: one `words` row per headword with its present tense conjugations or
//! its case declensions.

use super::ImportSummary;
use crate::{eq, utils::diesel::SqliteChunks};
use diesel::{connection::SimpleConnection, prelude::*};
use eyre::WrapErr;
use kaikki::{classify, Record, Records};
use sanasto_core::{PartOfSpeech, MISSING_FORM};
use std::{io::BufRead, path::Path};

const SCHEMA: &str = include_str!("../../sql/flat.sql");

pub const DEFAULT_LANG_CODE: &str = "fi";

pub fn init_schema(conn: &mut SqliteConnection) -> eyre::Result<()> {
    tracing::info!("Recreating dictionary tables");
    conn.batch_execute(SCHEMA)
        .wrap_err("Failed to create dictionary tables")
}

pub fn import_flat(
    conn: &mut SqliteConnection,
    source: &Path,
    lang_code: &str,
) -> eyre::Result<ImportSummary> {
    tracing::info!("Opening {}", source.display());
    let records = Records::open(source)
        .wrap_err_with(|| format!("Failed to open file at '{}'", source.display()))?;
    import_records(conn, records, lang_code)
}

/// Replaces the dictionary with the noun and verb records in the given language.
pub fn import_records<R: BufRead>(
    conn: &mut SqliteConnection,
    records: Records<R>,
    lang_code: &str,
) -> eyre::Result<ImportSummary> {
    init_schema(conn)?;
    let summary = conn.transaction(|conn| {
        tracing::info!("Starting transaction");
        let mut summary = ImportSummary::default();
        for record in records {
            let raw = record?;
            summary.processed += 1;
            if raw.lang_code() != Some(lang_code) {
                continue;
            }
            let (Some(word), Some(pos)) = (raw.lemma(), raw.part_of_speech()) else {
                continue;
            };
            let word = word.to_string();
            let record = raw.into_record()?;
            insert_word(conn, &record, &word, pos)
                .wrap_err_with(|| format!("Failed to insert word '{word}'"))?;
            summary.inserted += 1;
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

fn insert_word(
    conn: &mut SqliteConnection,
    record: &Record,
    word: &str,
    pos: PartOfSpeech,
) -> eyre::Result<()> {
    use crate::schema::{noun_declensions as nd, verb_conjugations as vc, words as w};

    let definition = record
        .senses
        .first()
        .and_then(|sense| sense.glosses.first())
        .map(String::as_str)
        .unwrap_or(MISSING_FORM);
    let pos_str = pos.as_str();
    let word_id = diesel::insert_into(w::table)
        .values((w::word.eq(word), w::pos.eq(pos_str), w::definition.eq(definition)))
        .returning(w::id)
        .get_result::<i32>(conn)?;

    match pos {
        PartOfSpeech::Verb => {
            let conjugations = classify::conjugations(&record.forms)
                .into_iter()
                .map(|(person, form)| {
                    let person = person.pronoun();
                    eq!(vc, word_id, person, form)
                })
                .collect::<Vec<_>>();
            tracing::trace!("{word}: {} conjugations", conjugations.len());
            for chunk in conjugations.sqlite_chunks() {
                diesel::insert_into(vc::table).values(chunk).execute(conn)?;
            }
        }
        PartOfSpeech::Noun => {
            let declensions = classify::declensions(&record.forms)
                .into_iter()
                .map(|(case, forms)| {
                    let case_name = case.name();
                    let singular = forms.singular;
                    let plural = forms.plural;
                    eq!(nd, word_id, case_name, singular, plural)
                })
                .collect::<Vec<_>>();
            tracing::trace!("{word}: {} declensions", declensions.len());
            for chunk in declensions.sqlite_chunks() {
                diesel::insert_into(nd::table).values(chunk).execute(conn)?;
            }
        }
    }
    Ok(())
}
