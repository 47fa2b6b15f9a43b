//! Command line access to the dictionary databases and the online sources.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use eyre::WrapErr;
use sanasto::{HttpConfig, MyMemory, Tatoeba, Wiktionary};
use sanasto_db::{
    domain::{lexicon, lookup},
    utils::database,
};
use serde::Serialize;
use std::io::{self, Write};

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Lookup { word, db } => {
            let word = word.to_lowercase();
            match lookup::lookup(&db, &word)? {
                Some(data) => print_json(&data)?,
                None => not_found(&word),
            }
        }
        Command::Entry { word, db } => {
            let entries = if db.is_file() {
                let mut conn = database::establish(&db)?;
                if database::table_exists(&mut conn, "entries")? {
                    lexicon::entries_by_word(&mut conn, &word)?
                } else {
                    Vec::new()
                }
            } else {
                tracing::warn!("Lexicon database not found at '{}'", db.display());
                Vec::new()
            };
            if entries.is_empty() {
                not_found(&word);
            } else {
                print_json(&entries)?;
            }
        }
        Command::Scrape { word } => {
            let wiktionary = Wiktionary::new(&HttpConfig::from_env()?)?;
            match wiktionary.fetch_word_data(&word) {
                Some(data) => print_json(&data)?,
                None => not_found(&word),
            }
        }
        Command::Translate { text, from, to } => {
            let mymemory = MyMemory::new(&HttpConfig::from_env()?)?;
            match mymemory.translate(&text, &from, &to) {
                Some(translation) => print_json(&translation)?,
                None => eprintln!("No translation for '{text}'"),
            }
        }
        Command::Examples { word } => {
            let tatoeba = Tatoeba::new(&HttpConfig::from_env()?)?;
            let sentences = tatoeba.example_sentences(&word);
            if sentences.is_empty() {
                eprintln!("No example sentences for '{word}'");
            } else {
                print_json(&sentences)?;
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).wrap_err("Failed to write output")?;
    writeln!(stdout)?;
    Ok(())
}

fn not_found(word: &str) {
    eprintln!("'{word}' was not found");
}
