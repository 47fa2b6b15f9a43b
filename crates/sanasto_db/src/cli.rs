use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DICTIONARY: &str = "./.web/finnish_dictionary.db";
pub const DEFAULT_LEXICON: &str = "fi_words.sqlite";

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Looks up a word's inflections in the dictionary database.
    Lookup {
        word: String,
        /// The path to the dictionary database.
        #[arg(long, default_value = DEFAULT_DICTIONARY)]
        db: PathBuf,
    },
    /// Prints every lexicon entry for a word.
    Entry {
        word: String,
        /// The path to the lexicon database.
        #[arg(long, default_value = DEFAULT_LEXICON)]
        db: PathBuf,
    },
    /// Scrapes a word's inflections from Wiktionary.
    Scrape { word: String },
    /// Translates text with MyMemory.
    Translate {
        text: String,
        /// The source language code.
        #[arg(long, default_value = "en")]
        from: String,
        /// The target language code.
        #[arg(long, default_value = "fi")]
        to: String,
    },
    /// Finds example sentences for a word on Tatoeba.
    Examples { word: String },
}
