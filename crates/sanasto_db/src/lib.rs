//! Relational storage for sanasto: the lexicon importers, the dictionary lookup and the tools
//! that build the databases.

pub mod domain;
pub mod download;
pub mod schema;
pub mod utils;

/// Directory the dictionary tool keeps its files in.
pub const DATA_DIR: &str = ".web";
/// File name of the downloaded extract inside [`DATA_DIR`].
pub const DUMP_FILE: &str = "kaikki.org-dictionary-Finnish.jsonl";
/// File name of the flat dictionary database inside [`DATA_DIR`].
pub const DATABASE_FILE: &str = "finnish_dictionary.db";
