//! Provides sanasto's inflection scraping and the clients for its external services.

pub mod config;
pub mod inflection;
pub mod sentences;
pub mod translation;
pub mod wiktionary;

pub use config::HttpConfig;
pub use sentences::{ExampleSentence, Tatoeba};
pub use translation::MyMemory;
pub use wiktionary::Wiktionary;
