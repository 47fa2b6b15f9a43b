//! The importers and readers for the two database layouts.

pub mod flat;
pub mod lexicon;
pub mod lookup;

use serde::Serialize;

/// Counts reported by an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records read from the extract, including the ones that were skipped.
    pub processed: usize,
    /// Records written to the database.
    pub inserted: usize,
}
