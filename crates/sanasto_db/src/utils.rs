//! Miscellaneous utilities.

pub mod database;
pub mod diesel;
pub mod progress;
