pub mod builtin;
pub mod database;
pub mod matcher;

pub use builtin::{TestDefinition, BUILTIN_TESTS};
pub use database::{ReferenceDatabase, ReferenceEntry};
pub use matcher::NameMatcher;

use thiserror::Error;

/// Failure to read the override table. Never escapes
/// `ReferenceDatabase::build`, which falls back to the built-in table.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Lowercase, trim, and collapse whitespace runs to single spaces.
pub fn normalize_label(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
