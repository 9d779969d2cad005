pub mod repository;
pub mod sqlite;

pub use repository::{NewDisease, SqliteCorpus};
pub use sqlite::{open_corpus_database, open_memory_corpus_database, seed_default_diseases};

use thiserror::Error;

use crate::models::DiseaseRecord;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corpus unavailable ({path}): {reason}")]
    Unavailable { path: String, reason: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Malformed corpus record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },
}

/// Read-only disease reference lookup. The analysis core only consumes this
/// interface; a failing lookup must surface as an error so callers can tell
/// "no matches" from "couldn't check".
pub trait DiseaseCorpus {
    /// Records containing any of the given canonical symptom keys, with the
    /// count of matching keys, sorted descending by count.
    fn search_by_symptoms(
        &self,
        keys: &[String],
    ) -> Result<Vec<(DiseaseRecord, usize)>, CorpusError>;

    /// Case-insensitive exact name lookup.
    fn search_by_name(&self, name: &str) -> Result<Option<DiseaseRecord>, CorpusError>;

    /// Substring search over name and description.
    fn search_by_keyword(&self, keyword: &str) -> Result<Vec<DiseaseRecord>, CorpusError>;

    fn all_diseases(&self) -> Result<Vec<DiseaseRecord>, CorpusError>;
}
