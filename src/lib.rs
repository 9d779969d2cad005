pub mod analysis;
pub mod config;
pub mod corpus;
pub mod lexicon;
pub mod models;
pub mod questions;
pub mod report;
pub mod triage;

// Re-export the types most callers need.
pub use analysis::{AnalysisEngine, AnalysisError, AnalysisReport, Extraction, Extractor};
pub use corpus::{CorpusError, DiseaseCorpus, NewDisease, SqliteCorpus};
pub use lexicon::{Lexicon, LexiconError};
pub use models::{
    CorpusMatch, DiseaseCandidate, DiseaseRecord, FollowUpQuestion, PatientInfo, SymptomRecord,
};
pub use questions::{QuestionContext, QuestionGenerator, QuestionSource, DEFAULT_MAX_QUESTIONS};
pub use triage::Recommendation;
