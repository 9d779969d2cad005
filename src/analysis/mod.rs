pub mod engine;
pub mod extractor;
pub mod scoring;

pub use engine::{AnalysisEngine, AnalysisReport};
pub use extractor::{Extraction, Extractor};
pub use scoring::score_diseases;

use thiserror::Error;

use crate::corpus::CorpusError;
use crate::lexicon::LexiconError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}
