//! Follow-up question generation.
//!
//! Each generation concern is an independent `QuestionSource`; the generator
//! unions their output, deduplicates by question text, and keeps the highest
//! priority questions up to the cap.

pub mod coverage_gap;
pub mod disease_probe;
pub mod medical_history;
pub mod symptom_detail;

use std::collections::HashSet;

use crate::corpus::{CorpusError, DiseaseCorpus};
use crate::models::{DiseaseCandidate, FollowUpQuestion, PatientInfo, SymptomRecord};

pub const DEFAULT_MAX_QUESTIONS: usize = 8;

/// Everything a source may consult. The corpus is optional, mirroring
/// standalone use without a reference set; sources that need it skip their
/// corpus-backed questions when it is absent.
pub struct QuestionContext<'a> {
    pub patient: &'a PatientInfo,
    pub symptoms: &'a [SymptomRecord],
    pub candidates: &'a [DiseaseCandidate],
    pub corpus: Option<&'a dyn DiseaseCorpus>,
}

impl QuestionContext<'_> {
    pub fn animal(&self) -> &str {
        self.patient.animal_display()
    }

    pub fn has_any_symptom(&self, keys: &[&str]) -> bool {
        self.symptoms
            .iter()
            .any(|s| keys.contains(&s.symptom_key.as_str()))
    }
}

/// One per generation concern. Self-contained, independently testable.
/// A corpus failure propagates: "couldn't check" must not read as "nothing
/// to ask".
pub trait QuestionSource {
    fn collect(&self, ctx: &QuestionContext<'_>) -> Result<Vec<FollowUpQuestion>, CorpusError>;
}

pub struct QuestionGenerator {
    sources: Vec<Box<dyn QuestionSource>>,
}

impl QuestionGenerator {
    pub fn new() -> Self {
        Self {
            sources: vec![
                Box::new(symptom_detail::SymptomDetailSource),
                Box::new(disease_probe::DiseaseProbeSource),
                Box::new(medical_history::MedicalHistorySource),
                Box::new(coverage_gap::CoverageGapSource),
            ],
        }
    }

    pub fn generate(
        &self,
        ctx: &QuestionContext<'_>,
        max_questions: usize,
    ) -> Result<Vec<FollowUpQuestion>, CorpusError> {
        let mut questions = Vec::new();
        for source in &self.sources {
            questions.extend(source.collect(ctx)?);
        }

        dedup_by_text(&mut questions);

        // Stable sort: equal priorities keep generation order.
        questions.sort_by(|a, b| b.priority.cmp(&a.priority));
        questions.truncate(max_questions);
        Ok(questions)
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive exact text dedup; the first occurrence wins.
fn dedup_by_text(questions: &mut Vec<FollowUpQuestion>) {
    let mut seen = HashSet::new();
    questions.retain(|q| seen.insert(q.question.to_lowercase()));
}
