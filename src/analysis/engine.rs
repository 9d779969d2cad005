use std::time::Instant;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extractor::{Extraction, Extractor};
use super::scoring::score_diseases;
use super::AnalysisError;
use crate::corpus::{CorpusError, DiseaseCorpus};
use crate::lexicon::Lexicon;
use crate::models::{
    CorpusMatch, DiseaseCandidate, DiseaseRecord, FollowUpQuestion, PatientInfo, SymptomRecord,
};
use crate::questions::{QuestionContext, QuestionGenerator, DEFAULT_MAX_QUESTIONS};
use crate::triage::{self, Recommendation};

/// Corpus matches surfaced per analysis.
const MAX_CORPUS_MATCHES: usize = 5;

/// Complete analysis output; the flat JSON-serializable form handed to
/// presentation and storage collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub patient: PatientInfo,
    pub symptoms: Vec<SymptomRecord>,
    pub candidates: Vec<DiseaseCandidate>,
    pub corpus_matches: Vec<CorpusMatch>,
    pub questions: Vec<FollowUpQuestion>,
    pub recommendation: Recommendation,
    pub raw_text: String,
    pub analyzed_at: NaiveDateTime,
    pub processing_time_ms: u64,
}

/// Sequences extraction, scoring, corpus matching, question generation, and
/// triage. Stateless per call; the lexicon and corpus are injected once.
pub struct AnalysisEngine<C: DiseaseCorpus> {
    lexicon: Lexicon,
    extractor: Extractor,
    generator: QuestionGenerator,
    corpus: C,
}

impl<C: DiseaseCorpus> AnalysisEngine<C> {
    pub fn new(lexicon: Lexicon, corpus: C) -> Self {
        let extractor = Extractor::new(&lexicon);
        Self {
            lexicon,
            extractor,
            generator: QuestionGenerator::new(),
            corpus,
        }
    }

    /// Extraction-only path for callers that want structured data without
    /// corpus access or question generation.
    pub fn extract(&self, text: &str) -> Extraction {
        self.extractor.extract(text)
    }

    /// Direct corpus browsing path; independent of the confidence model.
    pub fn search_by_symptoms(
        &self,
        keys: &[String],
    ) -> Result<Vec<(DiseaseRecord, usize)>, CorpusError> {
        self.corpus.search_by_symptoms(keys)
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisReport, AnalysisError> {
        let start = Instant::now();

        let extraction = self.extractor.extract(text);
        let candidates = score_diseases(text, &extraction.symptoms, &self.lexicon.diseases);
        let corpus_matches = self.match_corpus(&extraction.symptoms, &candidates)?;

        let ctx = QuestionContext {
            patient: &extraction.patient,
            symptoms: &extraction.symptoms,
            candidates: &candidates,
            corpus: Some(&self.corpus),
        };
        let questions = self.generator.generate(&ctx, DEFAULT_MAX_QUESTIONS)?;

        let recommendation = triage::assess(
            &extraction.patient,
            &extraction.symptoms,
            &candidates,
            &corpus_matches,
        );

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            symptoms = extraction.symptoms.len(),
            candidates = candidates.len(),
            corpus_matches = corpus_matches.len(),
            questions = questions.len(),
            urgency = recommendation.urgency.as_str(),
            processing_ms = processing_time_ms,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            id: Uuid::new_v4(),
            patient: extraction.patient,
            symptoms: extraction.symptoms,
            candidates,
            corpus_matches,
            questions,
            recommendation,
            raw_text: extraction.raw_text,
            analyzed_at: chrono::Local::now().naive_local(),
            processing_time_ms,
        })
    }

    /// Look up corpus records by extracted symptom keys. Confidence comes
    /// from the matching scored candidate when one exists, otherwise from the
    /// fraction of the record's known symptoms that were reported.
    fn match_corpus(
        &self,
        symptoms: &[SymptomRecord],
        candidates: &[DiseaseCandidate],
    ) -> Result<Vec<CorpusMatch>, CorpusError> {
        if symptoms.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = symptoms.iter().map(|s| s.symptom_key.clone()).collect();
        let results = self.corpus.search_by_symptoms(&keys)?;

        Ok(results
            .into_iter()
            .take(MAX_CORPUS_MATCHES)
            .map(|(record, symptom_matches)| {
                let suspected = candidates
                    .iter()
                    .find(|c| c.disease_key == record.name.to_lowercase());
                let confidence = match suspected {
                    Some(candidate) => candidate.confidence,
                    None if record.known_symptoms.is_empty() => 0.0,
                    None => symptom_matches as f64 / record.known_symptoms.len() as f64,
                };
                CorpusMatch {
                    disease: record,
                    confidence,
                    symptom_matches,
                }
            })
            .collect())
    }
}
