use std::cmp::Ordering;
use std::collections::HashSet;

use crate::lexicon::DiseaseSignature;
use crate::models::{DiseaseCandidate, SymptomRecord};

/// Base confidence when a disease's own keywords appear in the text.
const KEYWORD_BASE: f64 = 0.8;
/// Per-symptom bonus on top of a keyword hit.
const KEYWORD_OVERLAP_STEP: f64 = 0.05;
/// Base confidence when only symptom overlap supports the disease.
const OVERLAP_BASE: f64 = 0.4;
/// Per-symptom step for overlap-only evidence.
const OVERLAP_STEP: f64 = 0.10;
/// Candidates at or below this confidence are dropped.
const MIN_CONFIDENCE: f64 = 0.3;

/// Rank disease signatures against the text and the extracted symptoms.
/// Two additive signals: keyword presence and symptom overlap. Output is
/// sorted by descending confidence, stable for ties (signature table order).
pub fn score_diseases(
    text: &str,
    symptoms: &[SymptomRecord],
    signatures: &[DiseaseSignature],
) -> Vec<DiseaseCandidate> {
    let lower = text.to_lowercase();
    let extracted: HashSet<&str> = symptoms.iter().map(|s| s.symptom_key.as_str()).collect();

    let mut candidates = Vec::new();
    for signature in signatures {
        let keyword_match = signature.keywords.iter().any(|k| lower.contains(k.as_str()));

        // Intersection in the signature's declared symptom order.
        let related: Vec<String> = signature
            .known_symptoms
            .iter()
            .filter(|s| extracted.contains(s.as_str()))
            .cloned()
            .collect();
        let overlap = related.len() as f64;

        let confidence = if keyword_match {
            (KEYWORD_BASE + overlap * KEYWORD_OVERLAP_STEP).min(1.0)
        } else if !related.is_empty() {
            (OVERLAP_BASE + overlap * OVERLAP_STEP).min(1.0)
        } else {
            0.0
        };

        if confidence > MIN_CONFIDENCE {
            candidates.push(DiseaseCandidate {
                disease_key: signature.key.clone(),
                confidence,
                related_symptoms: related,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    candidates
}
