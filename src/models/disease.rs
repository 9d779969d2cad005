use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// A disease reference record from the corpus. Read-only to the analysis
/// core; ownership of the data stays with the corpus collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: i64,
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    /// Canonical symptom keys in the record's declared order.
    pub known_symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub treatment: String,
    pub prevention: String,
    pub severity: Severity,
    pub affected_species: Vec<String>,
}

/// A suspected condition produced by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCandidate {
    /// Canonical disease key, e.g. `parvovirus`.
    pub disease_key: String,
    /// Heuristic evidence strength in [0, 1]; not a calibrated probability.
    pub confidence: f64,
    /// Extracted symptoms also known for this disease, in the disease's
    /// declared symptom order.
    pub related_symptoms: Vec<String>,
}

impl DiseaseCandidate {
    pub fn display_name(&self) -> String {
        self.disease_key.replace('_', " ")
    }
}

/// A corpus record matched directly by extracted symptom keys, for
/// presentation alongside the scored candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMatch {
    pub disease: DiseaseRecord,
    pub confidence: f64,
    /// How many extracted symptom keys appear in the record.
    pub symptom_matches: usize,
}
