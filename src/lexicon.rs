use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::{Severity, SymptomCategory};

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Lexicon load failed ({0}): {1}")]
    Load(String, String),

    #[error("Lexicon parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Duplicate disease key in lexicon: {0}")]
    DuplicateDiseaseKey(String),
}

/// One canonical symptom with its surface-form synonyms.
/// Table order is significant: it decides first-seen tie-breaks downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub key: String,
    pub synonyms: Vec<String>,
    pub category: SymptomCategory,
}

/// Patterns identifying one animal type. First table entry with a hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalEntry {
    pub animal: String,
    pub patterns: Vec<String>,
}

/// A recognizable breed and the species it implies when the species itself
/// goes unmentioned ("my golden retriever" still means a dog).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedEntry {
    pub name: String,
    pub species: String,
}

/// Vocabulary for one severity tier. Tiers are checked in table order;
/// the first tier whose term appears wins (order is the tie-break, not rank).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityEntry {
    pub level: Severity,
    pub terms: Vec<String>,
}

/// Keyword index for one disease, used by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseSignature {
    pub key: String,
    pub keywords: Vec<String>,
    pub known_symptoms: Vec<String>,
    pub severity: Severity,
}

/// Immutable pattern tables for extraction and scoring. Constructed once at
/// startup and passed by reference into the extractor and scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub symptoms: Vec<SymptomEntry>,
    pub animals: Vec<AnimalEntry>,
    pub breeds: Vec<BreedEntry>,
    pub severities: Vec<SeverityEntry>,
    pub diseases: Vec<DiseaseSignature>,
}

impl Lexicon {
    /// The bundled default tables.
    pub fn builtin() -> Self {
        let lexicon: Lexicon = serde_json::from_str(include_str!("../resources/lexicon.json"))
            .expect("bundled lexicon is valid JSON");
        lexicon
            .normalized()
            .expect("bundled lexicon has unique disease keys")
    }

    /// Load alternate tables from a JSON file. Fatal at initialization:
    /// the extractor cannot produce meaningful output without its tables.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| LexiconError::Load(path.display().to_string(), e.to_string()))?;
        let lexicon: Lexicon = serde_json::from_str(&json)
            .map_err(|e| LexiconError::Parse(path.display().to_string(), e.to_string()))?;
        lexicon.normalized()
    }

    /// Merge duplicate symptom keys (synonym lists union under the first
    /// occurrence, order preserved) and reject duplicate disease keys,
    /// whose scalar fields have no well-defined merge.
    fn normalized(self) -> Result<Self, LexiconError> {
        let Self {
            symptoms: raw_symptoms,
            animals,
            breeds,
            severities,
            diseases,
        } = self;

        let mut symptoms: Vec<SymptomEntry> = Vec::with_capacity(raw_symptoms.len());
        for entry in raw_symptoms {
            match symptoms.iter_mut().find(|e| e.key == entry.key) {
                Some(existing) => {
                    for synonym in entry.synonyms {
                        if !existing.synonyms.contains(&synonym) {
                            existing.synonyms.push(synonym);
                        }
                    }
                }
                None => symptoms.push(entry),
            }
        }

        let mut disease_keys = HashSet::new();
        for signature in &diseases {
            if !disease_keys.insert(signature.key.clone()) {
                return Err(LexiconError::DuplicateDiseaseKey(signature.key.clone()));
            }
        }

        Ok(Self {
            symptoms,
            animals,
            breeds,
            severities,
            diseases,
        })
    }

    /// Look up a symptom entry by canonical key.
    pub fn symptom(&self, key: &str) -> Option<&SymptomEntry> {
        self.symptoms.iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn builtin_loads_all_tables() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.symptoms.len(), 26);
        assert_eq!(lexicon.animals.len(), 6);
        assert_eq!(lexicon.breeds.len(), 15);
        assert_eq!(lexicon.severities.len(), 3);
        assert_eq!(lexicon.diseases.len(), 8);
    }

    #[test]
    fn builtin_lethargy_carries_merged_synonyms() {
        let lexicon = Lexicon::builtin();
        let entry = lexicon.symptom("lethargy").unwrap();
        for synonym in ["lethargy", "lethargic", "sluggish", "no energy", "not active", "listless"] {
            assert!(entry.synonyms.iter().any(|s| s == synonym), "missing {synonym}");
        }
        assert_eq!(
            lexicon.symptoms.iter().filter(|e| e.key == "lethargy").count(),
            1
        );
    }

    #[test]
    fn severity_tiers_in_table_order() {
        let lexicon = Lexicon::builtin();
        let levels: Vec<Severity> = lexicon.severities.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![Severity::Mild, Severity::Moderate, Severity::Severe]);
    }

    #[test]
    fn duplicate_symptom_keys_merge_on_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "symptoms": [
                    {{"key": "lethargy", "synonyms": ["lethargy", "sluggish"], "category": "neurological"}},
                    {{"key": "lethargy", "synonyms": ["lethargy", "listless"], "category": "general"}}
                ],
                "animals": [], "breeds": [], "severities": [], "diseases": []
            }}"#
        )
        .unwrap();

        let lexicon = Lexicon::load(file.path()).unwrap();
        assert_eq!(lexicon.symptoms.len(), 1);
        assert_eq!(
            lexicon.symptoms[0].synonyms,
            vec!["lethargy", "sluggish", "listless"]
        );
        assert_eq!(lexicon.symptoms[0].category, SymptomCategory::Neurological);
    }

    #[test]
    fn duplicate_disease_keys_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "symptoms": [], "animals": [], "breeds": [], "severities": [],
                "diseases": [
                    {{"key": "otitis", "keywords": [], "known_symptoms": [], "severity": "mild"}},
                    {{"key": "otitis", "keywords": [], "known_symptoms": [], "severity": "severe"}}
                ]
            }}"#
        )
        .unwrap();

        let err = Lexicon::load(file.path()).unwrap_err();
        assert!(matches!(err, LexiconError::DuplicateDiseaseKey(key) if key == "otitis"));
    }

    #[test]
    fn load_missing_file_fails_fast() {
        let err = Lexicon::load(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(matches!(err, LexiconError::Load(..)));
    }

    #[test]
    fn load_malformed_json_fails_fast() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = Lexicon::load(file.path()).unwrap_err();
        assert!(matches!(err, LexiconError::Parse(..)));
    }
}
