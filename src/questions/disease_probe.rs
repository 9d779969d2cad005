use std::collections::HashSet;

use super::{QuestionContext, QuestionSource};
use crate::corpus::CorpusError;
use crate::models::enums::QuestionCategory;
use crate::models::FollowUpQuestion;

/// Suspected diseases considered for targeted probes.
const TOP_CANDIDATES: usize = 3;

/// Probes driven by the top suspected diseases: corpus-known symptoms not yet
/// reported, recorded causes, vaccination status, and prior diagnoses.
pub struct DiseaseProbeSource;

impl QuestionSource for DiseaseProbeSource {
    fn collect(&self, ctx: &QuestionContext<'_>) -> Result<Vec<FollowUpQuestion>, CorpusError> {
        let animal = ctx.animal();
        let extracted: HashSet<&str> = ctx
            .symptoms
            .iter()
            .map(|s| s.symptom_key.as_str())
            .collect();

        let mut questions = Vec::new();
        for candidate in ctx.candidates.iter().take(TOP_CANDIDATES) {
            let display = candidate.display_name();

            if let Some(corpus) = ctx.corpus {
                if let Some(record) = corpus.search_by_name(&candidate.disease_key)? {
                    let missing: Vec<String> = record
                        .known_symptoms
                        .iter()
                        .filter(|s| !extracted.contains(s.as_str()))
                        .map(|s| s.replace('_', " "))
                        .collect();
                    if !missing.is_empty() {
                        questions.push(FollowUpQuestion {
                            category: QuestionCategory::DiseaseConfirmation,
                            question: format!(
                                "Has your {animal} shown any {}?",
                                missing.join(" or ")
                            ),
                            priority: 4,
                            rationale: format!(
                                "These symptoms are commonly associated with {display}"
                            ),
                        });
                    }

                    if !record.causes.is_empty() {
                        let causes: Vec<&str> =
                            record.causes.iter().take(2).map(String::as_str).collect();
                        questions.push(FollowUpQuestion {
                            category: QuestionCategory::DiseaseConfirmation,
                            question: format!(
                                "Has your {animal} been exposed to {}?",
                                causes.join(" or ")
                            ),
                            priority: 3,
                            rationale: format!("These are common causes of {display}"),
                        });
                    }
                }
            }

            questions.push(FollowUpQuestion {
                category: QuestionCategory::DiseaseConfirmation,
                question: format!("Is your {animal} up to date on vaccinations?"),
                priority: 4,
                rationale: format!(
                    "Vaccination status is crucial for infectious diseases like {display}"
                ),
            });

            questions.push(FollowUpQuestion {
                category: QuestionCategory::MedicalHistory,
                question: format!("Has your {animal} been diagnosed with {display} before?"),
                priority: 2,
                rationale: "Previous occurrences help confirm recurrent conditions".into(),
            });
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SqliteCorpus;
    use crate::models::{DiseaseCandidate, PatientInfo, SymptomRecord};

    fn candidate(key: &str) -> DiseaseCandidate {
        DiseaseCandidate {
            disease_key: key.into(),
            confidence: 0.8,
            related_symptoms: vec![],
        }
    }

    fn symptom(key: &str) -> SymptomRecord {
        SymptomRecord {
            symptom_key: key.into(),
            duration: None,
            severity: None,
            frequency: None,
            context: String::new(),
        }
    }

    #[test]
    fn missing_symptom_probe_uses_extracted_set() {
        let corpus = SqliteCorpus::in_memory().unwrap();
        let patient = PatientInfo {
            animal_type: Some("dog".into()),
            ..Default::default()
        };
        // Parvovirus knows vomiting, diarrhea, lethargy, loss_of_appetite, fever;
        // three are already reported.
        let symptoms = vec![symptom("vomiting"), symptom("diarrhea"), symptom("lethargy")];
        let candidates = vec![candidate("parvovirus")];
        let ctx = QuestionContext {
            patient: &patient,
            symptoms: &symptoms,
            candidates: &candidates,
            corpus: Some(&corpus),
        };

        let questions = DiseaseProbeSource.collect(&ctx).unwrap();
        let probe = questions
            .iter()
            .find(|q| q.question.starts_with("Has your dog shown any"))
            .expect("missing-symptom probe emitted");
        assert_eq!(
            probe.question,
            "Has your dog shown any loss of appetite or fever?"
        );
        assert_eq!(probe.priority, 4);
    }

    #[test]
    fn causes_probe_takes_first_two_causes() {
        let corpus = SqliteCorpus::in_memory().unwrap();
        let patient = PatientInfo::default();
        let candidates = vec![candidate("parvovirus")];
        let ctx = QuestionContext {
            patient: &patient,
            symptoms: &[],
            candidates: &candidates,
            corpus: Some(&corpus),
        };

        let questions = DiseaseProbeSource.collect(&ctx).unwrap();
        assert!(questions.iter().any(|q| q.question
            == "Has your pet been exposed to viral infection or unvaccinated animals?"));
    }

    #[test]
    fn without_corpus_only_general_probes_remain() {
        let patient = PatientInfo::default();
        let candidates = vec![candidate("parvovirus")];
        let ctx = QuestionContext {
            patient: &patient,
            symptoms: &[],
            candidates: &candidates,
            corpus: None,
        };

        let questions = DiseaseProbeSource.collect(&ctx).unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions[0].question.contains("vaccinations"));
        assert!(questions[1].question.contains("diagnosed with parvovirus before"));
    }

    #[test]
    fn only_top_three_candidates_probed() {
        let corpus = SqliteCorpus::in_memory().unwrap();
        let patient = PatientInfo::default();
        let candidates = vec![
            candidate("parvovirus"),
            candidate("gastroenteritis"),
            candidate("pancreatitis"),
            candidate("otitis"),
        ];
        let ctx = QuestionContext {
            patient: &patient,
            symptoms: &[],
            candidates: &candidates,
            corpus: Some(&corpus),
        };

        let questions = DiseaseProbeSource.collect(&ctx).unwrap();
        assert!(!questions.iter().any(|q| q.question.contains("otitis")));
    }

    #[test]
    fn unknown_disease_key_skips_corpus_probes() {
        let corpus = SqliteCorpus::in_memory().unwrap();
        let patient = PatientInfo::default();
        let candidates = vec![candidate("moon_fever")];
        let ctx = QuestionContext {
            patient: &patient,
            symptoms: &[],
            candidates: &candidates,
            corpus: Some(&corpus),
        };

        let questions = DiseaseProbeSource.collect(&ctx).unwrap();
        assert_eq!(questions.len(), 2, "only the unconditional probes remain");
    }
}
