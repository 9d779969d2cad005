use serde::{Deserialize, Serialize};

use crate::models::enums::{Severity, Urgency};
use crate::models::{CorpusMatch, DiseaseCandidate, PatientInfo, SymptomRecord};

/// Symptom keys that escalate urgency on their own presence.
const SEVERE_SYMPTOM_KEYS: [&str; 3] = ["labored_breathing", "seizure", "fever"];

/// Triage output derived from the analysis: urgency tier plus fixed-form
/// actions, notes, and warning signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub urgency: Urgency,
    pub actions: Vec<String>,
    pub notes: Vec<String>,
    pub emergency_signs: Vec<String>,
}

pub fn assess(
    patient: &PatientInfo,
    symptoms: &[SymptomRecord],
    candidates: &[DiseaseCandidate],
    matches: &[CorpusMatch],
) -> Recommendation {
    Recommendation {
        urgency: assess_urgency(symptoms, candidates, matches),
        actions: recommended_actions(symptoms, matches),
        notes: important_notes(patient, symptoms, candidates),
        emergency_signs: emergency_signs(),
    }
}

fn has_any(symptoms: &[SymptomRecord], keys: &[&str]) -> bool {
    symptoms
        .iter()
        .any(|s| keys.contains(&s.symptom_key.as_str()))
}

fn assess_urgency(
    symptoms: &[SymptomRecord],
    candidates: &[DiseaseCandidate],
    matches: &[CorpusMatch],
) -> Urgency {
    let severe_key_present = has_any(symptoms, &SEVERE_SYMPTOM_KEYS);
    let severe_disease = matches
        .iter()
        .any(|m| m.disease.severity == Severity::Severe);
    let severe_modifier = symptoms
        .iter()
        .any(|s| s.severity == Some(Severity::Severe));

    if severe_key_present || severe_disease {
        if severe_disease {
            Urgency::Urgent
        } else {
            Urgency::High
        }
    } else if severe_modifier || !candidates.is_empty() {
        Urgency::Moderate
    } else {
        Urgency::Low
    }
}

fn recommended_actions(symptoms: &[SymptomRecord], matches: &[CorpusMatch]) -> Vec<String> {
    let mut actions = vec!["Schedule a veterinary appointment for professional diagnosis".to_string()];

    if has_any(symptoms, &["vomiting", "diarrhea", "fever"]) {
        actions.push("Ensure your pet has access to fresh water to prevent dehydration".into());
    }

    if has_any(symptoms, &["vomiting", "diarrhea", "loss_of_appetite"]) {
        actions.push("Consider withholding food for 12-24 hours, then introduce a bland diet".into());
    }

    if matches
        .first()
        .is_some_and(|m| m.disease.severity == Severity::Severe)
    {
        actions.push("Do not delay professional treatment".into());
    }

    if has_any(symptoms, &["itching", "rash"]) {
        actions.push("Check for parasites and environmental irritants".into());
    }

    actions.push("Keep detailed notes of symptoms, duration, and any triggers".into());
    actions
}

fn important_notes(
    patient: &PatientInfo,
    symptoms: &[SymptomRecord],
    candidates: &[DiseaseCandidate],
) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(animal) = &patient.animal_type {
        notes.push(format!("Species: {animal}"));
    }

    if symptoms
        .iter()
        .any(|s| s.severity == Some(Severity::Severe))
    {
        notes.push("Severe symptoms present - requires urgent evaluation".into());
    }

    // Flags any duration span containing the digit 3, 4, or 5.
    if symptoms.iter().any(|s| {
        s.duration
            .as_deref()
            .is_some_and(|d| d.contains('3') || d.contains('4') || d.contains('5'))
    }) {
        notes.push("Symptoms lasting several days - may indicate a systemic issue".into());
    }

    if candidates.len() > 2 {
        notes.push("Multiple conditions are possible - professional diagnosis is essential".into());
    }

    notes
}

fn emergency_signs() -> Vec<String> {
    [
        "Severe difficulty breathing or gasping for air",
        "Unconsciousness or inability to stand",
        "Uncontrollable seizures or convulsions",
        "Severe bleeding or wound not stopping after 5-10 minutes",
        "Signs of extreme pain or distress",
        "Inability to urinate or defecate for more than 24 hours",
        "Severe abdominal swelling or pain",
        "Ingestion of toxic substances",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
