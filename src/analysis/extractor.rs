use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::models::enums::{Gender, Severity};
use crate::models::{PatientInfo, SymptomRecord};

/// Characters of surrounding text kept on each side of a symptom match.
const CONTEXT_WINDOW: usize = 100;

static AGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)[\s-]*(year|yr|month|mon|week|wk|day)s?[\s-]*old").expect("valid regex")
});

static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\.?\d*)\s*(kg|pounds|lbs|lb|kilograms)").expect("valid regex")
});

static MALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(male|m|tom|buck)\b").expect("valid regex"));

static FEMALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(female|f|queen|doe)\b").expect("valid regex"));

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(for\s+)?(\d+)\s*(day|week|month|year|hour|minute)s?").expect("valid regex")
});

static FREQUENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(daily|twice a day|once a day|every\s+\d+\s+hours|often|frequently|occasionally|intermittent)")
        .expect("valid regex")
});

/// Extraction output: demographics plus deduplicated symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub patient: PatientInfo,
    pub symptoms: Vec<SymptomRecord>,
    pub raw_text: String,
}

struct SymptomMatcher {
    key: String,
    patterns: Vec<Regex>,
}

struct AnimalMatcher {
    animal: String,
    patterns: Vec<Regex>,
}

/// Lexicon-driven pattern extractor. Compiles its whole-word regexes once at
/// construction; `extract` never fails on malformed input.
pub struct Extractor {
    animals: Vec<AnimalMatcher>,
    breeds: Vec<(String, String)>,
    symptoms: Vec<SymptomMatcher>,
    severities: Vec<(Severity, Vec<String>)>,
}

impl Extractor {
    pub fn new(lexicon: &Lexicon) -> Self {
        let animals = lexicon
            .animals
            .iter()
            .map(|entry| AnimalMatcher {
                animal: entry.animal.clone(),
                patterns: entry.patterns.iter().map(|p| whole_word(p)).collect(),
            })
            .collect();

        let breeds = lexicon
            .breeds
            .iter()
            .map(|entry| (entry.name.to_lowercase(), entry.species.clone()))
            .collect();

        let symptoms = lexicon
            .symptoms
            .iter()
            .map(|entry| SymptomMatcher {
                key: entry.key.clone(),
                patterns: entry.synonyms.iter().map(|s| whole_word(s)).collect(),
            })
            .collect();

        let severities = lexicon
            .severities
            .iter()
            .map(|entry| {
                (
                    entry.level,
                    entry.terms.iter().map(|t| t.to_lowercase()).collect(),
                )
            })
            .collect();

        Self {
            animals,
            breeds,
            symptoms,
            severities,
        }
    }

    /// Extract demographics and symptoms. Text with no lexicon hits yields
    /// an empty symptom list and an all-unset PatientInfo.
    pub fn extract(&self, text: &str) -> Extraction {
        let lower = text.to_lowercase();

        let breed = self.extract_breed(&lower);
        let animal_type = self
            .extract_animal_type(text)
            .or_else(|| self.species_from_breed(breed.as_deref()));

        let patient = PatientInfo {
            animal_type,
            age: AGE_RE.find(text).map(|m| m.as_str().to_string()),
            breed,
            gender: self.extract_gender(text),
            weight: WEIGHT_RE.find(text).map(|m| m.as_str().to_string()),
        };

        Extraction {
            patient,
            symptoms: self.extract_symptoms(text),
            raw_text: text.to_string(),
        }
    }

    /// First table entry with any whole-word pattern hit wins; no scoring.
    fn extract_animal_type(&self, text: &str) -> Option<String> {
        for matcher in &self.animals {
            if matcher.patterns.iter().any(|p| p.is_match(text)) {
                return Some(matcher.animal.clone());
            }
        }
        None
    }

    fn species_from_breed(&self, breed: Option<&str>) -> Option<String> {
        let breed = breed?;
        self.breeds
            .iter()
            .find(|(name, _)| name == breed)
            .map(|(_, species)| species.clone())
    }

    /// First exact substring hit against the breed list; no fuzzy matching.
    fn extract_breed(&self, lower: &str) -> Option<String> {
        self.breeds
            .iter()
            .find(|(name, _)| lower.contains(name.as_str()))
            .map(|(name, _)| name.clone())
    }

    /// Male-indicating terms are checked before female-indicating ones; when
    /// both appear, male wins. Preserved as observed upstream behavior.
    fn extract_gender(&self, text: &str) -> Option<Gender> {
        if MALE_RE.is_match(text) {
            Some(Gender::Male)
        } else if FEMALE_RE.is_match(text) {
            Some(Gender::Female)
        } else {
            None
        }
    }

    fn extract_symptoms(&self, text: &str) -> Vec<SymptomRecord> {
        let mut records: Vec<SymptomRecord> = Vec::new();

        for matcher in &self.symptoms {
            for pattern in &matcher.patterns {
                for m in pattern.find_iter(text) {
                    let context = context_window(text, m.start(), m.end());
                    let candidate = SymptomRecord {
                        symptom_key: matcher.key.clone(),
                        duration: DURATION_RE.find(&context).map(|d| d.as_str().to_string()),
                        severity: self.severity_in(&context),
                        frequency: FREQUENCY_RE.find(&context).map(|f| f.as_str().to_string()),
                        context,
                    };
                    merge_candidate(&mut records, candidate);
                }
            }
        }

        records
    }

    /// First severity tier (table order) whose term appears in the window.
    fn severity_in(&self, context: &str) -> Option<Severity> {
        let lower = context.to_lowercase();
        for (level, terms) in &self.severities {
            if terms.iter().any(|t| lower.contains(t.as_str())) {
                return Some(*level);
            }
        }
        None
    }
}

fn whole_word(term: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))
        .expect("escaped pattern is a valid regex")
}

/// Original-case window around a match, clamped to char boundaries.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = floor_char_boundary(text, start.saturating_sub(CONTEXT_WINDOW));
    let to = ceil_char_boundary(text, (end + CONTEXT_WINDOW).min(text.len()));
    text[from..to].trim().to_string()
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// One record per canonical key: the candidate with the most non-null
/// modifier fields wins, ties go to the first-seen record. Fields are never
/// merged across occurrences.
fn merge_candidate(records: &mut Vec<SymptomRecord>, candidate: SymptomRecord) {
    match records
        .iter_mut()
        .find(|r| r.symptom_key == candidate.symptom_key)
    {
        Some(existing) => {
            if candidate.modifier_count() > existing.modifier_count() {
                *existing = candidate;
            }
        }
        None => records.push(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&Lexicon::builtin())
    }

    fn symptom<'a>(extraction: &'a Extraction, key: &str) -> Option<&'a SymptomRecord> {
        extraction.symptoms.iter().find(|s| s.symptom_key == key)
    }

    #[test]
    fn coughing_retriever_scenario() {
        let extraction =
            extractor().extract("My 3-year-old golden retriever has been coughing for a week.");

        assert_eq!(extraction.patient.animal_type.as_deref(), Some("dog"));
        assert_eq!(extraction.patient.age.as_deref(), Some("3-year-old"));
        assert_eq!(extraction.patient.breed.as_deref(), Some("golden retriever"));

        let cough = symptom(&extraction, "cough").expect("cough extracted");
        // "a week" carries no digits; the numeric-only duration regex leaves it unset.
        assert!(cough.duration.is_none());
    }

    #[test]
    fn gi_description_extracts_demographics_and_symptoms() {
        let text = "I have a 5 year old golden retriever male weighing about 65 lbs. \
                    He has been vomiting and has diarrhea for the past 3 days. \
                    He seems lethargic and is not eating well. He appears to have stomach pain. \
                    He also has a slight fever.";
        let extraction = extractor().extract(text);

        assert_eq!(extraction.patient.animal_type.as_deref(), Some("dog"));
        assert_eq!(extraction.patient.age.as_deref(), Some("5 year old"));
        assert_eq!(extraction.patient.breed.as_deref(), Some("golden retriever"));
        assert_eq!(extraction.patient.gender, Some(Gender::Male));
        assert_eq!(extraction.patient.weight.as_deref(), Some("65 lbs"));

        for key in ["vomiting", "diarrhea", "lethargy", "loss_of_appetite", "abdominal_pain", "fever"] {
            assert!(symptom(&extraction, key).is_some(), "missing {key}");
        }
        let fever = symptom(&extraction, "fever").unwrap();
        assert_eq!(fever.severity, Some(Severity::Mild));

        // The duration regex takes the first numeric span in the window, so a
        // window reaching back to "5 year old" reports that span.
        let vomiting = symptom(&extraction, "vomiting").unwrap();
        assert!(vomiting.duration.is_some());
    }

    #[test]
    fn one_record_per_canonical_key() {
        let extraction = extractor().extract("He keeps vomiting. She saw him vomit twice, and the vomiting continued.");
        assert_eq!(
            extraction.symptoms.iter().filter(|s| s.symptom_key == "vomiting").count(),
            1
        );
    }

    #[test]
    fn richer_occurrence_replaces_poorer_one() {
        // Two occurrences far enough apart that their context windows don't
        // overlap: the second carries two modifiers and must win.
        let filler = "The vet visit last spring went fine and nothing unusual showed up on any \
                      of the routine checks, bloodwork, or the physical examination they ran then.";
        let text = format!(
            "Rex started coughing 2 weeks ago. {filler} Lately the coughing is severe and happens daily."
        );
        let extraction = extractor().extract(&text);

        let cough = symptom(&extraction, "cough").expect("cough extracted");
        assert_eq!(cough.severity, Some(Severity::Severe));
        assert_eq!(cough.frequency.as_deref(), Some("daily"));
        assert!(cough.duration.is_none(), "fields are not merged across occurrences");
    }

    #[test]
    fn tie_keeps_first_seen_occurrence() {
        let filler = "Nothing else changed at home during that stretch and the household routine \
                      stayed exactly the same as it always has been through the year so far here.";
        let text =
            format!("Bella was coughing for 4 days. {filler} That coughing got severe overnight.");
        let extraction = extractor().extract(&text);

        let cough = symptom(&extraction, "cough").expect("cough extracted");
        assert_eq!(cough.duration.as_deref(), Some("for 4 days"));
        assert!(cough.severity.is_none());
    }

    #[test]
    fn male_wins_when_both_terms_present() {
        // Known bias carried over from the source data: male-indicating terms
        // are checked first even when both genders are mentioned.
        let extraction = extractor().extract("We have a male dog and a female dog at home.");
        assert_eq!(extraction.patient.gender, Some(Gender::Male));
    }

    #[test]
    fn female_detected_without_male_terms() {
        let extraction = extractor().extract("My 3-year-old female cat has been scratching for 2 weeks.");
        assert_eq!(extraction.patient.gender, Some(Gender::Female));
        assert_eq!(extraction.patient.animal_type.as_deref(), Some("cat"));
        let itching = symptom(&extraction, "itching").unwrap();
        assert_eq!(itching.duration.as_deref(), Some("for 2 weeks"));
    }

    #[test]
    fn explicit_animal_mention_beats_breed_species() {
        let extraction = extractor().extract("My dog chases the neighbor's persian around.");
        assert_eq!(extraction.patient.animal_type.as_deref(), Some("dog"));
        assert_eq!(extraction.patient.breed.as_deref(), Some("persian"));
    }

    #[test]
    fn cat_breed_implies_cat() {
        let extraction = extractor().extract("Our siamese has watery eyes.");
        assert_eq!(extraction.patient.animal_type.as_deref(), Some("cat"));
        assert!(symptom(&extraction, "discharge_eye").is_some());
    }

    #[test]
    fn empty_text_yields_empty_extraction() {
        let extraction = extractor().extract("");
        assert_eq!(extraction.patient, PatientInfo::default());
        assert!(extraction.symptoms.is_empty());
        assert_eq!(extraction.raw_text, "");
    }

    #[test]
    fn no_lexicon_hits_is_not_an_error() {
        let extraction = extractor().extract("The weather was pleasant all afternoon.");
        assert_eq!(extraction.patient, PatientInfo::default());
        assert!(extraction.symptoms.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "My 2-year-old male beagle has been coughing constantly for a week. \
                    He seems lethargic and has a fever.";
        let ex = extractor();
        assert_eq!(ex.extract(text), ex.extract(text));
    }

    #[test]
    fn whole_word_matching_rejects_embedded_terms() {
        // "catalog" must not read as "cat", "fitness" not as "fit".
        let extraction = extractor().extract("The catalog from the fitness store arrived.");
        assert!(extraction.patient.animal_type.is_none());
        assert!(extraction.symptoms.is_empty());
    }

    #[test]
    fn mixed_case_input_matches_and_context_keeps_original_case() {
        let extraction = extractor().extract("Milo Has Been VOMITING Since Monday.");
        let vomiting = symptom(&extraction, "vomiting").unwrap();
        assert!(vomiting.context.contains("VOMITING"));
    }

    #[test]
    fn multibyte_text_near_window_edges_does_not_panic() {
        // Long multi-byte runs on both sides put the ±100-byte window edges
        // inside characters; the window must clamp instead of panicking.
        let prefix = "é".repeat(80);
        let suffix = "🐕".repeat(40);
        let text = format!("{prefix} the dog was vomiting a lot {suffix}");
        let extraction = extractor().extract(&text);
        assert!(symptom(&extraction, "vomiting").is_some());
    }

    #[test]
    fn weight_accepts_decimal_kilograms() {
        let extraction = extractor().extract("She weighs 5.5 kg now.");
        assert_eq!(extraction.patient.weight.as_deref(), Some("5.5 kg"));
    }

    #[test]
    fn frequency_captured_from_window() {
        let extraction = extractor().extract("He has diarrhea twice a day lately.");
        let diarrhea = symptom(&extraction, "diarrhea").unwrap();
        assert_eq!(diarrhea.frequency.as_deref(), Some("twice a day"));
    }
}
