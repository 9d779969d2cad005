use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// One extracted symptom, unique per canonical key within an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    /// Canonical symptom key, e.g. `loss_of_appetite`.
    pub symptom_key: String,
    /// Verbatim duration span from the surrounding text, e.g. "for 3 days".
    pub duration: Option<String>,
    pub severity: Option<Severity>,
    pub frequency: Option<String>,
    /// Original-case text window around the match, for display.
    pub context: String,
}

impl SymptomRecord {
    /// Number of modifier fields present. Dedup keeps the record with the
    /// highest count; ties go to the first-seen record.
    pub fn modifier_count(&self) -> usize {
        usize::from(self.duration.is_some())
            + usize::from(self.severity.is_some())
            + usize::from(self.frequency.is_some())
    }

    /// Human-readable form of the canonical key ("loss of appetite").
    pub fn display_name(&self) -> String {
        self.symptom_key.replace('_', " ")
    }
}
