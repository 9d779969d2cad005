use serde::{Deserialize, Serialize};

use super::enums::Gender;

/// Demographic details extracted from the owner's description.
/// Every field is optional: absence means "not mentioned", never a negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub animal_type: Option<String>,
    pub age: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub weight: Option<String>,
}

impl PatientInfo {
    /// Display name used inside generated question text ("your dog" / "your pet").
    pub fn animal_display(&self) -> &str {
        self.animal_type.as_deref().unwrap_or("pet")
    }
}
