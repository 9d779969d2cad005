use serde::{Deserialize, Serialize};

use super::enums::QuestionCategory;

/// A prioritized follow-up question for the pet owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpQuestion {
    pub category: QuestionCategory,
    pub question: String,
    /// 1-5, higher asks sooner.
    pub priority: u8,
    /// Why the question is worth asking.
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_serializes_category_as_string() {
        let q = FollowUpQuestion {
            category: QuestionCategory::DiseaseConfirmation,
            question: "Is your dog up to date on vaccinations?".into(),
            priority: 4,
            rationale: "Vaccination status matters for infectious disease".into(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["category"], "disease_confirmation");
        assert_eq!(json["priority"], 4);
    }
}
