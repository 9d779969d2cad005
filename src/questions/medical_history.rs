use super::{QuestionContext, QuestionSource};
use crate::corpus::CorpusError;
use crate::models::enums::QuestionCategory;
use crate::models::FollowUpQuestion;

/// Fixed medical-history and lifestyle questions, always asked.
pub struct MedicalHistorySource;

impl QuestionSource for MedicalHistorySource {
    fn collect(&self, ctx: &QuestionContext<'_>) -> Result<Vec<FollowUpQuestion>, CorpusError> {
        let animal = ctx.animal();
        Ok(vec![
            FollowUpQuestion {
                category: QuestionCategory::MedicalHistory,
                question: format!("Is your {animal} on any current medications or supplements?"),
                priority: 4,
                rationale: "Medications can interact with treatments and mask symptoms".into(),
            },
            FollowUpQuestion {
                category: QuestionCategory::MedicalHistory,
                question: format!("Does your {animal} have any known allergies or sensitivities?"),
                priority: 4,
                rationale: "Allergies can cause or complicate symptoms".into(),
            },
            FollowUpQuestion {
                category: QuestionCategory::Lifestyle,
                question: format!("What type of food and diet is your {animal} on?"),
                priority: 3,
                rationale: "Diet directly impacts gastrointestinal and systemic health".into(),
            },
            FollowUpQuestion {
                category: QuestionCategory::Lifestyle,
                question: "Has there been any recent change in diet, environment, or routine?"
                    .into(),
                priority: 3,
                rationale: "Changes often trigger acute illness or symptom onset".into(),
            },
        ])
    }
}
