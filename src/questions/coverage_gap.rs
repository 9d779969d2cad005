use super::{QuestionContext, QuestionSource};
use crate::corpus::CorpusError;
use crate::models::enums::QuestionCategory;
use crate::models::FollowUpQuestion;

/// Screening probes for symptom groups the owner never mentioned. A probe is
/// suppressed as soon as any of its group's keys was extracted.
pub struct CoverageGapSource;

impl QuestionSource for CoverageGapSource {
    fn collect(&self, ctx: &QuestionContext<'_>) -> Result<Vec<FollowUpQuestion>, CorpusError> {
        let animal = ctx.animal();

        let probes: [(&[&str], String, u8, &str); 4] = [
            (
                &["loss_of_appetite", "dehydration"],
                format!("Have you noticed any changes in your {animal}'s appetite or drinking habits?"),
                4,
                "Appetite and hydration changes indicate systemic illness",
            ),
            (
                &["vomiting", "diarrhea"],
                format!("Is your {animal} experiencing any vomiting or diarrhea?"),
                4,
                "GI symptoms are very common and important for diagnosis",
            ),
            (
                &["fever", "lethargy"],
                "Have you noticed any fever, unusual energy levels, or lethargy?".to_string(),
                4,
                "These indicate systemic or infectious disease",
            ),
            (
                &["itching", "skin_lesion", "discharge_eye"],
                format!("Is your {animal} scratching, licking, or showing any skin or ear issues?"),
                3,
                "Dermatological issues are common and often missed",
            ),
        ];

        let mut questions = Vec::new();
        for (keys, question, priority, rationale) in probes {
            if !ctx.has_any_symptom(keys) {
                questions.push(FollowUpQuestion {
                    category: QuestionCategory::AdditionalSymptoms,
                    question,
                    priority,
                    rationale: rationale.into(),
                });
            }
        }

        Ok(questions)
    }
}
