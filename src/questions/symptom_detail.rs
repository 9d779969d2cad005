use super::{QuestionContext, QuestionSource};
use crate::corpus::CorpusError;
use crate::models::enums::QuestionCategory;
use crate::models::FollowUpQuestion;

/// Per-symptom probes for whichever modifiers the extractor could not find,
/// plus an unconditional progression question.
pub struct SymptomDetailSource;

impl QuestionSource for SymptomDetailSource {
    fn collect(&self, ctx: &QuestionContext<'_>) -> Result<Vec<FollowUpQuestion>, CorpusError> {
        let animal = ctx.animal();
        let mut questions = Vec::new();

        for symptom in ctx.symptoms {
            let display = symptom.display_name();

            if symptom.duration.is_none() {
                questions.push(FollowUpQuestion {
                    category: QuestionCategory::SymptomDetails,
                    question: format!("How long has your {animal} had {display}?"),
                    priority: 5,
                    rationale: format!("Duration of {display} is important for diagnosis"),
                });
            }

            if symptom.severity.is_none() {
                questions.push(FollowUpQuestion {
                    category: QuestionCategory::SymptomDetails,
                    question: format!("How severe is the {display} (mild, moderate, or severe)?"),
                    priority: 4,
                    rationale: "Severity helps assess urgency and disease progression".into(),
                });
            }

            if symptom.frequency.is_none() {
                questions.push(FollowUpQuestion {
                    category: QuestionCategory::SymptomDetails,
                    question: format!(
                        "How often is your {animal} experiencing {display} (daily, intermittent, etc.)?"
                    ),
                    priority: 3,
                    rationale: "Frequency patterns can indicate disease type".into(),
                });
            }

            questions.push(FollowUpQuestion {
                category: QuestionCategory::SymptomDetails,
                question: format!("Is the {display} getting worse, staying the same, or improving?"),
                priority: 3,
                rationale: "Progression indicates disease trajectory".into(),
            });
        }

        Ok(questions)
    }
}
