pub mod disease;
pub mod enums;
pub mod patient;
pub mod question;
pub mod symptom;

pub use disease::{CorpusMatch, DiseaseCandidate, DiseaseRecord};
pub use patient::PatientInfo;
pub use question::FollowUpQuestion;
pub use symptom::SymptomRecord;
