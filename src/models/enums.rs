use crate::corpus::CorpusError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serialized form matches as_str so exported JSON carries plain string enums.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = CorpusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(CorpusError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(Urgency {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Urgent => "urgent",
});

impl Urgency {
    /// Owner-facing advice sentence for this urgency tier.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Low => "Monitor and schedule an appointment if symptoms persist",
            Self::Moderate => "Schedule a veterinary appointment within 24-48 hours",
            Self::High => "Schedule a veterinary appointment soon",
            Self::Urgent => "Immediate veterinary consultation recommended",
        }
    }
}

str_enum!(QuestionCategory {
    SymptomDetails => "symptom_details",
    AdditionalSymptoms => "additional_symptoms",
    DiseaseConfirmation => "disease_confirmation",
    MedicalHistory => "medical_history",
    Lifestyle => "lifestyle",
    TreatmentHistory => "treatment_history",
    SymptomSeverity => "symptom_severity",
});

str_enum!(SymptomCategory {
    Gastrointestinal => "gastrointestinal",
    Respiratory => "respiratory",
    Dermatological => "dermatological",
    Neurological => "neurological",
    Ocular => "ocular",
    General => "general",
});
