//! Plain-text report rendering for the CLI and other presentation callers.

use crate::analysis::AnalysisReport;

const RULE: &str = "================================================================================";

/// Render an analysis report as a sectioned plain-text document.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(RULE.into());
    lines.push("VETERINARY TRIAGE ANALYSIS".into());
    lines.push(RULE.into());

    lines.push(String::new());
    lines.push("[PATIENT INFORMATION]".into());
    let patient = &report.patient;
    let mut any_field = false;
    if let Some(animal) = &patient.animal_type {
        lines.push(format!("  Animal Type: {}", title_case(animal)));
        any_field = true;
    }
    if let Some(age) = &patient.age {
        lines.push(format!("  Age: {age}"));
        any_field = true;
    }
    if let Some(breed) = &patient.breed {
        lines.push(format!("  Breed: {}", title_case(breed)));
        any_field = true;
    }
    if let Some(gender) = &patient.gender {
        lines.push(format!("  Gender: {}", title_case(gender.as_str())));
        any_field = true;
    }
    if let Some(weight) = &patient.weight {
        lines.push(format!("  Weight: {weight}"));
        any_field = true;
    }
    if !any_field {
        lines.push("  Not mentioned".into());
    }

    lines.push(String::new());
    lines.push("[EXTRACTED SYMPTOMS]".into());
    if report.symptoms.is_empty() {
        lines.push("  No symptoms extracted".into());
    } else {
        for symptom in &report.symptoms {
            let mut details = Vec::new();
            if let Some(duration) = &symptom.duration {
                details.push(format!("Duration: {duration}"));
            }
            if let Some(severity) = &symptom.severity {
                details.push(format!("Severity: {}", severity.as_str()));
            }
            if let Some(frequency) = &symptom.frequency {
                details.push(format!("Frequency: {frequency}"));
            }
            let detail = if details.is_empty() {
                String::new()
            } else {
                format!(" ({})", details.join(", "))
            };
            lines.push(format!("  - {}{detail}", title_case(&symptom.display_name())));
        }
    }

    lines.push(String::new());
    lines.push("[POSSIBLE CONDITIONS]".into());
    if report.corpus_matches.is_empty() {
        lines.push("  No matching conditions found in the reference corpus".into());
    } else {
        for (i, matched) in report.corpus_matches.iter().take(3).enumerate() {
            lines.push(format!("  {}. {}", i + 1, matched.disease.name));
            lines.push(format!("     Confidence: {:.1}%", matched.confidence * 100.0));
            lines.push(format!(
                "     Severity: {}",
                title_case(matched.disease.severity.as_str())
            ));
            lines.push(format!("     Description: {}", matched.disease.description));
            lines.push(format!("     Treatment: {}", matched.disease.treatment));
        }
    }

    lines.push(String::new());
    lines.push("[CLINICAL ASSESSMENT]".into());
    let rec = &report.recommendation;
    lines.push(format!(
        "  Urgency: {} - {}",
        rec.urgency.as_str().to_uppercase(),
        rec.urgency.guidance()
    ));

    lines.push(String::new());
    lines.push("[RECOMMENDED ACTIONS]".into());
    for action in &rec.actions {
        lines.push(format!("  - {action}"));
    }

    if !rec.notes.is_empty() {
        lines.push(String::new());
        lines.push("[IMPORTANT NOTES]".into());
        for note in &rec.notes {
            lines.push(format!("  - {note}"));
        }
    }

    lines.push(String::new());
    lines.push("[EMERGENCY SIGNS - SEEK IMMEDIATE CARE IF]".into());
    for sign in rec.emergency_signs.iter().take(5) {
        lines.push(format!("  * {sign}"));
    }

    lines.push(String::new());
    lines.push("[FOLLOW-UP QUESTIONS]".into());
    if report.questions.is_empty() {
        lines.push("  No follow-up questions generated".into());
    } else {
        for (i, question) in report.questions.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, question.question));
        }
    }

    lines.push(String::new());
    lines.push(RULE.into());
    lines.push(
        "NOTE: This analysis is for informational purposes only and should not".into(),
    );
    lines.push("replace professional veterinary diagnosis and treatment.".into());
    lines.push(RULE.into());

    lines.join("\n")
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
