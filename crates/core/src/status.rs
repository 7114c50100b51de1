use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::locale::{self, MessageKey};
use crate::models::{Action, AgentOutput, Language};

pub const REPAIR_STAGES: [&str; 7] = [
    "Checked in",
    "Assessment complete",
    "Parts ordered",
    "Panel beating in progress",
    "Spray painting",
    "Final polish and QA",
    "Ready for collection",
];

// Both patterns match anywhere in the text, including inside unrelated words.
static JOB_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z]{2,3}[-\s]?[0-9]{4,6}").expect("reference pattern"));
static REGISTRATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z]{2,3}\s?[0-9]{2,3}\s?[a-z]{2,3}").expect("registration pattern")
});
static FIRST_WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub reference: String,
    pub registration: Option<String>,
    pub stage_index: usize,
    pub stage: &'static str,
    pub min_days: usize,
    pub max_days: usize,
}

impl StatusReport {
    pub fn reply(&self, language: Language) -> String {
        locale::text(MessageKey::StatusReport, language)
            .replace("{reference}", &self.reference)
            .replace("{stage}", self.stage)
            .replace("{lower}", &self.min_days.to_string())
            .replace("{upper}", &self.max_days.to_string())
    }
}

pub fn normalize_reference(token: &str) -> String {
    FIRST_WHITESPACE_RUN
        .replacen(&token.to_uppercase(), 1, "-")
        .into_owned()
}

pub fn extract_reference(text: &str) -> Option<&str> {
    JOB_REFERENCE.find(text).map(|found| found.as_str())
}

pub fn extract_registration(text: &str) -> Option<&str> {
    REGISTRATION.find(text).map(|found| found.as_str())
}

// No job database: the stage is derived from the token lengths alone.
pub fn simulate_status(text: &str) -> Option<StatusReport> {
    let text = text.to_lowercase();
    let reference = normalize_reference(extract_reference(&text)?);
    let registration = extract_registration(&text).map(str::to_string);

    let registration_len = registration
        .as_deref()
        .map(|value| value.chars().count())
        .unwrap_or(0);
    let stage_index = (reference.chars().count() + registration_len) % REPAIR_STAGES.len();

    Some(StatusReport {
        reference,
        registration,
        stage_index,
        stage: REPAIR_STAGES[stage_index],
        min_days: 1 + stage_index % 3,
        max_days: 2 + stage_index % 4,
    })
}

pub fn apply_status_overlay(
    output: &mut AgentOutput,
    last_user_text: &str,
) -> Option<StatusReport> {
    if output.action != Some(Action::StatusLookup) {
        return None;
    }

    let report = simulate_status(last_user_text)?;
    output.reply = report.reply(output.language);
    output.suggestions = Some(locale::texts(
        &[MessageKey::ChipBookCarIn, MessageKey::ChipContactUs],
        output.language,
    ));
    Some(report)
}
