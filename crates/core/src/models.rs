use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Af,
}

impl Language {
    /// Lenient parse used by query strings and CLI flags. Anything that is not
    /// recognisably Afrikaans or English yields `None`.
    pub fn from_optional_str(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "en" || v == "en-za" || v == "english" => Some(Self::En),
            Some(v) if v == "af" || v == "af-za" || v == "afrikaans" => Some(Self::Af),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Af => "af",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub messages: Vec<Message>,
}

impl AgentInput {
    pub fn new(language: Option<Language>, messages: Vec<Message>) -> Self {
        Self { language, messages }
    }

    /// Content of the most recent user-authored message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GeneralInfo,
    ListServices,
    EstimateFlow,
    BookingFlow,
    StatusLookup,
    Tips,
    InsuranceInfo,
}

impl Action {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::GeneralInfo => "general_info",
            Self::ListServices => "list_services",
            Self::EstimateFlow => "estimate_flow",
            Self::BookingFlow => "booking_flow",
            Self::StatusLookup => "status_lookup",
            Self::Tips => "tips",
            Self::InsuranceInfo => "insurance_info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOutput {
    pub reply: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_requested: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl AgentOutput {
    /// Payload returned to clients when request processing fails.
    pub fn server_error() -> Self {
        Self {
            reply: "Server error".to_string(),
            language: Language::En,
            action: None,
            fields_requested: None,
            suggestions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub language: Language,
    pub greeting: String,
    pub suggestions: Vec<String>,
    pub brand: Brand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub company: String,
    pub tagline: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_omits_absent_fields_and_uses_camel_case() {
        let output = AgentOutput {
            reply: "ok".to_string(),
            language: Language::Af,
            action: Some(Action::BookingFlow),
            fields_requested: Some(vec!["phone".to_string()]),
            suggestions: None,
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "reply": "ok",
                "language": "af",
                "action": "booking_flow",
                "fieldsRequested": ["phone"]
            })
        );
    }

    #[test]
    fn input_ignores_browser_only_fields() {
        let input: AgentInput = serde_json::from_value(json!({
            "messages": [
                { "id": "abc", "role": "user", "content": "hallo", "timestamp": 17 }
            ]
        }))
        .unwrap();

        assert_eq!(input.language, None);
        assert_eq!(input.last_user_text(), Some("hallo"));
    }

    #[test]
    fn parses_language_aliases() {
        assert_eq!(Language::from_optional_str(Some(" AF ")), Some(Language::Af));
        assert_eq!(Language::from_optional_str(Some("english")), Some(Language::En));
        assert_eq!(Language::from_optional_str(Some("fr")), None);
        assert_eq!(Language::from_optional_str(None), None);
    }
}
