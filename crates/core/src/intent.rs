use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::locale::{self, ListKey, MessageKey};
use crate::models::{Action, AgentInput, AgentOutput, Language};

fn pattern(source: &str) -> Regex {
    Regex::new(&format!("(?i){source}")).expect("keyword pattern must compile")
}

static AFRIKAANS_HINTS: Lazy<Regex> = Lazy::new(|| {
    pattern(
        "(asseblief|dankie|bespreking|kar|motor|wer(k|kstatus)|hoe lank|watter|vers(ekering|ekerings)|skatting|verf|roes|spuit|paneel|klop|regmaak)",
    )
});

static GREETING: Lazy<Regex> =
    Lazy::new(|| pattern("(hello|hi|morning|afternoon|howzit|hey|goeie dag|hallo)"));
static SERVICES: Lazy<Regex> =
    Lazy::new(|| pattern("(services?|do you offer|what do you do|dienste|watter)"));
static ESTIMATE: Lazy<Regex> =
    Lazy::new(|| pattern("(estimate|quote|price|cost|skat(ting)?|kwotasie)"));
static BOOKING: Lazy<Regex> =
    Lazy::new(|| pattern("(book|booking|schedule|bespre(k|king)|maak.*bespreking)"));
static STATUS: Lazy<Regex> = Lazy::new(|| {
    pattern("(status|progress|update|ref(erence)?|job|werkstatus|vordering)")
});
static TIPS: Lazy<Regex> =
    Lazy::new(|| pattern("(tips?|care|maintenance|protect|seël|versorg|wenke)"));
static INSURANCE: Lazy<Regex> =
    Lazy::new(|| pattern("(insurance|claim|assessor|verzeker|versekering|eis)"));
static TURNAROUND: Lazy<Regex> =
    Lazy::new(|| pattern("(how long|turnaround|timeline|hoe lank|tydlyn)"));
static PHOTOS: Lazy<Regex> = Lazy::new(|| pattern("(photo|image|picture|foto|prent)"));
static DAMAGE: Lazy<Regex> = Lazy::new(|| pattern("(damage|dent|scratch|roes|duik)"));

pub fn normalize_text(input: &str) -> String {
    input.to_lowercase()
}

pub fn detect_language(text: &str, fallback: Language) -> Language {
    if AFRIKAANS_HINTS.is_match(text) {
        Language::Af
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Services,
    Estimate,
    Booking,
    Status,
    Insurance,
    Turnaround,
    Tips,
    Fallback,
}

impl Intent {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Services => "services",
            Self::Estimate => "estimate",
            Self::Booking => "booking",
            Self::Status => "status",
            Self::Insurance => "insurance",
            Self::Turnaround => "turnaround",
            Self::Tips => "tips",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub greeting: bool,
    pub services: bool,
    pub estimate: bool,
    pub booking: bool,
    pub status: bool,
    pub tips: bool,
    pub insurance: bool,
    pub turnaround: bool,
    pub photos: bool,
    pub damage: bool,
}

impl Signals {
    pub fn scan(text: &str) -> Self {
        Self {
            greeting: GREETING.is_match(text),
            services: SERVICES.is_match(text),
            estimate: ESTIMATE.is_match(text),
            booking: BOOKING.is_match(text),
            status: STATUS.is_match(text),
            tips: TIPS.is_match(text),
            insurance: INSURANCE.is_match(text),
            turnaround: TURNAROUND.is_match(text),
            photos: PHOTOS.is_match(text),
            damage: DAMAGE.is_match(text),
        }
    }
}

struct Rule {
    intent: Intent,
    matches: fn(&Signals) -> bool,
}

// Predicates overlap, so order is part of the behaviour.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Greeting,
        matches: |s| s.greeting && !s.services && !s.estimate && !s.booking && !s.status,
    },
    Rule {
        intent: Intent::Services,
        matches: |s| s.services,
    },
    Rule {
        intent: Intent::Estimate,
        matches: |s| s.estimate || (s.photos && s.damage),
    },
    Rule {
        intent: Intent::Booking,
        matches: |s| s.booking,
    },
    Rule {
        intent: Intent::Status,
        matches: |s| s.status,
    },
    Rule {
        intent: Intent::Insurance,
        matches: |s| s.insurance,
    },
    Rule {
        intent: Intent::Turnaround,
        matches: |s| s.turnaround,
    },
    Rule {
        intent: Intent::Tips,
        matches: |s| s.tips,
    },
];

pub fn classify_signals(signals: &Signals) -> Intent {
    RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}

pub fn classify_intent(text: &str) -> Intent {
    classify_signals(&Signals::scan(text))
}

enum ReplyBody {
    Text(MessageKey),
    Listing {
        intro: MessageKey,
        items: ListKey,
        outro: Option<MessageKey>,
    },
}

struct ReplyTemplate {
    action: Action,
    body: ReplyBody,
    fields: &'static [&'static str],
    chips: &'static [MessageKey],
}

fn template(intent: Intent) -> ReplyTemplate {
    match intent {
        Intent::Greeting => ReplyTemplate {
            action: Action::GeneralInfo,
            body: ReplyBody::Text(MessageKey::GreetingReply),
            fields: &[],
            chips: &[
                MessageKey::ChipGetEstimate,
                MessageKey::ChipListServices,
                MessageKey::ChipBookCarIn,
            ],
        },
        Intent::Services => ReplyTemplate {
            action: Action::ListServices,
            body: ReplyBody::Listing {
                intro: MessageKey::ServicesIntro,
                items: ListKey::Services,
                outro: Some(MessageKey::ServicesOutro),
            },
            fields: &[],
            chips: &[
                MessageKey::ChipGetEstimate,
                MessageKey::ChipBookCarIn,
                MessageKey::ChipInsuranceHelp,
            ],
        },
        Intent::Estimate => ReplyTemplate {
            action: Action::EstimateFlow,
            body: ReplyBody::Text(MessageKey::EstimateReply),
            fields: &[
                "vehicleMakeModel",
                "vehicleYear",
                "damageType",
                "damageLocation",
                "photos",
            ],
            chips: &[MessageKey::ChipBookInspection, MessageKey::ChipInsuranceHelp],
        },
        Intent::Booking => ReplyTemplate {
            action: Action::BookingFlow,
            body: ReplyBody::Text(MessageKey::BookingReply),
            fields: &[
                "fullName",
                "phone",
                "preferredDate",
                "vehicleMakeModel",
                "notes",
            ],
            chips: &[MessageKey::ChipShareDetails],
        },
        Intent::Status => ReplyTemplate {
            action: Action::StatusLookup,
            body: ReplyBody::Text(MessageKey::StatusPrompt),
            fields: &["jobRef", "vehicleReg"],
            chips: &[MessageKey::ChipReferenceExample],
        },
        Intent::Insurance => ReplyTemplate {
            action: Action::InsuranceInfo,
            body: ReplyBody::Text(MessageKey::InsuranceReply),
            fields: &[],
            chips: &[MessageKey::ChipGetEstimate],
        },
        Intent::Turnaround => ReplyTemplate {
            action: Action::GeneralInfo,
            body: ReplyBody::Text(MessageKey::TurnaroundReply),
            fields: &[],
            chips: &[MessageKey::ChipBookCarIn],
        },
        Intent::Tips => ReplyTemplate {
            action: Action::Tips,
            body: ReplyBody::Listing {
                intro: MessageKey::TipsIntro,
                items: ListKey::Tips,
                outro: None,
            },
            fields: &[],
            chips: &[MessageKey::ChipListServices],
        },
        Intent::Fallback => ReplyTemplate {
            action: Action::GeneralInfo,
            body: ReplyBody::Text(MessageKey::DefaultReply),
            fields: &[],
            chips: &[MessageKey::ChipGetEstimate, MessageKey::ChipBookCarIn],
        },
    }
}

fn render_body(body: &ReplyBody, language: Language) -> String {
    match body {
        ReplyBody::Text(key) => locale::text(*key, language).to_string(),
        ReplyBody::Listing {
            intro,
            items,
            outro,
        } => {
            let mut reply = format!(
                "{}\n{}",
                locale::text(*intro, language),
                locale::bullet_list(locale::items(*items, language))
            );
            if let Some(outro) = outro {
                reply.push_str("\n\n");
                reply.push_str(locale::text(*outro, language));
            }
            reply
        }
    }
}

pub fn compose_reply(intent: Intent, language: Language) -> AgentOutput {
    let template = template(intent);
    let fields_requested = if template.fields.is_empty() {
        None
    } else {
        Some(template.fields.iter().map(|field| field.to_string()).collect())
    };

    AgentOutput {
        reply: render_body(&template.body, language),
        language,
        action: Some(template.action),
        fields_requested,
        suggestions: Some(locale::texts(template.chips, language)),
    }
}

/// Result of classifying one request, before any transport-level overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub output: AgentOutput,
}

pub fn classify(input: &AgentInput) -> Classification {
    let text = normalize_text(input.last_user_text().unwrap_or_default());
    let language = detect_language(&text, input.language.unwrap_or_default());
    let intent = classify_intent(&text);

    Classification {
        intent,
        output: compose_reply(intent, language),
    }
}

pub fn run_agent(input: &AgentInput) -> AgentOutput {
    classify(input).output
}
