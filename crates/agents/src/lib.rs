use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use panel_core::locale::{self, ListKey, MessageKey};
use panel_core::{
    apply_status_overlay, classify, AgentInput, AgentOutput, Brand, Intent, Language,
    WelcomeMessage,
};
use panel_observability::AppMetrics;
use serde::Serialize;
use tracing::{info, instrument};

/// Everything a transport needs to know about one handled message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub intent: Intent,
    pub status_simulated: bool,
    pub output: AgentOutput,
}

#[derive(Clone)]
pub struct ShopAssistant {
    metrics: Arc<AppMetrics>,
}

impl ShopAssistant {
    pub fn new(metrics: Arc<AppMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    /// Transport entry point. Classification itself never fails, so this
    /// currently always returns `Ok`; the async `Result` signature is the one
    /// the HTTP handler and the remote CLI backend share.
    pub async fn handle_chat(&self, input: AgentInput) -> Result<AgentOutput> {
        Ok(self.respond(&input).output)
    }

    /// Classifies the latest user message, then swaps in a simulated job
    /// status when the customer already quoted a reference.
    #[instrument(skip_all, fields(messages = input.messages.len()))]
    pub fn respond(&self, input: &AgentInput) -> ChatOutcome {
        let started = Instant::now();
        self.metrics.inc_request();

        let classification = classify(input);
        let mut output = classification.output;
        let report = apply_status_overlay(&mut output, input.last_user_text().unwrap_or_default());

        if classification.intent == Intent::Fallback {
            self.metrics.inc_fallback();
        }
        if report.is_some() {
            self.metrics.inc_status_overlay();
        }

        self.metrics.observe_latency(started.elapsed());
        info!(
            language = %output.language.as_code(),
            intent = %classification.intent.as_code(),
            action = output.action.map(|action| action.as_code()).unwrap_or("none"),
            status_simulated = report.is_some(),
            "chat handled"
        );

        ChatOutcome {
            intent: classification.intent,
            status_simulated: report.is_some(),
            output,
        }
    }

    pub fn welcome(&self, language: Language) -> WelcomeMessage {
        WelcomeMessage {
            language,
            greeting: locale::text(MessageKey::InitialGreeting, language).to_string(),
            suggestions: locale::items(ListKey::Starters, language)
                .iter()
                .map(|item| item.to_string())
                .collect(),
            brand: Brand {
                company: locale::text(MessageKey::BrandName, language).to_string(),
                tagline: locale::text(MessageKey::BrandTagline, language).to_string(),
            },
        }
    }
}
