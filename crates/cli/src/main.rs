use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panel_agents::ShopAssistant;
use panel_core::{AgentInput, AgentOutput, Conversation, Language, Message};
use panel_observability::{init_tracing_with_filter, AppMetrics};
use reqwest::Client;

#[derive(Debug, Parser)]
#[command(name = "assistant")]
#[command(about = "De Jongh’s Panelbeating Centre chat assistant")]
struct Cli {
    /// Base URL of a running API; without it replies are computed in-process.
    #[arg(long, env = "PANEL_SERVER_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat {
        #[arg(long, default_value = "en", value_parser = parse_language)]
        language: Language,
    },
    Ask {
        text: String,
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,
    },
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::from_optional_str(Some(value))
        .ok_or_else(|| format!("unsupported language {value:?}, expected en or af"))
}

enum Backend {
    Local(ShopAssistant),
    Remote { client: Client, endpoint: String },
}

impl Backend {
    fn new(server: Option<String>) -> Self {
        match server {
            Some(base) => Self::Remote {
                client: Client::new(),
                endpoint: format!("{}/api/chat", base.trim_end_matches('/')),
            },
            None => Self::Local(ShopAssistant::new(AppMetrics::shared())),
        }
    }

    async fn send(&self, input: AgentInput) -> Result<AgentOutput> {
        match self {
            Self::Local(agent) => agent.handle_chat(input).await,
            Self::Remote { client, endpoint } => {
                let response = client
                    .post(endpoint)
                    .json(&input)
                    .send()
                    .await
                    .with_context(|| format!("request to {endpoint} failed"))?
                    .error_for_status()?;
                Ok(response.json::<AgentOutput>().await?)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_with_filter("warn");
    let cli = Cli::parse();
    let backend = Backend::new(cli.server);

    match cli.command {
        Command::Chat { language } => run_chat(&backend, language).await?,
        Command::Ask { text, language } => {
            let input = AgentInput::new(language, vec![Message::user(text)]);
            let output = backend.send(input).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

async fn run_chat(backend: &Backend, language: Language) -> Result<()> {
    let mut conversation = Conversation::new(language);

    if let Some(greeting) = conversation.entries().first() {
        println!("\n{}\n", greeting.message.content);
    }
    print_chips(conversation.starter_suggestions().iter().copied());
    println!("type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let Ok(request) = conversation.push_user(message) else {
            continue;
        };

        match backend.send(request).await {
            Ok(output) => {
                conversation.apply_reply(&output);
                println!("\n{}\n", output.reply);
                if let Some(suggestions) = output.suggestions.as_ref() {
                    print_chips(suggestions.iter().map(String::as_str));
                }
            }
            Err(error) => {
                tracing::warn!(error = ?error, "chat request failed");
                println!("\n{}\n", conversation.apply_failure());
            }
        }
    }

    Ok(())
}

fn print_chips<'a>(chips: impl Iterator<Item = &'a str>) {
    let chips = chips.map(|chip| format!("[{chip}]")).collect::<Vec<_>>();
    if !chips.is_empty() {
        println!("{}", chips.join(" "));
    }
}
