use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX: usize = 120;
// Browser clients send attachment data URLs inside the message list.
const DEFAULT_BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub body_limit_bytes: usize,
    /// Key the rate limiter on the first `X-Forwarded-For` entry instead of
    /// the peer address. Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            rate_limit_window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            trust_forwarded_for: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their
    /// defaults, malformed numbers are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind = lookup("PANEL_BIND")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.bind);

        let allowed_origins = lookup("PANEL_ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.allowed_origins);

        let rate_limit_window = parse_var::<u64>(&lookup, "PANEL_RATE_LIMIT_WINDOW_SECONDS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_limit_window);
        let rate_limit_max = parse_var::<usize>(&lookup, "PANEL_RATE_LIMIT_MAX")?
            .unwrap_or(defaults.rate_limit_max);
        let body_limit_bytes = parse_var::<usize>(&lookup, "PANEL_BODY_LIMIT_BYTES")?
            .unwrap_or(defaults.body_limit_bytes);
        let trust_forwarded_for = parse_var::<bool>(&lookup, "PANEL_TRUST_FORWARDED_FOR")?
            .unwrap_or(defaults.trust_forwarded_for);

        Ok(Self {
            bind,
            allowed_origins,
            rate_limit_window,
            rate_limit_max,
            body_limit_bytes,
            trust_forwarded_for,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {key}: {value:?}"))
        })
        .transpose()
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
