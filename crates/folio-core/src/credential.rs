//! Resolve-once API key loader.
//!
//! The key comes from the injected configuration when present, otherwise
//! from a `GROQ_API_KEY=...` line in a co-located plaintext resource. The
//! first resolution, successful or not, is cached for the rest of the
//! process; concurrent callers await the same in-flight attempt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use anyhow::{Result, anyhow};
use regex::Regex;
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

use crate::config::Config;

pub const API_KEY_NAME: &str = "GROQ_API_KEY";

fn key_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(?m)^{}=(.*)$", API_KEY_NAME)).expect("valid key pattern")
    })
}

/// Pull the trimmed `GROQ_API_KEY` value out of `KEY=value` text.
pub fn extract_api_key(text: &str) -> Option<String> {
    key_line_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

pub struct CredentialLoader {
    injected: Option<String>,
    env_location: String,
    client: Client,
    resolved: OnceCell<String>,
    attempts: AtomicUsize,
}

impl CredentialLoader {
    pub fn new(injected: Option<String>, env_location: &str) -> Self {
        Self {
            injected: injected
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            env_location: env_location.to_string(),
            client: Client::new(),
            resolved: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.injected_api_key(), config.env_location())
    }

    /// The API key, or an empty string when none could be found.
    pub async fn get_credential(&self) -> String {
        self.resolved.get_or_init(|| self.resolve()).await.clone()
    }

    /// How many times resolution actually ran. Never more than one.
    #[cfg(test)]
    pub(crate) fn resolution_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    async fn resolve(&self) -> String {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(key) = &self.injected {
            debug!("using injected API key");
            return key.clone();
        }

        match self.read_env_resource().await {
            Ok(text) => match extract_api_key(&text) {
                Some(key) => {
                    debug!(location = %self.env_location, "loaded API key");
                    key
                }
                None => {
                    warn!(location = %self.env_location, "no {} entry found", API_KEY_NAME);
                    String::new()
                }
            },
            Err(e) => {
                error!(location = %self.env_location, error = %e, "failed to load {}", API_KEY_NAME);
                String::new()
            }
        }
    }

    async fn read_env_resource(&self) -> Result<String> {
        let location = self.env_location.as_str();

        if location.starts_with("http://") || location.starts_with("https://") {
            let response = self.client.get(location).send().await?;
            if !response.status().is_success() {
                return Err(anyhow!("Cannot load {}: {}", location, response.status()));
            }
            Ok(response.text().await?)
        } else {
            Ok(tokio::fs::read_to_string(location).await?)
        }
    }
}
