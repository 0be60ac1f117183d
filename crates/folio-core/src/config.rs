use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_ENV_LOCATION: &str = ".env";

const DEFAULT_SUGGESTIONS: [&str; 4] = [
    "What are Hari's skills?",
    "Tell me about Hari's projects",
    "What is Hari's work experience?",
    "How can I contact Hari?",
];

/// Host-injected runtime configuration.
///
/// Every field is optional so an absent or partial `config.json` still
/// yields a working setup.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,
    /// URL or file path of the plaintext `KEY=value` resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Injected key, trimmed; `None` when absent or blank.
    pub fn injected_api_key(&self) -> Option<String> {
        self.groq_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    pub fn env_location(&self) -> &str {
        self.env_location.as_deref().unwrap_or(DEFAULT_ENV_LOCATION)
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(GROQ_BASE_URL)
    }

    pub fn suggestions(&self) -> Vec<String> {
        match &self.suggestions {
            Some(labels) if !labels.is_empty() => labels.clone(),
            _ => DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("folio").join("config.json"))
    }
}
