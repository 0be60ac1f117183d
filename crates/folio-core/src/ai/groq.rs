use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::ai::Completion;
use crate::config::Config;
use crate::context::SYSTEM_CONTEXT;
use crate::credential::CredentialLoader;
use crate::error::ChatError;

pub const MODEL: &str = "llama-3.3-70b-versatile";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 500;

#[derive(Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct GroqRequest<'a> {
    model: &'static str,
    messages: Vec<GroqMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Deserialize)]
struct GroqResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Every request carries exactly two messages: the fixed system context and
/// the current user message. Earlier turns are never replayed.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    credentials: Arc<CredentialLoader>,
}

impl GroqClient {
    pub fn new(base_url: &str, credentials: Arc<CredentialLoader>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.base_url(),
            Arc::new(CredentialLoader::from_config(config)),
        )
    }

    /// One completion round trip, with failures kept as typed errors.
    pub async fn try_complete(&self, user_message: &str) -> Result<String, ChatError> {
        let api_key = self.credentials.get_credential().await;
        if api_key.is_empty() {
            return Err(ChatError::CredentialUnavailable);
        }

        let request = GroqRequest {
            model: MODEL,
            messages: vec![
                GroqMessage {
                    role: "system",
                    content: SYSTEM_CONTEXT,
                },
                GroqMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = MODEL, "sending completion request");

        let response = self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let body = response.text().await?;
        let groq_response: GroqResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        groq_response.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::MalformedResponse("response has no choices".to_string()))
    }
}

impl Completion for GroqClient {
    async fn request_completion(&self, user_message: &str) -> String {
        match self.try_complete(user_message).await {
            Ok(content) => content,
            Err(ChatError::CredentialUnavailable) => {
                warn!("no API key available, skipping completion request");
                ChatError::CredentialUnavailable.apology().to_string()
            }
            Err(e) => {
                error!(error = %e, "completion request failed");
                e.apology().to_string()
            }
        }
    }
}
