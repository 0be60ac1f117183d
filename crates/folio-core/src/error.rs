use reqwest::StatusCode;
use thiserror::Error;

/// Shown when no API key could be resolved.
pub const CREDENTIAL_APOLOGY: &str = "I apologize, but I can't access the GROQ API key right now. Please confirm the .env file is accessible.";

/// Shown for any transport, status, or response-shape failure.
pub const CONNECTION_APOLOGY: &str = "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

/// Failures of a single completion turn.
///
/// None of these ever reach the embedding host: `GroqClient::request_completion`
/// logs them and substitutes [`ChatError::apology`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("GROQ API key is not configured")]
    CredentialUnavailable,

    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected completion response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Everything except a missing key is a network or protocol failure.
    pub fn is_network_or_protocol(&self) -> bool {
        !matches!(self, ChatError::CredentialUnavailable)
    }

    /// The fixed, user-legible text that replaces this failure in the transcript.
    pub fn apology(&self) -> &'static str {
        if self.is_network_or_protocol() {
            CONNECTION_APOLOGY
        } else {
            CREDENTIAL_APOLOGY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apology_depends_on_failure_family() {
        assert_eq!(ChatError::CredentialUnavailable.apology(), CREDENTIAL_APOLOGY);

        let status = ChatError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert!(status.is_network_or_protocol());
        assert_eq!(status.apology(), CONNECTION_APOLOGY);

        let malformed = ChatError::MalformedResponse("no choices".into());
        assert_eq!(malformed.apology(), CONNECTION_APOLOGY);
    }
}
