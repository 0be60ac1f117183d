pub mod ai;
pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod format;
pub mod state;
pub mod turn;

// Re-export main types for convenience
pub use ai::{Completion, GroqClient};
pub use config::Config;
pub use context::SYSTEM_CONTEXT;
pub use credential::CredentialLoader;
pub use error::ChatError;
pub use format::{escape_html, format_response};
pub use state::{ChatMessage, ChatRole, RequestState, Transcript};
pub use turn::{ChatSession, ChatSurface, Command, Step, TurnController};
