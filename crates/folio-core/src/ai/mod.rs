pub mod groq;

pub use groq::GroqClient;

use std::future::Future;

/// Anything that can turn one user message into reply text.
///
/// Implementations never fail: transport and credential problems are
/// converted into a user-legible apology string.
pub trait Completion {
    fn request_completion(&self, user_message: &str) -> impl Future<Output = String> + Send;
}
