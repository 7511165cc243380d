//! Completion-service collaborator.
//!
//! The dashboard answers free-text questions by serializing the entire
//! dataset into a prompt and sending one request to an OpenAI-compatible
//! completion endpoint. One shot: no retry, no streaming.

pub mod client;
pub mod prompt;

pub use client::{ChatError, ChatOptions, CompletionClient};
pub use prompt::build_prompt;

/// Fixed user-facing reply when the completion service fails for any
/// reason. Deliberately non-diagnostic; details go to the log only.
pub const FALLBACK_REPLY: &str =
    "Sorry, I could not reach the answer service. Check your API key and try again.";
