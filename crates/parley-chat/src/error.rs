//! Error types for the conversation engine.

use parley_core::ParleyError;

/// Errors from a conversation turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("classification failed: {0}")]
    Classification(String),
    #[error("handler for '{intent}' failed: {message}")]
    Handler { intent: String, message: String },
    #[error("knowledge lookup failed: {0}")]
    Knowledge(String),
    #[error(transparent)]
    Core(#[from] ParleyError),
}

impl ChatError {
    pub fn handler(intent: impl Into<String>, message: impl Into<String>) -> Self {
        ChatError::Handler {
            intent: intent.into(),
            message: message.into(),
        }
    }
}
