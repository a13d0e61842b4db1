pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use config::ParleyConfig;
pub use context::{ConversationContext, LAST_INPUT_KEY};
pub use error::{ParleyError, Result};
pub use types::*;
