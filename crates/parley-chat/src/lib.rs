//! Conversation orchestration for Parley.
//!
//! A [`ChatEngine`] segments input into sentences, classifies each one,
//! fans the utterance out to every matching handler in its
//! [`HandlerRegistry`], and expands `{{variable}}` tokens in the collected
//! replies from the session's context.

pub mod engine;
pub mod error;
pub mod handler;
pub mod knowledge;
pub mod logic;
pub mod memory;
pub mod registry;
pub mod session;
pub mod substitution;

pub use engine::{ChatEngine, Input};
pub use error::ChatError;
pub use handler::{FnHandler, Reply, ReplyHandler};
pub use knowledge::{DirectoryKnowledge, KnowledgeSource, NoKnowledge};
pub use logic::{default_registry, default_registry_with, WhatIsHandler};
pub use registry::HandlerRegistry;
pub use session::Session;
