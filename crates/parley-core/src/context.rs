//! Per-session conversation state.
//!
//! A [`ConversationContext`] holds free-form scratch fields that handlers and
//! classifiers read and write, plus the associative reply memory keyed by
//! lexical signatures. One context belongs to exactly one conversation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved memory key holding the most recently recorded input sentence.
pub const LAST_INPUT_KEY: &str = "last_input";

/// Mutable state of one conversation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Free-form fields such as `user_name` or `last_result`.
    #[serde(default)]
    pub scratch: Map<String, Value>,
    /// Signature -> remembered reply, plus [`LAST_INPUT_KEY`].
    #[serde(default)]
    pub memory: HashMap<String, String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a scratch field. A JSON `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scratch.get(key).filter(|v| !v.is_null())
    }

    /// Look up a scratch field holding a non-empty string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.scratch.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.scratch.remove(key)
    }

    /// Store `reply` under `signature` and remember `input` as the last input.
    pub fn remember(&mut self, signature: String, reply: impl Into<String>, input: &str) {
        self.memory.insert(signature, reply.into());
        self.memory
            .insert(LAST_INPUT_KEY.to_string(), input.to_string());
    }

    /// Reply previously stored under `signature`.
    pub fn recall(&self, signature: &str) -> Option<&str> {
        self.memory.get(signature).map(String::as_str)
    }

    pub fn last_input(&self) -> Option<&str> {
        self.recall(LAST_INPUT_KEY)
    }

    pub fn clear_memory(&mut self) {
        self.memory.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = ConversationContext::new();
        assert!(ctx.scratch.is_empty());
        assert!(ctx.memory.is_empty());
        assert!(ctx.last_input().is_none());
    }

    #[test]
    fn test_set_and_get_scratch() {
        let mut ctx = ConversationContext::new();
        ctx.set("user_name", "Ana");
        ctx.set("turns", 3);
        assert_eq!(ctx.get_str("user_name"), Some("Ana"));
        assert_eq!(ctx.get("turns"), Some(&json!(3)));
        assert!(ctx.get_str("turns").is_none());
    }

    #[test]
    fn test_null_and_empty_count_as_absent() {
        let mut ctx = ConversationContext::new();
        ctx.set("last_result", Value::Null);
        ctx.set("user_name", "");
        assert!(ctx.get("last_result").is_none());
        assert!(ctx.get_str("user_name").is_none());
        assert!(ctx.get("user_name").is_some());
    }

    #[test]
    fn test_remove_scratch() {
        let mut ctx = ConversationContext::new();
        ctx.set("user_name", "Ana");
        assert_eq!(ctx.remove("user_name"), Some(json!("Ana")));
        assert!(ctx.get("user_name").is_none());
    }

    #[test]
    fn test_remember_sets_last_input() {
        let mut ctx = ConversationContext::new();
        ctx.remember("catlike".to_string(), "Yes", "Do you like cats?");
        assert_eq!(ctx.recall("catlike"), Some("Yes"));
        assert_eq!(ctx.last_input(), Some("Do you like cats?"));

        ctx.remember("dogwalk".to_string(), "No", "Do you walk dogs?");
        assert_eq!(ctx.last_input(), Some("Do you walk dogs?"));
        assert_eq!(ctx.recall("catlike"), Some("Yes"));
    }

    #[test]
    fn test_recall_missing_is_none() {
        let ctx = ConversationContext::new();
        assert!(ctx.recall("pizzalike").is_none());
    }

    #[test]
    fn test_clear_memory_keeps_scratch() {
        let mut ctx = ConversationContext::new();
        ctx.set("user_name", "Ana");
        ctx.remember("x".to_string(), "y", "z");
        ctx.clear_memory();
        assert!(ctx.memory.is_empty());
        assert_eq!(ctx.get_str("user_name"), Some("Ana"));
    }

    #[test]
    fn test_context_json_snapshot_roundtrip() {
        let mut ctx = ConversationContext::new();
        ctx.set("user_name", "Ana");
        ctx.remember("pizzalike".to_string(), "it is Aweasome!", "Do you like pizza?");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ConversationContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }

    #[test]
    fn test_context_deserializes_with_missing_sections() {
        let ctx: ConversationContext = serde_json::from_str("{}").unwrap();
        assert!(ctx.scratch.is_empty());
        assert!(ctx.memory.is_empty());
    }
}
