//! `{{identifier}}` expansion of outgoing replies.

use std::borrow::Cow;
use std::sync::LazyLock;

use parley_core::ConversationContext;
use regex::{Captures, Regex};
use serde_json::Value;

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w*)\}\}").expect("Invalid variable regex"));

/// Replace every `{{name}}` in `template` with the scratch field `name`.
///
/// Unknown names are left as written. Substituted text is not scanned again.
pub fn substitute<'a>(template: &'a str, context: &ConversationContext) -> Cow<'a, str> {
    VARIABLE_RE.replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => caps[0].to_string(),
    })
}

/// Expand every reply, dropping empty ones.
pub fn substitute_all(replies: Vec<String>, context: &ConversationContext) -> Vec<String> {
    replies
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(|r| substitute(&r, context).into_owned())
        .collect()
}
