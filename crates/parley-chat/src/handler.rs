//! Reply handlers.
//!
//! A handler is bound to one intent and a minimum score. The registry calls
//! [`ReplyHandler::execute`] with the classified sentence and the live
//! session whenever the utterance carries that intent with enough
//! confidence.

use async_trait::async_trait;

use crate::error::ChatError;
use crate::session::Session;

/// Output of one handler: nothing, one reply, or several.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reply {
    /// The handler only updated state.
    #[default]
    Silent,
    One(String),
    Many(Vec<String>),
}

impl Reply {
    /// Flatten into the replies it carries, in order.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Reply::Silent => Vec::new(),
            Reply::One(s) => vec![s],
            Reply::Many(v) => v,
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Reply::Silent)
    }
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Reply::One(s)
    }
}

impl From<&str> for Reply {
    fn from(s: &str) -> Self {
        Reply::One(s.to_string())
    }
}

impl From<Vec<String>> for Reply {
    fn from(v: Vec<String>) -> Self {
        Reply::Many(v)
    }
}

impl<T: Into<Reply>> From<Option<T>> for Reply {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Reply::Silent, Into::into)
    }
}

/// Trait implemented by every reply handler.
#[async_trait]
pub trait ReplyHandler: Send + Sync {
    /// Intent this handler answers.
    fn intent(&self) -> &str;

    /// Minimum classification score, inclusive.
    fn min_score(&self) -> f64;

    /// Produce replies for `text`. May read and modify the session.
    async fn execute(&self, text: &str, session: &mut Session) -> Result<Reply, ChatError>;
}

type ReplyFn = dyn Fn(&str, &mut Session) -> Result<Reply, ChatError> + Send + Sync;

/// Handler backed by a synchronous closure.
pub struct FnHandler {
    intent: String,
    min_score: f64,
    func: Box<ReplyFn>,
}

impl FnHandler {
    pub fn new<F>(intent: impl Into<String>, min_score: f64, func: F) -> Self
    where
        F: Fn(&str, &mut Session) -> Result<Reply, ChatError> + Send + Sync + 'static,
    {
        Self {
            intent: intent.into(),
            min_score,
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl ReplyHandler for FnHandler {
    fn intent(&self) -> &str {
        &self.intent
    }

    fn min_score(&self) -> f64 {
        self.min_score
    }

    async fn execute(&self, text: &str, session: &mut Session) -> Result<Reply, ChatError> {
        (self.func)(text, session)
    }
}

impl std::fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHandler")
            .field("intent", &self.intent)
            .field("min_score", &self.min_score)
            .finish_non_exhaustive()
    }
}
