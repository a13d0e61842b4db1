//! Conversation context persistence between runs.

use std::path::Path;

use parley_core::{ConversationContext, Result};
use tracing::info;

/// Read a context snapshot written by [`save_context`].
pub fn load_context(path: &Path) -> Result<ConversationContext> {
    let content = std::fs::read_to_string(path)?;
    let context: ConversationContext = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        fields = context.scratch.len(),
        memories = context.memory.len(),
        "Context restored"
    );
    Ok(context)
}

/// Restore a snapshot when `path` exists, else start empty.
pub fn load_context_if_exists(path: &Path) -> Result<Option<ConversationContext>> {
    if !path.exists() {
        return Ok(None);
    }
    load_context(path).map(Some)
}

pub fn save_context(context: &ConversationContext, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(context)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), "Context saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ParleyError;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("context.json");

        let mut ctx = ConversationContext::new();
        ctx.set("user_name", "Ana");
        ctx.remember("pizzalike".to_string(), "it is a mess", "Do you like pizza?");
        save_context(&ctx, &path).unwrap();

        let restored = load_context(&path).unwrap();
        assert_eq!(restored, ctx);
        assert_eq!(restored.recall("pizzalike"), Some("it is a mess"));
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_context_if_exists(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            load_context_if_exists(&path),
            Err(ParleyError::Serialization(_))
        ));
    }
}
