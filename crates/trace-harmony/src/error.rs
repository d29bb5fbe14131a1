//! Harmony conversation error types.

use thiserror::Error;

/// Errors from building or rendering a conversation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarmonyError {
    /// Reasoning-effort string is not `low`, `medium`, or `high`.
    #[error("unknown reasoning effort '{0}': expected one of low, medium, high")]
    UnknownReasoningEffort(String),

    /// The conversation cannot be rendered with the requested next role.
    #[error("cannot render a completion for role {0}")]
    InvalidCompletionRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_effort_display() {
        let msg = format!("{}", HarmonyError::UnknownReasoningEffort("extreme".into()));
        assert!(msg.contains("extreme"));
        assert!(msg.contains("low, medium, high"));
    }
}
