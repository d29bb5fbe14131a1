//! # Harmony Rendering
//!
//! Renders a [`Conversation`] into Harmony prompt text:
//!
//! ```text
//! <|start|>{role}<|message|>{content}<|end|>   (one per turn)
//! <|start|>{next_role}                         (left open for completion)
//! ```

use crate::conversation::{Conversation, Role};
use crate::error::HarmonyError;

/// Opens a turn header.
pub const START: &str = "<|start|>";
/// Separates a turn header from its content.
pub const MESSAGE: &str = "<|message|>";
/// Closes a turn.
pub const END: &str = "<|end|>";

/// Render `conversation` so that the next turn is authored by `next_role`.
///
/// # Errors
///
/// [`HarmonyError::InvalidCompletionRole`] if `next_role` is
/// [`Role::System`]; a completion is never requested for the system.
pub fn render_conversation_for_completion(
    conversation: &Conversation,
    next_role: Role,
) -> Result<String, HarmonyError> {
    if next_role == Role::System {
        return Err(HarmonyError::InvalidCompletionRole(next_role.to_string()));
    }

    let mut out = String::new();
    for message in &conversation.messages {
        out.push_str(START);
        out.push_str(message.role.as_str());
        out.push_str(MESSAGE);
        out.push_str(&message.content);
        out.push_str(END);
    }
    out.push_str(START);
    out.push_str(next_role.as_str());
    Ok(out)
}
