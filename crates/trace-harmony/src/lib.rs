//! # trace-harmony — Conversation Builder for Harmony-Format Models
//!
//! Assembles the structured conversation that describes a compilation task
//! and renders it into the Harmony text format expected by gpt-oss models.
//!
//! ## Conversation Shape
//!
//! A built [`Conversation`] always contains, in order:
//!
//! 1. One system turn carrying the model identity, conversation date,
//!    reasoning level, and (when supplied) the developer instructions.
//! 2. One user turn per supplied message.
//!
//! Developer instructions are folded into the system turn under an
//! `# Instructions` heading. No separate developer turn is ever emitted.
//!
//! ## Rendering
//!
//! [`render_conversation_for_completion`] produces the prompt text with the
//! next turn left open for the assistant role. Rendering is a pure
//! transformation with no side effects.

pub mod conversation;
pub mod encoding;
pub mod error;

pub use conversation::{
    Conversation, ConversationBuilder, Message, ReasoningEffort, Role, SystemContent,
};
pub use encoding::render_conversation_for_completion;
pub use error::HarmonyError;
