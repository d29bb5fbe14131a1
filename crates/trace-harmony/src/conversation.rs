//! # Conversation Model
//!
//! Roles, messages, system content, and the [`ConversationBuilder`] that
//! assembles them for a given reasoning-effort level.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::HarmonyError;

/// Default model identity line for gpt-oss system turns.
pub const DEFAULT_MODEL_IDENTITY: &str =
    "You are ChatGPT, a large language model trained by OpenAI.";

/// Default knowledge cutoff advertised in the system turn.
pub const DEFAULT_KNOWLEDGE_CUTOFF: &str = "2024-06";

/// Channels the assistant may answer on.
pub const VALID_CHANNELS: [&str; 3] = ["analysis", "commentary", "final"];

// ---------------------------------------------------------------------------
// ReasoningEffort
// ---------------------------------------------------------------------------

/// How much deliberation the model should spend before answering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Fast, shallow reasoning.
    Low,
    /// Balanced.
    #[default]
    Medium,
    /// Thorough reasoning.
    High,
}

impl ReasoningEffort {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningEffort {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(HarmonyError::UnknownReasoningEffort(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Role & Message
// ---------------------------------------------------------------------------

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Model configuration and context.
    System,
    /// Developer instructions. Never emitted by [`ConversationBuilder`].
    Developer,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
}

impl Role {
    /// Lowercase name as it appears in rendered headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Developer => "developer",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author role.
    pub role: Role,
    /// Text content.
    pub content: String,
}

impl Message {
    /// Build a message from a role and its content.
    pub fn from_role_and_content(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SystemContent
// ---------------------------------------------------------------------------

/// Content of the system turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemContent {
    /// Identity line that opens the system turn.
    pub model_identity: String,
    /// Advertised knowledge cutoff.
    pub knowledge_cutoff: String,
    /// Date the conversation takes place, if pinned.
    pub conversation_start_date: Option<NaiveDate>,
    /// Requested reasoning level.
    pub reasoning_effort: ReasoningEffort,
    /// Developer instructions merged into the system turn.
    pub instructions: Option<String>,
}

impl SystemContent {
    /// System content with default identity and the given effort.
    pub fn new(reasoning_effort: ReasoningEffort) -> Self {
        Self {
            model_identity: DEFAULT_MODEL_IDENTITY.to_string(),
            knowledge_cutoff: DEFAULT_KNOWLEDGE_CUTOFF.to_string(),
            conversation_start_date: None,
            reasoning_effort,
            instructions: None,
        }
    }

    /// Pin the conversation date.
    pub fn with_conversation_start_date(mut self, date: NaiveDate) -> Self {
        self.conversation_start_date = Some(date);
        self
    }

    /// Replace the reasoning level.
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = effort;
        self
    }

    /// Attach developer instructions. Empty strings are ignored.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }

    /// Render the system turn body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.model_identity);
        out.push_str("\nKnowledge cutoff: ");
        out.push_str(&self.knowledge_cutoff);
        if let Some(date) = self.conversation_start_date {
            out.push_str(&format!("\nCurrent date: {}", date.format("%Y-%m-%d")));
        }
        out.push_str(&format!("\n\nReasoning: {}", self.reasoning_effort));
        out.push_str(&format!(
            "\n\n# Valid channels: {}. Channel must be included for every message.",
            VALID_CHANNELS.join(", ")
        ));
        if let Some(instructions) = &self.instructions {
            out.push_str("\n\n# Instructions\n\n");
            out.push_str(instructions);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// An ordered list of turns ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Turns in order.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Wrap an ordered list of messages.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when there are no turns.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Builds compilation conversations at a fixed reasoning level.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    system_content: SystemContent,
}

impl ConversationBuilder {
    /// Builder for an already-parsed effort level.
    pub fn new(reasoning_effort: ReasoningEffort) -> Self {
        Self {
            system_content: SystemContent::new(reasoning_effort),
        }
    }

    /// Builder from a reasoning-effort string, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// [`HarmonyError::UnknownReasoningEffort`] if the string is not a
    /// recognized level.
    pub fn from_effort_str(reasoning_effort: &str) -> Result<Self, HarmonyError> {
        Ok(Self::new(reasoning_effort.parse()?))
    }

    /// Pin the conversation date carried in the system turn.
    pub fn with_conversation_start_date(mut self, date: NaiveDate) -> Self {
        self.system_content = self.system_content.with_conversation_start_date(date);
        self
    }

    /// The configured effort level.
    pub fn reasoning_effort(&self) -> ReasoningEffort {
        self.system_content.reasoning_effort
    }

    /// Build the system turn, merging developer instructions into it.
    pub fn build_system_message(&self, developer_message: &str) -> Message {
        let content = self
            .system_content
            .clone()
            .with_instructions(developer_message);
        Message::from_role_and_content(Role::System, content.render())
    }

    /// Build a conversation: one system turn, then one user turn per message.
    pub fn build_conversation<S: AsRef<str>>(
        &self,
        user_messages: &[S],
        developer_message: &str,
    ) -> Conversation {
        let mut messages = Vec::with_capacity(user_messages.len() + 1);
        messages.push(self.build_system_message(developer_message));
        messages.extend(
            user_messages
                .iter()
                .map(|m| Message::from_role_and_content(Role::User, m.as_ref())),
        );
        Conversation::from_messages(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effort_parses_case_insensitively() {
        assert_eq!("LOW".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::Low);
        assert_eq!("Medium".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::Medium);
        assert_eq!("high".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::High);
    }

    #[test]
    fn effort_rejects_unknown_level() {
        let err = ConversationBuilder::from_effort_str("maximum").unwrap_err();
        assert_eq!(err, HarmonyError::UnknownReasoningEffort("maximum".into()));
    }

    #[test]
    fn conversation_has_system_then_user_turns() {
        let builder = ConversationBuilder::new(ReasoningEffort::High);
        let conv = builder.build_conversation(&["first", "second"], "be precise");
        assert_eq!(conv.len(), 3);
        assert_eq!(conv.messages[0].role, Role::System);
        assert_eq!(conv.messages[1].role, Role::User);
        assert_eq!(conv.messages[1].content, "first");
        assert_eq!(conv.messages[2].content, "second");
    }

    #[test]
    fn developer_message_is_folded_into_system_turn() {
        let builder = ConversationBuilder::new(ReasoningEffort::Low);
        let conv = builder.build_conversation(&["hi"], "Output JSON only.");
        assert!(conv.messages.iter().all(|m| m.role != Role::Developer));
        assert!(conv.messages[0].content.contains("# Instructions"));
        assert!(conv.messages[0].content.contains("Output JSON only."));
    }

    #[test]
    fn empty_developer_message_adds_no_instructions() {
        let builder = ConversationBuilder::new(ReasoningEffort::Low);
        let system = builder.build_system_message("   ");
        assert!(!system.content.contains("# Instructions"));
    }

    #[test]
    fn system_turn_carries_effort_and_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        let builder =
            ConversationBuilder::new(ReasoningEffort::High).with_conversation_start_date(date);
        let system = builder.build_system_message("");
        assert!(system.content.contains("Reasoning: high"));
        assert!(system.content.contains("Current date: 2025-08-17"));
        assert!(system.content.starts_with(DEFAULT_MODEL_IDENTITY));
    }

    #[test]
    fn no_user_messages_yields_system_only() {
        let builder = ConversationBuilder::new(ReasoningEffort::Medium);
        let conv = builder.build_conversation::<&str>(&[], "");
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn conversation_serializes_roles_lowercase() {
        let conv = ConversationBuilder::new(ReasoningEffort::Medium).build_conversation(&["x"], "");
        let v = serde_json::to_value(&conv).unwrap();
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
    }
}
