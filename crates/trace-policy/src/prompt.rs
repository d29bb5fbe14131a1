//! Prompt text for norm compilation.

use trace_harmony::ReasoningEffort;

/// Output shape the model is asked to produce.
pub const RULES_SCHEMA: &str = r#"{
  "rules": [
    {
      "id": "unique-rule-id",
      "description": "Clear rule description",
      "category": "content|security|privacy|etc",
      "severity": "low|medium|high",
      "enforcement_type": "require|forbid|recommend",
      "rationale": "Why this rule exists",
      "test_cases": ["example case 1", "example case 2"],
      "exceptions": ["exception case 1"]
    }
  ]
}"#;

/// Developer instructions embedding the domain, effort and output schema.
pub fn developer_message(domain: &str, effort: ReasoningEffort) -> String {
    format!(
        "You are a Policy Compiler for the TRACE system. Your task is to convert \
         free-text organizational norms into structured, executable policy rules.\n\n\
         Domain: {domain}\n\
         Reasoning Effort: {effort}\n\n\
         Output a valid JSON object with this structure:\n\
         {RULES_SCHEMA}\n\n\
         Be thorough and consider edge cases. Show your reasoning process."
    )
}

/// User turn carrying the norms verbatim.
pub fn user_message(norms_text: &str) -> String {
    format!("Convert these organizational norms into structured policy rules:\n\n{norms_text}")
}
