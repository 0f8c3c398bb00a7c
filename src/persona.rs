//! Persona (system instruction) and the fixed reply texts.

use std::sync::Arc;

/// Bundled system instruction used when no override is configured.
pub const DEFAULT_PERSONA: &str = include_str!("../resources/persona.txt");

/// Sent instead of a generated answer when the language backend fails.
pub const UNAVAILABLE_REPLY: &str = "AI is currently unavailable, please try again later.";

/// Sent when the language backend answers with no text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Sorry, I could not come up with an answer to that.";

/// Maximum characters in one LINE text message.
pub const LINE_TEXT_LIMIT: usize = 5000;

/// Immutable system instruction bound to the backend client at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaConfig {
    instruction: Option<Arc<str>>,
}

impl PersonaConfig {
    #[must_use]
    pub fn new(instruction: &str) -> Self {
        let trimmed = instruction.trim();
        if trimmed.is_empty() {
            return Self::none();
        }
        Self {
            instruction: Some(Arc::from(trimmed)),
        }
    }

    /// No system instruction at all.
    #[must_use]
    pub const fn none() -> Self {
        Self { instruction: None }
    }

    /// Resolves the configured override: unset keeps the bundled persona,
    /// set-but-empty disables it.
    #[must_use]
    pub fn from_override(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::new(v),
            None => Self::new(DEFAULT_PERSONA),
        }
    }

    #[must_use]
    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }
}

/// Hard-truncates reply text to what a single LINE text message accepts.
#[must_use]
pub fn clamp_reply_text(text: &str) -> String {
    text.chars().take(LINE_TEXT_LIMIT).collect()
}
