//! User-facing error prompts.
//!
//! Failures the user can act on are surfaced as a structured prompt with a
//! severity, title, and message, handed to the embedder through the
//! [`Prompter`] collaborator. Rendering and localization happen outside
//! this crate.

use serde::{Deserialize, Serialize};

/// Severity level of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational notice.
    Info,
    /// Something worth attention but not a failure.
    Warning,
    /// An operation failed.
    Error,
}

/// A structured prompt for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// How serious this is.
    pub severity: Severity,
    /// Short title for the dialog.
    pub title: String,
    /// Full message text.
    pub message: String,
}

impl Prompt {
    /// Build an error-severity prompt.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The collaborator that shows prompts to the user.
pub trait Prompter: Send + Sync {
    /// Issue one prompt. Fire-and-forget; the workflow never waits on it.
    fn prompt(&self, prompt: Prompt);
}

/// A prompter that drops all prompts. Useful for headless embedders and
/// tests that only care about outcomes.
pub struct NullPrompter;

impl Prompter for NullPrompter {
    fn prompt(&self, _prompt: Prompt) {}
}

/// A prompter that records prompts for assertions in tests.
#[derive(Default)]
pub struct CollectingPrompter {
    prompts: std::sync::Mutex<Vec<Prompt>>,
}

impl CollectingPrompter {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// All prompts issued so far.
    pub fn collected(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for CollectingPrompter {
    fn prompt(&self, prompt: Prompt) {
        self.prompts.lock().unwrap().push(prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_serialization() {
        let prompt = Prompt::error("Could not create file", "disk full");
        let json = serde_json::to_string(&prompt).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        assert!(json.contains("disk full"));
    }

    #[test]
    fn test_collecting_prompter() {
        let prompter = CollectingPrompter::new();
        prompter.prompt(Prompt::error("t", "m"));
        assert_eq!(prompter.collected().len(), 1);
        assert_eq!(prompter.collected()[0].title, "t");
    }
}
