//! Command catalog: wire-stable names, registration payloads, and the menu
//! the prompt-construction hook fills in.
//!
//! The command names are part of the wire contract with the host; renaming
//! one is a breaking change requiring a migration note.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::command_errors::IssueCommandError;

pub const COMMAND_YOUR_USERNAME: &str = "your_username_on_github";
pub const COMMAND_YOUR_REPOSITORIES: &str = "your_repositories_on_github";
pub const COMMAND_OPEN_REPOSITORY: &str = "change_github_repository";
pub const COMMAND_READ_NEXT_OPEN_ISSUE: &str = "read_next_open_github_issue";
pub const COMMAND_REPLY_TO_LAST_ISSUE: &str = "reply_to_last_github_issue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Public struct `CommandRegistration` used across Rook components.
pub struct CommandRegistration {
    pub name: &'static str,
    pub description: String,
    /// Parameter name mapped to a placeholder the host shows the agent.
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
/// Command menu the host hands to `post_prompt`; the host elicits arguments
/// for registered commands and dispatches invocations back by name.
pub struct PromptCommandMenu {
    registrations: Vec<CommandRegistration>,
}

impl PromptCommandMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(
        &mut self,
        description: &str,
        name: &'static str,
        parameters: &[(&str, &str)],
    ) {
        self.registrations.push(CommandRegistration {
            name,
            description: description.to_string(),
            parameters: parameters
                .iter()
                .map(|(key, placeholder)| (key.to_string(), placeholder.to_string()))
                .collect(),
        });
    }

    pub fn registrations(&self) -> &[CommandRegistration] {
        &self.registrations
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registrations
            .iter()
            .any(|registration| registration.name == name)
    }
}

/// Pulls a required string argument out of the host's invocation payload.
pub fn required_string(
    arguments: &Value,
    name: &'static str,
) -> Result<String, IssueCommandError> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(IssueCommandError::MissingArgument { name })
}
