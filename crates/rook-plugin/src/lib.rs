//! GitHub issue plugin for an autonomous agent host.
//!
//! Exposes a small command surface (read the next unread open issue, reply to
//! the most recently read issue, switch repositories) over the host's
//! lifecycle-hook protocol, backed by the `rook-github` API client.

pub mod command_errors;
pub mod command_rendering;
pub mod commands;
pub mod github_plugin;
pub mod lifecycle;
pub mod plugin_config;
pub mod session;


pub use command_errors::IssueCommandError;
pub use commands::{CommandRegistration, PromptCommandMenu};
pub use github_plugin::{GithubIssuesPlugin, NextIssue, NextIssueOutcome};
pub use lifecycle::{AgentLifecycleHooks, HostMessage, LifecycleHook};
pub use plugin_config::GithubPluginConfig;
pub use session::RepositorySession;
