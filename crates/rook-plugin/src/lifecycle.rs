//! Host lifecycle-hook protocol: hook points, static capability table, and
//! the trait the host drives the plugin through.
//!
//! The host calls each capability predicate before the paired action hook.
//! Which hooks this plugin acts on is a fixed property of the plugin, so the
//! table lives on the `LifecycleHook` enumeration itself rather than in any
//! per-instance state; only the prompt-construction hook is handled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands::PromptCommandMenu;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One chat message as the host passes it through instruction hooks.
pub struct HostMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Enumerates supported `LifecycleHook` values.
pub enum LifecycleHook {
    PostPrompt,
    OnResponse,
    OnPlanning,
    PostPlanning,
    PreInstruction,
    OnInstruction,
    PostInstruction,
    PreCommand,
    PostCommand,
    ChatCompletion,
}

/// Every hook point the host may probe, in its calling order.
pub const LIFECYCLE_HOOKS: [LifecycleHook; 10] = [
    LifecycleHook::PostPrompt,
    LifecycleHook::OnResponse,
    LifecycleHook::OnPlanning,
    LifecycleHook::PostPlanning,
    LifecycleHook::PreInstruction,
    LifecycleHook::OnInstruction,
    LifecycleHook::PostInstruction,
    LifecycleHook::PreCommand,
    LifecycleHook::PostCommand,
    LifecycleHook::ChatCompletion,
];

impl LifecycleHook {
    /// Static capability table: the prompt-construction hook is the only one
    /// this plugin acts on.
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::PostPrompt)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostPrompt => "post_prompt",
            Self::OnResponse => "on_response",
            Self::OnPlanning => "on_planning",
            Self::PostPlanning => "post_planning",
            Self::PreInstruction => "pre_instruction",
            Self::OnInstruction => "on_instruction",
            Self::PostInstruction => "post_instruction",
            Self::PreCommand => "pre_command",
            Self::PostCommand => "post_command",
            Self::ChatCompletion => "chat_completion",
        }
    }
}

#[async_trait]
/// Trait contract for the host-facing plugin surface.
///
/// Unhandled action hooks return `None`, meaning "input unchanged, nothing to
/// add". `execute_command` is how the host invokes a command it elicited
/// arguments for after `post_prompt` registered the menu; the returned string
/// is fed straight into the agent's context.
pub trait AgentLifecycleHooks {
    fn can_handle(&self, hook: LifecycleHook) -> bool;

    fn post_prompt(&self, menu: &mut PromptCommandMenu);
    fn on_response(&self, response: &str) -> Option<String>;
    fn on_planning(&self, messages: &[HostMessage]) -> Option<String>;
    fn post_planning(&self, response: &str) -> Option<String>;
    fn pre_instruction(&self, messages: &[HostMessage]) -> Option<Vec<HostMessage>>;
    fn on_instruction(&self, messages: &[HostMessage]) -> Option<String>;
    fn post_instruction(&self, response: &str) -> Option<String>;
    fn pre_command(&self, command_name: &str, arguments: &Value) -> Option<(String, Value)>;
    fn post_command(&self, command_name: &str, response: &str) -> Option<String>;
    fn handle_chat_completion(&self, messages: &[HostMessage]) -> Option<String>;

    async fn execute_command(&mut self, command_name: &str, arguments: &Value) -> String;
}
