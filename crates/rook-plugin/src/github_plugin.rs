//! The plugin adapter: owns the session and the API client, dispatches the
//! command surface, and implements the host's lifecycle-hook protocol.

use async_trait::async_trait;
use serde_json::Value;

use rook_github::{GithubApiClient, RepoRef, GITHUB_PAGE_SIZE};

use crate::command_errors::IssueCommandError;
use crate::command_rendering::{
    render_command_error, render_next_issue_message, render_no_unseen_issues,
    render_reply_success, render_repository_list, render_repository_selected, render_whoami,
};
use crate::commands::{
    required_string, PromptCommandMenu, COMMAND_OPEN_REPOSITORY, COMMAND_READ_NEXT_OPEN_ISSUE,
    COMMAND_REPLY_TO_LAST_ISSUE, COMMAND_YOUR_REPOSITORIES, COMMAND_YOUR_USERNAME,
};
use crate::lifecycle::{AgentLifecycleHooks, HostMessage, LifecycleHook};
use crate::plugin_config::GithubPluginConfig;
use crate::session::RepositorySession;

pub const PLUGIN_NAME: &str = "Rook-GitHub-Plugin";
pub const PLUGIN_DESCRIPTION: &str =
    "Rook GitHub plugin: read open issues and reply to them from the agent loop.";

const ACKNOWLEDGMENT_REACTION: &str = "+1";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Public struct `NextIssue` used across Rook components.
pub struct NextIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one traversal step. Running out of unseen open issues is a
/// defined result, not an error.
pub enum NextIssueOutcome {
    Issue(NextIssue),
    NoUnseenIssues,
}

/// Public struct `GithubIssuesPlugin` used across Rook components.
pub struct GithubIssuesPlugin {
    config: GithubPluginConfig,
    client: GithubApiClient,
    session: RepositorySession,
    authenticated_login: Option<String>,
}

impl GithubIssuesPlugin {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(GithubPluginConfig::from_env())
    }

    /// Construction is synchronous and makes no remote calls: a configured
    /// default repository is selected by slug and validated on first use.
    pub fn new(config: GithubPluginConfig) -> anyhow::Result<Self> {
        let client = GithubApiClient::new(
            config.api_base.clone(),
            config.access_token.clone(),
            config.request_timeout_ms,
            config.retry_max_attempts,
            config.retry_base_delay_ms,
        )?;
        let mut session = RepositorySession::new();
        if let Some(raw) = config.default_repository.as_deref() {
            match RepoRef::parse(raw) {
                Ok(repo) => session.select_repository(repo),
                Err(error) => {
                    tracing::warn!(
                        slug = raw,
                        error = %error,
                        "ignoring invalid GITHUB_DEFAULT_REPO"
                    );
                }
            }
        }
        Ok(Self {
            config,
            client,
            session,
            authenticated_login: None,
        })
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn description(&self) -> &'static str {
        PLUGIN_DESCRIPTION
    }

    pub fn session(&self) -> &RepositorySession {
        &self.session
    }

    async fn ensure_authenticated_login(&mut self) -> Result<String, IssueCommandError> {
        if let Some(login) = &self.authenticated_login {
            return Ok(login.clone());
        }
        let login = self.client.authenticated_login().await?;
        self.authenticated_login = Some(login.clone());
        Ok(login)
    }

    /// Resolves `name` against the authenticated account and replaces the
    /// selection on success; a failed lookup leaves the selection unchanged.
    pub async fn select_repository(&mut self, name: &str) -> Result<String, IssueCommandError> {
        let login = self.ensure_authenticated_login().await?;
        let repository = self
            .client
            .get_repository(&login, name)
            .await?
            .ok_or_else(|| IssueCommandError::RepositoryNotFound {
                name: name.to_string(),
            })?;
        self.session
            .select_repository(RepoRef::new(repository.owner.login, repository.name));
        Ok(render_repository_selected(name))
    }

    /// Scans the remote open-issue listing in service order for the first
    /// issue not yet surfaced for the selected repository. The issue is
    /// marked seen only once every remote call for it has succeeded.
    pub async fn find_next_unseen_open_issue(
        &mut self,
    ) -> Result<NextIssueOutcome, IssueCommandError> {
        let Some(repo) = self.session.selected_repository().cloned() else {
            return Err(IssueCommandError::NoRepositorySelected);
        };
        let acknowledged_login = if self.config.skip_acknowledged_issues {
            Some(self.ensure_authenticated_login().await?)
        } else {
            None
        };

        let mut page = 1_u32;
        loop {
            let listing = self.client.list_open_issues(&repo, page).await?;
            for issue in listing.issues {
                if self.session.has_seen(&repo, issue.number) {
                    continue;
                }
                if let Some(login) = acknowledged_login.as_deref() {
                    // Skipped, not marked seen: removing the reaction
                    // resurfaces the issue.
                    if self.issue_acknowledged_by(&repo, issue.number, login).await? {
                        continue;
                    }
                }
                self.session.mark_seen(&repo, issue.number);
                return Ok(NextIssueOutcome::Issue(NextIssue {
                    number: issue.number,
                    title: issue.title,
                    body: issue.body.unwrap_or_default(),
                }));
            }
            if !listing.has_more {
                return Ok(NextIssueOutcome::NoUnseenIssues);
            }
            page = page.saturating_add(1);
        }
    }

    async fn issue_acknowledged_by(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        login: &str,
    ) -> Result<bool, IssueCommandError> {
        let mut page = 1_u32;
        loop {
            let reactions = self
                .client
                .list_issue_reactions(repo, issue_number, page)
                .await?;
            let page_len = reactions.len();
            if reactions
                .iter()
                .any(|reaction| {
                    reaction.content == ACKNOWLEDGMENT_REACTION && reaction.user.login == login
                })
            {
                return Ok(true);
            }
            if page_len < GITHUB_PAGE_SIZE {
                return Ok(false);
            }
            page = page.saturating_add(1);
        }
    }

    /// Posts `text` on the most recently read issue of the selected
    /// repository, then acknowledges it with a `+1` reaction. A reaction
    /// failure after a successful comment is reported distinctly.
    pub async fn reply_to_most_recent_issue(
        &mut self,
        text: &str,
    ) -> Result<String, IssueCommandError> {
        let Some(repo) = self.session.selected_repository().cloned() else {
            return Err(IssueCommandError::NoRepositorySelected);
        };
        let Some(issue_number) = self.session.last_seen_issue(&repo) else {
            return Err(IssueCommandError::NoIssueRead);
        };
        self.client
            .create_issue_comment(&repo, issue_number, text)
            .await
            .map_err(IssueCommandError::CommentFailed)?;
        self.client
            .create_issue_reaction(&repo, issue_number, ACKNOWLEDGMENT_REACTION)
            .await
            .map_err(|source| IssueCommandError::ReactionFailedAfterComment {
                issue_number,
                source,
            })?;
        Ok(render_reply_success(issue_number))
    }

    pub async fn render_authenticated_user(&mut self) -> Result<String, IssueCommandError> {
        let login = self.ensure_authenticated_login().await?;
        Ok(render_whoami(&login))
    }

    pub async fn render_repository_inventory(&mut self) -> Result<String, IssueCommandError> {
        let login = self.ensure_authenticated_login().await?;
        let repositories = self.client.list_repositories().await?;
        Ok(render_repository_list(&login, &repositories))
    }

    async fn dispatch_command(
        &mut self,
        command_name: &str,
        arguments: &Value,
    ) -> Result<String, IssueCommandError> {
        match command_name {
            COMMAND_READ_NEXT_OPEN_ISSUE => match self.find_next_unseen_open_issue().await? {
                NextIssueOutcome::Issue(issue) => {
                    Ok(render_next_issue_message(&issue.title, &issue.body))
                }
                NextIssueOutcome::NoUnseenIssues => {
                    let slug = self
                        .session
                        .selected_repository()
                        .map(RepoRef::as_slug)
                        .unwrap_or_default();
                    Ok(render_no_unseen_issues(&slug))
                }
            },
            COMMAND_REPLY_TO_LAST_ISSUE => {
                let text = required_string(arguments, "text")?;
                self.reply_to_most_recent_issue(&text).await
            }
            COMMAND_OPEN_REPOSITORY => {
                let name = required_string(arguments, "name")?;
                self.select_repository(&name).await
            }
            COMMAND_YOUR_USERNAME => self.render_authenticated_user().await,
            COMMAND_YOUR_REPOSITORIES => self.render_repository_inventory().await,
            other => Err(IssueCommandError::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }
}

#[async_trait]
impl AgentLifecycleHooks for GithubIssuesPlugin {
    fn can_handle(&self, hook: LifecycleHook) -> bool {
        hook.is_handled()
    }

    fn post_prompt(&self, menu: &mut PromptCommandMenu) {
        menu.add_command(
            "read the next open issue in your current GitHub repository",
            COMMAND_READ_NEXT_OPEN_ISSUE,
            &[],
        );
        menu.add_command(
            &format!("reply to the last GitHub issue read with '{COMMAND_READ_NEXT_OPEN_ISSUE}'"),
            COMMAND_REPLY_TO_LAST_ISSUE,
            &[("text", "<text that is used to reply>")],
        );
        menu.add_command(
            "Open or change your GitHub repository",
            COMMAND_OPEN_REPOSITORY,
            &[("name", "<GitHub Repository Name>")],
        );
    }

    fn on_response(&self, _response: &str) -> Option<String> {
        None
    }

    fn on_planning(&self, _messages: &[HostMessage]) -> Option<String> {
        None
    }

    fn post_planning(&self, _response: &str) -> Option<String> {
        None
    }

    fn pre_instruction(&self, _messages: &[HostMessage]) -> Option<Vec<HostMessage>> {
        None
    }

    fn on_instruction(&self, _messages: &[HostMessage]) -> Option<String> {
        None
    }

    fn post_instruction(&self, _response: &str) -> Option<String> {
        None
    }

    fn pre_command(&self, _command_name: &str, _arguments: &Value) -> Option<(String, Value)> {
        None
    }

    fn post_command(&self, _command_name: &str, _response: &str) -> Option<String> {
        None
    }

    fn handle_chat_completion(&self, _messages: &[HostMessage]) -> Option<String> {
        None
    }

    async fn execute_command(&mut self, command_name: &str, arguments: &Value) -> String {
        match self.dispatch_command(command_name, arguments).await {
            Ok(message) => message,
            Err(error) => render_command_error(&error),
        }
    }
}
