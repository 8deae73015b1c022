//! Natural-language strings returned to the host. Every command outcome,
//! success or failure, crosses the host boundary as one of these.

use rook_github::github_models::GithubRepository;

use crate::command_errors::IssueCommandError;
use crate::commands::{
    COMMAND_OPEN_REPOSITORY, COMMAND_READ_NEXT_OPEN_ISSUE, COMMAND_REPLY_TO_LAST_ISSUE,
    COMMAND_YOUR_REPOSITORIES,
};

pub fn render_no_repository_guidance() -> String {
    format!(
        "You have not selected a GitHub repository. You can view your repositories with the command '{COMMAND_YOUR_REPOSITORIES}' and select a repository with the command '{COMMAND_OPEN_REPOSITORY}'."
    )
}

pub fn render_no_issue_read_guidance() -> String {
    format!(
        "You have not read any issues. Use the command '{COMMAND_READ_NEXT_OPEN_ISSUE}' to read your first GitHub issue."
    )
}

pub fn render_next_issue_message(title: &str, body: &str) -> String {
    format!(
        "The issue has the title and text '{title}':'{body}'.\n\nTo reply to this issue, use your command: '{COMMAND_REPLY_TO_LAST_ISSUE}'"
    )
}

pub fn render_no_unseen_issues(repo_slug: &str) -> String {
    format!("There are no more open issues to read in '{repo_slug}'.")
}

pub fn render_reply_success(issue_number: u64) -> String {
    format!("The comment was successfully added to issue #{issue_number}.")
}

pub fn render_repository_selected(name: &str) -> String {
    format!("You have navigated to the GitHub repository '{name}'.")
}

pub fn render_whoami(login: &str) -> String {
    format!("You are authenticated on GitHub as '{login}'.")
}

pub fn render_repository_list(login: &str, repositories: &[GithubRepository]) -> String {
    if repositories.is_empty() {
        return format!("Your user '{login}' has no GitHub repositories.");
    }
    let mut result = String::from("The user has the following repositories:\n");
    for repository in repositories {
        result.push_str(&format!(
            "- The repository with the name '{}' with {} GitHub stars, last modified on '{}';\n",
            repository.name,
            repository.stargazers_count,
            repository.updated_at.as_deref().unwrap_or("unknown"),
        ));
    }
    result
}

pub fn render_command_error(error: &IssueCommandError) -> String {
    match error {
        IssueCommandError::NoRepositorySelected => render_no_repository_guidance(),
        IssueCommandError::NoIssueRead => render_no_issue_read_guidance(),
        IssueCommandError::RepositoryNotFound { name } => {
            format!("GitHub repository '{name}' was not found.")
        }
        IssueCommandError::UnknownCommand { name } => {
            format!("The command '{name}' is not provided by the GitHub plugin.")
        }
        IssueCommandError::MissingArgument { name } => {
            format!("The command is missing its required argument '{name}'.")
        }
        IssueCommandError::CommentFailed(source) => {
            format!("The comment could not be posted: {source:#}.")
        }
        IssueCommandError::ReactionFailedAfterComment {
            issue_number,
            source,
        } => format!(
            "The comment was posted on issue #{issue_number}, but the '+1' acknowledgment reaction failed: {source:#}."
        ),
        IssueCommandError::Remote(source) => {
            format!("The GitHub request failed: {source:#}.")
        }
    }
}
