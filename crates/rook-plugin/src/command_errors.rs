//! Typed command failures, translated to display strings only at the host
//! boundary (see `command_rendering`).

use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates supported `IssueCommandError` values.
pub enum IssueCommandError {
    #[error("no repository selected")]
    NoRepositorySelected,
    #[error("no issue read yet")]
    NoIssueRead,
    #[error("repository '{name}' was not found")]
    RepositoryNotFound { name: String },
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },
    #[error("missing required argument '{name}'")]
    MissingArgument { name: &'static str },
    #[error("failed to post issue comment")]
    CommentFailed(#[source] anyhow::Error),
    #[error("comment posted on issue #{issue_number} but the acknowledgment reaction failed")]
    ReactionFailedAfterComment {
        issue_number: u64,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}
