use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubUser` used across Rook components.
pub struct GithubUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubRepository` used across Rook components.
pub struct GithubRepository {
    pub name: String,
    pub full_name: String,
    pub owner: GithubUser,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubIssue` used across Rook components.
pub struct GithubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub user: GithubUser,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Public struct `GithubIssueReaction` used across Rook components.
pub struct GithubIssueReaction {
    pub id: u64,
    pub content: String,
    pub user: GithubUser,
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `GithubCommentCreateResponse` used across Rook components.
pub struct GithubCommentCreateResponse {
    pub id: u64,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
/// Public struct `GithubReactionCreateResponse` used across Rook components.
pub struct GithubReactionCreateResponse {
    pub id: u64,
    pub content: String,
}
