use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::github_models::{
    GithubCommentCreateResponse, GithubIssue, GithubIssueReaction, GithubReactionCreateResponse,
    GithubRepository,
};
use crate::github_transport_helpers::{
    is_retryable_github_status, is_retryable_transport_error, parse_retry_after, retry_delay,
    truncate_for_error,
};
use crate::repo_ref::RepoRef;

/// Page size requested from every GitHub list endpoint.
pub const GITHUB_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
/// One page of open issues; `has_more` reflects the raw page size before
/// pull requests were filtered out.
pub struct GithubIssuePage {
    pub issues: Vec<GithubIssue>,
    pub has_more: bool,
}

#[derive(Clone)]
/// Public struct `GithubApiClient` used across Rook components.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    retry_max_attempts: usize,
    retry_base_delay_ms: u64,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        request_timeout_ms: u64,
        retry_max_attempts: usize,
        retry_base_delay_ms: u64,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Rook-github-plugin"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let token = token.trim().to_string();
        if !token.is_empty() {
            let auth_header = format!("Bearer {token}");
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&auth_header)
                    .context("invalid github authorization header")?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github api client")?;
        Ok(Self {
            http: client,
            api_base: api_base.trim_end_matches('/').to_string(),
            retry_max_attempts: retry_max_attempts.max(1),
            retry_base_delay_ms: retry_base_delay_ms.max(1),
        })
    }

    /// Login of the account the access token belongs to.
    pub async fn authenticated_login(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Viewer {
            login: String,
        }

        let viewer: Viewer = self
            .request_json("resolve authenticated login", || {
                self.http.get(format!("{}/user", self.api_base))
            })
            .await?;
        Ok(viewer.login)
    }

    /// Fetches one repository; an unknown owner/name pair yields `None`.
    pub async fn get_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<GithubRepository>> {
        self.request_json_optional("fetch repository", || {
            self.http
                .get(format!("{}/repos/{}/{}", self.api_base, owner, name))
        })
        .await
    }

    /// All repositories of the authenticated user, across every page.
    pub async fn list_repositories(&self) -> Result<Vec<GithubRepository>> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let chunk: Vec<GithubRepository> = self
                .request_json("list repositories", || {
                    self.http
                        .get(format!("{}/user/repos", self.api_base))
                        .query(&[
                            ("per_page", GITHUB_PAGE_SIZE.to_string().as_str()),
                            ("page", page_value.as_str()),
                        ])
                })
                .await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < GITHUB_PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }

    /// One page of open issues in the order the service returns them.
    /// Pull requests share the issues endpoint and are filtered out.
    pub async fn list_open_issues(&self, repo: &RepoRef, page: u32) -> Result<GithubIssuePage> {
        let page_value = page.max(1).to_string();
        let chunk: Vec<GithubIssue> = self
            .request_json("list open issues", || {
                self.http
                    .get(format!(
                        "{}/repos/{}/{}/issues",
                        self.api_base, repo.owner, repo.name
                    ))
                    .query(&[
                        ("state", "open"),
                        ("per_page", GITHUB_PAGE_SIZE.to_string().as_str()),
                        ("page", page_value.as_str()),
                    ])
            })
            .await?;
        let chunk_len = chunk.len();
        Ok(GithubIssuePage {
            issues: chunk
                .into_iter()
                .filter(|issue| issue.pull_request.is_none())
                .collect(),
            has_more: chunk_len == GITHUB_PAGE_SIZE,
        })
    }

    pub async fn get_issue(&self, repo: &RepoRef, issue_number: u64) -> Result<GithubIssue> {
        self.request_json("fetch issue", || {
            self.http.get(format!(
                "{}/repos/{}/{}/issues/{}",
                self.api_base, repo.owner, repo.name, issue_number
            ))
        })
        .await
    }

    /// One page of reactions attached to an issue.
    pub async fn list_issue_reactions(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        page: u32,
    ) -> Result<Vec<GithubIssueReaction>> {
        let page_value = page.max(1).to_string();
        self.request_json("list issue reactions", || {
            self.http
                .get(format!(
                    "{}/repos/{}/{}/issues/{}/reactions",
                    self.api_base, repo.owner, repo.name, issue_number
                ))
                .query(&[
                    ("per_page", GITHUB_PAGE_SIZE.to_string().as_str()),
                    ("page", page_value.as_str()),
                ])
        })
        .await
    }

    pub async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<GithubCommentCreateResponse> {
        let payload = json!({ "body": body });
        self.request_json("create issue comment", || {
            self.http
                .post(format!(
                    "{}/repos/{}/{}/issues/{}/comments",
                    self.api_base, repo.owner, repo.name, issue_number
                ))
                .json(&payload)
        })
        .await
    }

    pub async fn create_issue_reaction(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        content: &str,
    ) -> Result<GithubReactionCreateResponse> {
        let payload = json!({ "content": content });
        self.request_json("create issue reaction", || {
            self.http
                .post(format!(
                    "{}/repos/{}/{}/issues/{}/reactions",
                    self.api_base, repo.owner, repo.name, issue_number
                ))
                .json(&payload)
        })
        .await
    }

    async fn request_json<T, F>(&self, operation: &str, request_builder: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        match self.request_json_inner(operation, request_builder, false).await? {
            Some(parsed) => Ok(parsed),
            None => bail!("github api {operation} returned not found"),
        }
    }

    async fn request_json_optional<T, F>(
        &self,
        operation: &str,
        request_builder: F,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        self.request_json_inner(operation, request_builder, true).await
    }

    async fn request_json_inner<T, F>(
        &self,
        operation: &str,
        mut request_builder: F,
        not_found_is_none: bool,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        F: FnMut() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0_usize;
        loop {
            attempt = attempt.saturating_add(1);
            let response = request_builder().send().await;
            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<T>()
                            .await
                            .with_context(|| format!("failed to decode github {operation}"))?;
                        return Ok(Some(parsed));
                    }
                    if not_found_is_none && status == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    let retry_after = parse_retry_after(response.headers());
                    let body = response.text().await.unwrap_or_default();
                    if attempt < self.retry_max_attempts
                        && is_retryable_github_status(status.as_u16())
                    {
                        tracing::debug!(
                            operation = operation,
                            status = status.as_u16(),
                            attempt = attempt,
                            "retrying github request"
                        );
                        tokio::time::sleep(retry_delay(
                            self.retry_base_delay_ms,
                            attempt,
                            retry_after,
                        ))
                        .await;
                        continue;
                    }

                    bail!(
                        "github api {operation} failed with status {}: {}",
                        status.as_u16(),
                        truncate_for_error(&body, 800)
                    );
                }
                Err(error) => {
                    if attempt < self.retry_max_attempts && is_retryable_transport_error(&error) {
                        tracing::debug!(
                            operation = operation,
                            attempt = attempt,
                            error = %error,
                            "retrying github request after transport error"
                        );
                        tokio::time::sleep(retry_delay(self.retry_base_delay_ms, attempt, None))
                            .await;
                        continue;
                    }
                    return Err(error)
                        .with_context(|| format!("github api {operation} request failed"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::GithubApiClient;
    use crate::repo_ref::RepoRef;

    fn test_client(base_url: &str) -> GithubApiClient {
        GithubApiClient::new(base_url.to_string(), "test-token".to_string(), 3_000, 3, 1)
            .expect("client")
    }

    #[tokio::test]
    async fn unit_get_repository_maps_not_found_to_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/missing");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        });

        let client = test_client(&server.base_url());
        let repository = client
            .get_repository("octo", "missing")
            .await
            .expect("request");
        assert!(repository.is_none());
    }

    #[tokio::test]
    async fn unit_list_open_issues_filters_pull_requests() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/octo/widgets/issues")
                .query_param("state", "open");
            then.status(200).json_body(json!([
                {
                    "id": 1,
                    "number": 7,
                    "title": "A real issue",
                    "body": "details",
                    "state": "open",
                    "user": { "login": "alice" }
                },
                {
                    "id": 2,
                    "number": 8,
                    "title": "A pull request",
                    "body": null,
                    "state": "open",
                    "user": { "login": "bob" },
                    "pull_request": { "url": "https://example.invalid/pr/8" }
                }
            ]));
        });

        let client = test_client(&server.base_url());
        let repo = RepoRef::new("octo", "widgets");
        let page = client.list_open_issues(&repo, 1).await.expect("request");
        assert_eq!(page.issues.len(), 1);
        assert_eq!(page.issues[0].number, 7);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn unit_get_issue_fetches_one_issue_by_number() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/widgets/issues/42");
            then.status(200).json_body(json!({
                "id": 420,
                "number": 42,
                "title": "Answer",
                "body": "everything",
                "state": "open",
                "user": { "login": "alice" }
            }));
        });

        let client = test_client(&server.base_url());
        let repo = RepoRef::new("octo", "widgets");
        let issue = client.get_issue(&repo, 42).await.expect("request");
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Answer");
    }

    #[tokio::test]
    async fn functional_request_retries_retryable_statuses_up_to_the_attempt_cap() {
        let server = MockServer::start();
        let flaky = server.mock(|when, then| {
            when.method(GET).path("/user");
            then.status(503).json_body(json!({ "message": "unavailable" }));
        });

        let client = test_client(&server.base_url());
        let error = client.authenticated_login().await.expect_err("must fail");
        assert_eq!(flaky.hits(), 3);
        assert!(format!("{error:#}").contains("503"));
    }

    #[tokio::test]
    async fn regression_non_retryable_status_fails_on_first_attempt() {
        let server = MockServer::start();
        let denied = server.mock(|when, then| {
            when.method(GET).path("/user");
            then.status(401).json_body(json!({ "message": "Bad credentials" }));
        });

        let client = test_client(&server.base_url());
        let error = client.authenticated_login().await.expect_err("must fail");
        assert_eq!(denied.hits(), 1);
        assert!(format!("{error:#}").contains("401"));
    }

    #[tokio::test]
    async fn functional_list_repositories_walks_every_page() {
        let server = MockServer::start();
        let full_page: Vec<serde_json::Value> = (0..super::GITHUB_PAGE_SIZE)
            .map(|index| {
                json!({
                    "name": format!("repo-{index}"),
                    "full_name": format!("octo/repo-{index}"),
                    "owner": { "login": "octo" },
                    "stargazers_count": index,
                    "updated_at": "2026-01-01T00:00:00Z"
                })
            })
            .collect();
        server.mock(|when, then| {
            when.method(GET).path("/user/repos").query_param("page", "1");
            then.status(200).json_body(json!(full_page));
        });
        server.mock(|when, then| {
            when.method(GET).path("/user/repos").query_param("page", "2");
            then.status(200).json_body(json!([{
                "name": "tail",
                "full_name": "octo/tail",
                "owner": { "login": "octo" },
                "stargazers_count": 1,
                "updated_at": "2026-01-02T00:00:00Z"
            }]));
        });

        let client = test_client(&server.base_url());
        let repositories = client.list_repositories().await.expect("request");
        assert_eq!(repositories.len(), super::GITHUB_PAGE_SIZE + 1);
        assert_eq!(repositories.last().expect("tail").name, "tail");
    }
}
