//! GitHub REST collaborator for the Rook issue plugin.
//! Provides wire models, transport retry helpers, and the async API client
//! consumed by the plugin adapter crate.

pub mod github_api_client;
pub mod github_models;
pub mod github_transport_helpers;
pub mod repo_ref;

pub use github_api_client::{GithubApiClient, GithubIssuePage, GITHUB_PAGE_SIZE};
pub use repo_ref::RepoRef;
