//! In-memory repository selection and seen-issue history.
//!
//! One instance lives for the plugin's lifetime and is mutated only by the
//! command handlers; the host invokes one hook at a time, so no locking is
//! layered on top. Seen-state is keyed by `(repository, issue)` so issue
//! numbers colliding across repositories are never misclassified.

use std::collections::HashSet;

use rook_github::RepoRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Public struct `SeenIssueKey` used across Rook components.
pub struct SeenIssueKey {
    pub repo_slug: String,
    pub issue_number: u64,
}

#[derive(Debug, Default)]
/// Public struct `RepositorySession` used across Rook components.
pub struct RepositorySession {
    selected: Option<RepoRef>,
    seen: Vec<SeenIssueKey>,
    seen_index: HashSet<SeenIssueKey>,
}

impl RepositorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_repository(&self) -> Option<&RepoRef> {
        self.selected.as_ref()
    }

    /// Replaces the selection. Seen history is untouched so returning to a
    /// repository resumes traversal where it left off.
    pub fn select_repository(&mut self, repo: RepoRef) {
        self.selected = Some(repo);
    }

    pub fn has_seen(&self, repo: &RepoRef, issue_number: u64) -> bool {
        self.seen_index.contains(&SeenIssueKey {
            repo_slug: repo.as_slug(),
            issue_number,
        })
    }

    /// Appends the key if absent; returns whether it was new.
    pub fn mark_seen(&mut self, repo: &RepoRef, issue_number: u64) -> bool {
        let key = SeenIssueKey {
            repo_slug: repo.as_slug(),
            issue_number,
        };
        if self.seen_index.contains(&key) {
            return false;
        }
        self.seen.push(key.clone());
        self.seen_index.insert(key);
        true
    }

    /// Most recently seen issue for the given repository, if any.
    pub fn last_seen_issue(&self, repo: &RepoRef) -> Option<u64> {
        let slug = repo.as_slug();
        self.seen
            .iter()
            .rev()
            .find(|key| key.repo_slug == slug)
            .map(|key| key.issue_number)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn seen_issues(&self) -> &[SeenIssueKey] {
        &self.seen
    }
}
