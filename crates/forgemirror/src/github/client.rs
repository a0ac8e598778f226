//! GitHub API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use super::types::{
    GitHubComment, GitHubIssue, GitHubIssueSearch, GitHubLabel, GitHubMilestone, NewGitHubIssue,
};
use crate::http::HttpTransport;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::platform::{DEFAULT_MAX_PAGES, PlatformError, RepoPath, RestClient, Result};

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Client for a single GitHub repository.
#[derive(Clone)]
pub struct GitHubClient {
    rest: RestClient,
    repo: RepoPath,
    max_pages: u32,
}

impl GitHubClient {
    /// Create a client backed by reqwest.
    ///
    /// # Arguments
    ///
    /// * `api_base` - API root, e.g. `https://api.github.com`
    /// * `token` - Personal access token; requests are anonymous when `None`
    /// * `repo` - Repository in `owner/repo` form
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_base: &str,
        token: Option<&str>,
        repo: RepoPath,
        timeout: StdDuration,
    ) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout)
            .map_err(|e| PlatformError::network(e.to_string()))?;
        Ok(Self::new_with_transport(
            api_base,
            token,
            repo,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        api_base: &str,
        token: Option<&str>,
        repo: RepoPath,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut headers = vec![(
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        )];
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("token {token}")));
        }
        Self {
            rest: RestClient::new(transport, api_base, headers),
            repo,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Set how many pages list endpoints may fetch.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn repo(&self) -> &RepoPath {
        &self.repo
    }

    pub fn api_base(&self) -> &str {
        self.rest.base()
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!("/repos/{}{}", self.repo, suffix)
    }

    /// List milestones in every state.
    pub async fn list_milestones(&self) -> Result<Vec<GitHubMilestone>> {
        self.rest
            .get_all(
                &self.repo_path("/milestones"),
                &[("state", "all")],
                "milestones",
                self.max_pages,
            )
            .await
    }

    pub async fn list_labels(&self) -> Result<Vec<GitHubLabel>> {
        self.rest
            .get_all(&self.repo_path("/labels"), &[], "labels", self.max_pages)
            .await
    }

    /// List issues in every state. Pull requests are included, as GitHub
    /// returns them from this endpoint.
    pub async fn list_issues(&self) -> Result<Vec<GitHubIssue>> {
        self.rest
            .get_all(
                &self.repo_path("/issues"),
                &[("state", "all")],
                "issues",
                self.max_pages,
            )
            .await
    }

    pub async fn get_issue(&self, number: u64) -> Result<GitHubIssue> {
        self.rest
            .get(
                &self.repo_path(&format!("/issues/{number}")),
                &[],
                &format!("issue #{number} in {}", self.repo),
            )
            .await
    }

    pub async fn list_comments(&self, number: u64) -> Result<Vec<GitHubComment>> {
        self.rest
            .get_all(
                &self.repo_path(&format!("/issues/{number}/comments")),
                &[],
                &format!("comments of issue #{number}"),
                self.max_pages,
            )
            .await
    }

    /// Search this repository's issues by title.
    pub async fn search_issues(&self, title: &str) -> Result<Vec<GitHubIssue>> {
        let quoted = title.replace('"', "");
        let query = format!("\"{quoted}\" repo:{} is:issue in:title", self.repo);
        let found: GitHubIssueSearch = self
            .rest
            .get("/search/issues", &[("q", query.as_str())], "issue search")
            .await?;
        Ok(found.items)
    }

    pub async fn create_issue(&self, issue: &NewGitHubIssue) -> Result<GitHubIssue> {
        self.rest
            .post(&self.repo_path("/issues"), issue, "issue")
            .await
    }
}
