//! GitLab API client and project resolver.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::Mutex;

use super::types::{
    GitLabIssue, GitLabLabel, GitLabMilestone, GitLabNote, GitLabProject, NewGitLabIssue,
    NewGitLabLabel, NewGitLabMilestone, NewGitLabNote,
};
use crate::http::HttpTransport;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::platform::{
    DEFAULT_MAX_PAGES, PlatformError, RepoPath, RestClient, Result, encode_path_segment,
};

/// Public GitLab API root.
pub const DEFAULT_API_BASE: &str = "https://gitlab.com/api/v4";

/// Client for a single GitLab project.
///
/// The numeric project ID is resolved on first use and cached for the
/// lifetime of the client; clones share the cache.
#[derive(Clone)]
pub struct GitLabClient {
    rest: RestClient,
    repo: String,
    max_pages: u32,
    project_id: Arc<Mutex<Option<u64>>>,
}

impl GitLabClient {
    /// Create a client backed by reqwest.
    ///
    /// # Arguments
    ///
    /// * `api_base` - API root, e.g. `https://gitlab.com/api/v4`
    /// * `token` - Personal access token; requests are anonymous when `None`
    /// * `repo` - Project path, e.g. `group/project`
    /// * `timeout` - Per-request timeout
    pub fn new(
        api_base: &str,
        token: Option<&str>,
        repo: &str,
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
        repo: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut headers = Vec::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push(("PRIVATE-TOKEN".to_string(), token.to_string()));
        }
        Self {
            rest: RestClient::new(transport, api_base, headers),
            repo: repo.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            project_id: Arc::new(Mutex::new(None)),
        }
    }

    /// Set how many pages list endpoints may fetch.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn api_base(&self) -> &str {
        self.rest.base()
    }

    /// Resolve the project path to GitLab's numeric project ID.
    ///
    /// The first successful lookup is cached. Any failure, including a
    /// malformed path (which is rejected before any request), is reported
    /// as [`PlatformError::NotFound`] and is not cached.
    pub async fn project_id(&self) -> Result<u64> {
        let mut cached = self.project_id.lock().await;
        if let Some(id) = *cached {
            return Ok(id);
        }

        let path = RepoPath::parse(&self.repo)
            .map_err(|e| PlatformError::not_found(format!("project '{}' ({e})", self.repo)))?;
        let endpoint = format!("/projects/{}", encode_path_segment(path.as_str()));
        let project: GitLabProject = self
            .rest
            .get(&endpoint, &[], &format!("project {path}"))
            .await
            .map_err(|e| match e {
                PlatformError::NotFound { .. } => e,
                other => PlatformError::not_found(format!("project {path} ({other})")),
            })?;

        tracing::debug!(project = %path, id = project.id, "Resolved GitLab project");
        *cached = Some(project.id);
        Ok(project.id)
    }

    async fn project_path(&self, suffix: &str) -> Result<String> {
        let id = self.project_id().await?;
        Ok(format!("/projects/{id}{suffix}"))
    }

    pub async fn search_milestones(&self, search: &str) -> Result<Vec<GitLabMilestone>> {
        let path = self.project_path("/milestones").await?;
        self.rest
            .get(&path, &[("search", search)], "milestone search")
            .await
    }

    pub async fn create_milestone(&self, milestone: &NewGitLabMilestone) -> Result<GitLabMilestone> {
        let path = self.project_path("/milestones").await?;
        self.rest.post(&path, milestone, "milestone").await
    }

    pub async fn search_labels(&self, search: &str) -> Result<Vec<GitLabLabel>> {
        let path = self.project_path("/labels").await?;
        self.rest
            .get(&path, &[("search", search)], "label search")
            .await
    }

    pub async fn create_label(&self, label: &NewGitLabLabel) -> Result<GitLabLabel> {
        let path = self.project_path("/labels").await?;
        self.rest.post(&path, label, "label").await
    }

    /// List issues in every state.
    pub async fn list_issues(&self) -> Result<Vec<GitLabIssue>> {
        let path = self.project_path("/issues").await?;
        self.rest
            .get_all(&path, &[("state", "all")], "issues", self.max_pages)
            .await
    }

    pub async fn search_issues(&self, search: &str) -> Result<Vec<GitLabIssue>> {
        let path = self.project_path("/issues").await?;
        self.rest
            .get(&path, &[("search", search)], "issue search")
            .await
    }

    pub async fn create_issue(&self, issue: &NewGitLabIssue) -> Result<GitLabIssue> {
        let path = self.project_path("/issues").await?;
        self.rest.post(&path, issue, "issue").await
    }

    pub async fn list_notes(&self, issue_iid: u64) -> Result<Vec<GitLabNote>> {
        let path = self
            .project_path(&format!("/issues/{issue_iid}/notes"))
            .await?;
        self.rest
            .get_all(&path, &[], "issue notes", self.max_pages)
            .await
    }

    pub async fn create_note(&self, issue_iid: u64, note: &NewGitLabNote) -> Result<GitLabNote> {
        let path = self
            .project_path(&format!("/issues/{issue_iid}/notes"))
            .await?;
        self.rest.post(&path, note, "note").await
    }
}
