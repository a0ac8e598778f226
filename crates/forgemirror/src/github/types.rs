//! GitHub API data types.
//!
//! Only the fields the syncers read are modelled; everything else in the
//! response is ignored by serde.

use serde::{Deserialize, Serialize};

/// A repository milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubMilestone {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 timestamp, e.g. `2024-03-15T00:00:00Z`.
    #[serde(default)]
    pub due_on: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A repository label.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubLabel {
    pub name: String,
    /// Hex color, normally without a leading `#`.
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Label as embedded in an issue payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubLabelRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

/// An issue. The issues endpoint also returns pull requests, which carry a
/// `pull_request` member.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<GitHubLabelRef>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl GitHubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// An issue comment.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubComment {
    pub id: u64,
    pub user: GitHubUser,
    #[serde(default)]
    pub body: Option<String>,
}

/// Response of `GET /search/issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssueSearch {
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<GitHubIssue>,
}

/// Payload for `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGitHubIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}
