//! GitLab API data types.

use serde::{Deserialize, Serialize};

/// Project as returned by `GET /projects/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Internal numeric project ID.
    pub id: u64,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabMilestone {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabLabel {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabIssue {
    pub id: u64,
    /// Project-scoped issue number.
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub web_url: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A comment ("note") on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNote {
    pub id: u64,
    pub body: String,
}

/// Payload for `POST /projects/:id/milestones`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGitLabMilestone {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Payload for `POST /projects/:id/labels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGitLabLabel {
    pub name: String,
    pub color: String,
    pub description: String,
}

/// Payload for `POST /projects/:id/issues`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGitLabIssue {
    pub title: String,
    pub description: String,
    /// Comma-separated label names.
    pub labels: String,
}

/// Payload for `POST /projects/:id/issues/:iid/notes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGitLabNote {
    pub body: String,
}
