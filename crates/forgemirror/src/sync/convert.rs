//! Translation of source entities into target creation payloads.

use chrono::{DateTime, NaiveDate};

use crate::github::{GitHubComment, GitHubIssue, GitHubLabel, GitHubMilestone, NewGitHubIssue};
use crate::gitlab::{
    GitLabIssue, NewGitLabIssue, NewGitLabLabel, NewGitLabMilestone, NewGitLabNote,
};
use crate::platform::Forge;

/// Strip leading `#` characters from a hex color.
pub fn strip_color_hash(color: &str) -> String {
    color.trim_start_matches('#').to_string()
}

/// Reduce a timestamp such as `2024-03-15T00:00:00Z` to `2024-03-15`.
///
/// The date is taken as written, without converting time zones. Returns
/// `None` for empty or unparseable input.
pub fn due_date(due_on: &str) -> Option<String> {
    let due_on = due_on.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(due_on) {
        return Some(ts.date_naive().format("%Y-%m-%d").to_string());
    }
    let prefix = due_on.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn milestone_payload(milestone: &GitHubMilestone) -> NewGitLabMilestone {
    NewGitLabMilestone {
        title: milestone.title.clone(),
        description: milestone.description.clone().unwrap_or_default(),
        due_date: milestone.due_on.as_deref().and_then(due_date),
    }
}

pub fn label_payload(label: &GitHubLabel) -> NewGitLabLabel {
    NewGitLabLabel {
        name: label.name.clone(),
        color: strip_color_hash(&label.color),
        description: label.description.clone().unwrap_or_default(),
    }
}

fn synced_footer(body: &str, origin: Forge, url: &str) -> String {
    format!("{body}\n\n---\n*Synced from {origin}: {url}*")
}

pub fn issue_to_gitlab(issue: &GitHubIssue) -> NewGitLabIssue {
    NewGitLabIssue {
        title: Forge::GitHub.tag_title(&issue.title),
        description: synced_footer(
            issue.body.as_deref().unwrap_or_default(),
            Forge::GitHub,
            &issue.html_url,
        ),
        labels: issue.label_names().join(","),
    }
}

pub fn issue_to_github(issue: &GitLabIssue) -> NewGitHubIssue {
    NewGitHubIssue {
        title: Forge::GitLab.tag_title(&issue.title),
        body: synced_footer(
            issue.description.as_deref().unwrap_or_default(),
            Forge::GitLab,
            &issue.web_url,
        ),
        labels: issue.labels.clone(),
    }
}

pub fn comment_note(comment: &GitHubComment) -> NewGitLabNote {
    NewGitLabNote {
        body: format!(
            "**{}** (from GitHub):\n\n{}",
            comment.user.login,
            comment.body.as_deref().unwrap_or_default()
        ),
    }
}
