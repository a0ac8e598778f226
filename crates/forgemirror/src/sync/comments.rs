//! GitHub → GitLab comment sync for a single issue.

use super::convert::comment_note;
use super::engine::{abort, complete, failure, record, require_project, start};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{EntityKind, EntityOutcome, SyncError, SyncOptions, SyncReport};
use crate::github::{GitHubClient, GitHubComment};
use crate::gitlab::{GitLabClient, GitLabIssue};
use crate::platform::{Forge, short_error_message};

const KIND: EntityKind = EntityKind::Comment;

/// Copy the comments of GitHub issue `issue_number` onto its GitLab
/// counterpart.
///
/// The counterpart is found by searching GitLab issues with the GitHub
/// issue's title. Without one, the operation fails and no notes are posted.
/// Comments whose translated body already exists as a note are skipped.
pub async fn sync_comments(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    issue_number: u64,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, SyncError> {
    let mut report = start(KIND, Forge::GitHub, Forge::GitLab, on_progress);
    require_project(gitlab, KIND, on_progress).await?;

    let issue = github.get_issue(issue_number).await.map_err(|source| {
        abort(
            KIND,
            SyncError::SourceIssueUnavailable {
                number: issue_number,
                source,
            },
            on_progress,
        )
    })?;

    let comments = github.list_comments(issue_number).await.map_err(|source| {
        abort(
            KIND,
            SyncError::SourceUnavailable {
                kind: KIND.plural(),
                forge: Forge::GitHub,
                source,
            },
            on_progress,
        )
    })?;
    emit(
        on_progress,
        SyncProgress::FetchedSource {
            kind: KIND,
            count: comments.len(),
        },
    );

    let candidates = gitlab.search_issues(&issue.title).await.map_err(|source| {
        abort(
            KIND,
            SyncError::ParentLookupFailed {
                number: issue_number,
                forge: Forge::GitLab,
                source,
            },
            on_progress,
        )
    })?;
    let parent = find_parent(&candidates, &issue.title, options).ok_or_else(|| {
        abort(
            KIND,
            SyncError::ParentNotFound {
                number: issue_number,
                title: issue.title.clone(),
            },
            on_progress,
        )
    })?;
    tracing::debug!(
        github_issue = issue_number,
        gitlab_issue = parent.iid,
        "Located GitLab issue for comments"
    );

    let existing: Vec<String> = match gitlab.list_notes(parent.iid).await {
        Ok(notes) => notes.into_iter().map(|n| n.body).collect(),
        Err(e) => {
            emit(
                on_progress,
                SyncProgress::Warning {
                    message: format!(
                        "Could not list notes on GitLab issue #{}: {}",
                        parent.iid,
                        short_error_message(&e)
                    ),
                },
            );
            Vec::new()
        }
    };

    for comment in &comments {
        let outcome = sync_one(gitlab, parent.iid, comment, &existing, options).await;
        record(&mut report, on_progress, &comment_name(comment), outcome);
    }

    Ok(complete(report, on_progress))
}

fn find_parent<'a>(
    candidates: &'a [GitLabIssue],
    title: &str,
    options: &SyncOptions,
) -> Option<&'a GitLabIssue> {
    let tagged = Forge::GitHub.tag_title(title);
    options
        .match_policy
        .find(candidates, |i| i.title.as_str(), &[title, tagged.as_str()])
}

fn comment_name(comment: &GitHubComment) -> String {
    format!("comment {} by {}", comment.id, comment.user.login)
}

async fn sync_one(
    gitlab: &GitLabClient,
    parent_iid: u64,
    comment: &GitHubComment,
    existing: &[String],
    options: &SyncOptions,
) -> EntityOutcome {
    let note = comment_note(comment);
    if existing.iter().any(|body| *body == note.body) {
        return EntityOutcome::AlreadyPresent;
    }
    if options.dry_run {
        return EntityOutcome::WouldCreate;
    }
    match gitlab.create_note(parent_iid, &note).await {
        Ok(_) => EntityOutcome::Created,
        Err(e) => failure("create", &e),
    }
}
