//! GitHub → GitLab milestone sync.

use super::convert::milestone_payload;
use super::engine::{abort, complete, failure, record, require_project, start};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{EntityKind, EntityOutcome, SyncError, SyncOptions, SyncReport};
use crate::github::{GitHubClient, GitHubMilestone};
use crate::gitlab::GitLabClient;
use crate::platform::Forge;

const KIND: EntityKind = EntityKind::Milestone;

/// Copy GitHub milestones (all states) to GitLab, skipping titles that
/// already exist there.
pub async fn sync_milestones(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, SyncError> {
    let mut report = start(KIND, Forge::GitHub, Forge::GitLab, on_progress);
    require_project(gitlab, KIND, on_progress).await?;

    let milestones = github.list_milestones().await.map_err(|source| {
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
            count: milestones.len(),
        },
    );

    for milestone in &milestones {
        let outcome = sync_one(gitlab, milestone, options).await;
        record(&mut report, on_progress, &milestone.title, outcome);
    }

    Ok(complete(report, on_progress))
}

async fn sync_one(
    gitlab: &GitLabClient,
    milestone: &GitHubMilestone,
    options: &SyncOptions,
) -> EntityOutcome {
    let existing = match gitlab.search_milestones(&milestone.title).await {
        Ok(found) => found,
        Err(e) => return failure("search", &e),
    };
    if options
        .match_policy
        .find(&existing, |m| m.title.as_str(), &[milestone.title.as_str()])
        .is_some()
    {
        return EntityOutcome::AlreadyPresent;
    }

    if options.dry_run {
        return EntityOutcome::WouldCreate;
    }
    match gitlab.create_milestone(&milestone_payload(milestone)).await {
        Ok(_) => EntityOutcome::Created,
        Err(e) => failure("create", &e),
    }
}
