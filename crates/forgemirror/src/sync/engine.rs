//! Bookkeeping shared by the entity syncers.

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{EntityKind, EntityOutcome, SyncError, SyncReport};
use crate::gitlab::GitLabClient;
use crate::platform::{Forge, short_error_message};

/// Record `outcome` for `name` in the report and emit the matching event.
pub(crate) fn record(
    report: &mut SyncReport,
    on_progress: Option<&ProgressCallback>,
    name: &str,
    outcome: EntityOutcome,
) {
    report.record(name, &outcome);
    let kind = report.kind;
    let name = name.to_string();
    let event = match outcome {
        EntityOutcome::Created => SyncProgress::Created { kind, name },
        EntityOutcome::WouldCreate => SyncProgress::WouldCreate { kind, name },
        EntityOutcome::AlreadyPresent => SyncProgress::AlreadyPresent { kind, name },
        EntityOutcome::Skipped(reason) => SyncProgress::Skipped { kind, name, reason },
        EntityOutcome::Failed(error) => {
            tracing::debug!(kind = %kind, name = %name, error = %error, "Entity sync failed");
            SyncProgress::Failed { kind, name, error }
        }
    };
    emit(on_progress, event);
}

/// Emit the start event and return an empty report.
pub(crate) fn start(
    kind: EntityKind,
    from: Forge,
    to: Forge,
    on_progress: Option<&ProgressCallback>,
) -> SyncReport {
    tracing::debug!(kind = %kind, from = %from, to = %to, "Starting sync");
    emit(on_progress, SyncProgress::SyncStarted { kind, from, to });
    SyncReport::new(kind, from, to)
}

/// Emit the completion event for a finished report.
pub(crate) fn complete(report: SyncReport, on_progress: Option<&ProgressCallback>) -> SyncReport {
    emit(
        on_progress,
        SyncProgress::SyncComplete {
            kind: report.kind,
            from: report.from,
            to: report.to,
            created: report.created + report.would_create,
            already_present: report.already_present,
            skipped: report.skipped,
            failed: report.failures.len(),
        },
    );
    report
}

/// Emit the abort event and hand the error back.
pub(crate) fn abort(
    kind: EntityKind,
    error: SyncError,
    on_progress: Option<&ProgressCallback>,
) -> SyncError {
    tracing::debug!(kind = %kind, error = %error, "Sync aborted");
    emit(
        on_progress,
        SyncProgress::SyncAborted {
            kind,
            error: error.to_string(),
        },
    );
    error
}

/// Resolve the GitLab project, aborting the operation when it is missing.
pub(crate) async fn require_project(
    gitlab: &GitLabClient,
    kind: EntityKind,
    on_progress: Option<&ProgressCallback>,
) -> Result<u64, SyncError> {
    gitlab
        .project_id()
        .await
        .map_err(|e| abort(kind, SyncError::ProjectNotFound(e), on_progress))
}

/// Failure message for an entity-level remote error.
pub(crate) fn failure(step: &str, error: &impl std::error::Error) -> EntityOutcome {
    EntityOutcome::Failed(format!("{step} failed: {}", short_error_message(error)))
}
