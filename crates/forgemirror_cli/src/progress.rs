//! Progress reporting for sync and mirror runs.
//!
//! Two modes:
//! - Interactive (TTY): one spinner per operation, using indicatif
//! - Logging (non-TTY): structured events through tracing

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use forgemirror::sync::{ProgressCallback, SyncProgress};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Spinners for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, cron, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: SyncProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Finish any spinners still running (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use forgemirror::Forge;
    use forgemirror::sync::{EntityKind, SkipReason};

    use super::*;

    fn sample_events() -> Vec<SyncProgress> {
        vec![
            SyncProgress::SyncStarted {
                kind: EntityKind::Issue,
                from: Forge::GitHub,
                to: Forge::GitLab,
            },
            SyncProgress::FetchedSource {
                kind: EntityKind::Issue,
                count: 3,
            },
            SyncProgress::Skipped {
                kind: EntityKind::Issue,
                name: "Bump deps".to_string(),
                reason: SkipReason::PullRequest,
            },
            SyncProgress::Failed {
                kind: EntityKind::Issue,
                name: "Crash".to_string(),
                error: "create failed: HTTP 500".to_string(),
            },
            SyncProgress::SyncComplete {
                kind: EntityKind::Issue,
                from: Forge::GitHub,
                to: Forge::GitLab,
                created: 1,
                already_present: 0,
                skipped: 1,
                failed: 1,
            },
            SyncProgress::MirrorStarted {
                from: Forge::GitHub,
                to: Forge::GitLab,
                repo: "octo/widgets".to_string(),
            },
            SyncProgress::BranchPushed {
                branch: "main".to_string(),
            },
            SyncProgress::MirrorAborted {
                from: Forge::GitLab,
                to: Forge::GitHub,
                error: "fetch failed".to_string(),
            },
        ]
    }

    #[test]
    fn test_logging_reporter_handles_every_event() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        for event in sample_events() {
            callback(event);
        }
        reporter.finish();
    }

    #[test]
    fn test_interactive_reporter_handles_every_event() {
        let reporter = ProgressReporter::Interactive(InteractiveReporter::hidden());
        for event in sample_events() {
            reporter.handle(event);
        }
        reporter.finish();
    }
}
