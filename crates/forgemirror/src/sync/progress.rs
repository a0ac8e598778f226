//! Progress reporting types for sync and mirror operations.
//!
//! The library never prints; it emits [`SyncProgress`] events through an
//! optional callback and leaves presentation to the caller.

use super::types::{EntityKind, SkipReason};
use crate::platform::Forge;

/// Progress events emitted during sync operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum SyncProgress {
    /// Starting an entity sync.
    SyncStarted {
        kind: EntityKind,
        from: Forge,
        to: Forge,
    },

    /// Source entities fetched.
    FetchedSource {
        kind: EntityKind,
        count: usize,
    },

    /// An entity was created on the target.
    Created {
        kind: EntityKind,
        name: String,
    },

    /// Dry run: an entity would have been created.
    WouldCreate {
        kind: EntityKind,
        name: String,
    },

    /// A match already exists on the target.
    AlreadyPresent {
        kind: EntityKind,
        name: String,
    },

    /// An entity was deliberately not synced.
    Skipped {
        kind: EntityKind,
        name: String,
        reason: SkipReason,
    },

    /// Searching or creating an entity failed.
    Failed {
        kind: EntityKind,
        name: String,
        error: String,
    },

    /// Entity sync finished.
    SyncComplete {
        kind: EntityKind,
        from: Forge,
        to: Forge,
        created: usize,
        already_present: usize,
        skipped: usize,
        failed: usize,
    },

    /// Entity sync stopped before processing any entity.
    SyncAborted {
        kind: EntityKind,
        error: String,
    },

    /// Starting to mirror branches.
    MirrorStarted {
        from: Forge,
        to: Forge,
        repo: String,
    },

    /// Creating the scratch clone.
    Cloning {
        path: String,
    },

    /// Remote branches enumerated.
    BranchesFound {
        count: usize,
    },

    /// A branch was pushed to the target.
    BranchPushed {
        branch: String,
    },

    /// Dry run: a branch would have been pushed.
    BranchWouldPush {
        branch: String,
    },

    /// Checking out or pushing a branch failed.
    BranchFailed {
        branch: String,
        error: String,
    },

    /// Branch mirroring finished.
    MirrorComplete {
        from: Forge,
        to: Forge,
        pushed: usize,
        failed: usize,
    },

    /// Branch mirroring stopped before pushing anything.
    MirrorAborted {
        from: Forge,
        to: Forge,
        error: String,
    },

    /// Warning message (non-fatal).
    Warning {
        message: String,
    },
}

/// Callback for progress updates during sync operations.
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: SyncProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_with_callback() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        let callback: ProgressCallback = Box::new(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        emit(
            Some(&callback),
            SyncProgress::FetchedSource {
                kind: EntityKind::Label,
                count: 3,
            },
        );
        emit(
            Some(&callback),
            SyncProgress::BranchPushed {
                branch: "main".to_string(),
            },
        );

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_without_callback() {
        emit(
            None,
            SyncProgress::Warning {
                message: "ignored".to_string(),
            },
        );
    }

    #[test]
    fn test_sync_progress_debug() {
        let event = SyncProgress::Skipped {
            kind: EntityKind::Issue,
            name: "[GitHub] Crash".to_string(),
            reason: SkipReason::ImportedFrom(Forge::GitHub),
        };

        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("Skipped"));
        assert!(debug_str.contains("[GitHub] Crash"));
    }
}
