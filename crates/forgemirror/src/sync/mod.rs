//! Entity sync between GitHub and GitLab.
//!
//! Each syncer lists the source entities, looks for an equivalent on the
//! target through its search endpoint, and creates the ones that are
//! missing. Per-entity failures are recorded in the returned
//! [`SyncReport`] and never stop the batch; failures that make the whole
//! operation meaningless (missing project, unreadable source) come back as
//! [`SyncError`].
//!
//! # Example
//!
//! ```ignore
//! use forgemirror::sync::{SyncOptions, sync_labels};
//!
//! let report = sync_labels(&github, &gitlab, &SyncOptions::default(), None).await?;
//! println!("{} created, {} already present", report.created, report.already_present);
//! ```

mod comments;
pub mod convert;
mod engine;
mod issues;
mod labels;
mod milestones;
mod progress;
mod types;

pub use comments::sync_comments;
pub use issues::{sync_issues, sync_issues_to_github, sync_issues_to_gitlab};
pub use labels::sync_labels;
pub use milestones::sync_milestones;
pub use progress::{ProgressCallback, SyncProgress, emit};
pub use types::{
    Direction, EntityFailure, EntityKind, EntityOutcome, MatchPolicy, SkipReason, SyncError,
    SyncOptions, SyncReport,
};
