//! Shared sync types: directions, match policy, per-entity outcomes and
//! per-run reports.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::platform::{Forge, PlatformError};

/// Which way entities flow. GitHub is the source, GitLab the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Both,
    /// GitHub → GitLab.
    SourceToTarget,
    /// GitLab → GitHub.
    TargetToSource,
}

impl Direction {
    /// The `(from, to)` pairs this direction covers, in execution order.
    pub fn legs(self) -> Vec<(Forge, Forge)> {
        match self {
            Direction::Both => vec![
                (Forge::GitHub, Forge::GitLab),
                (Forge::GitLab, Forge::GitHub),
            ],
            Direction::SourceToTarget => vec![(Forge::GitHub, Forge::GitLab)],
            Direction::TargetToSource => vec![(Forge::GitLab, Forge::GitHub)],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Both => "both",
            Direction::SourceToTarget => "source-to-target",
            Direction::TargetToSource => "target-to-source",
        })
    }
}

/// Entity types handled by the syncers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Milestone,
    Label,
    Issue,
    Comment,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Milestone => "milestone",
            EntityKind::Label => "label",
            EntityKind::Issue => "issue",
            EntityKind::Comment => "comment",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Milestone => "milestones",
            EntityKind::Label => "labels",
            EntityKind::Issue => "issues",
            EntityKind::Comment => "comments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How search results on the target are interpreted.
///
/// Labels always require an exact name match regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Any search result counts as a match.
    #[default]
    Any,
    /// Only a result whose title equals an accepted title counts.
    Exact,
}

impl MatchPolicy {
    /// Pick the matching candidate, if any.
    ///
    /// `accepted` lists the titles that count as equal under [`MatchPolicy::Exact`].
    pub fn find<'a, T>(
        self,
        candidates: &'a [T],
        title_of: impl Fn(&T) -> &str,
        accepted: &[&str],
    ) -> Option<&'a T> {
        match self {
            MatchPolicy::Any => candidates.first(),
            MatchPolicy::Exact => candidates
                .iter()
                .find(|c| accepted.contains(&title_of(c))),
        }
    }
}

/// Options shared by all entity syncers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub match_policy: MatchPolicy,
    /// Read and match, but never create.
    pub dry_run: bool,
}

/// Why a source entity was deliberately not synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Pull/merge requests are out of scope.
    PullRequest,
    /// The entity was itself imported from the given forge.
    ImportedFrom(Forge),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PullRequest => f.write_str("pull request"),
            SkipReason::ImportedFrom(forge) => write!(f, "imported from {forge}"),
        }
    }
}

/// Result of processing a single source entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    Created,
    /// Dry run: the entity would have been created.
    WouldCreate,
    /// A match already exists on the target.
    AlreadyPresent,
    Skipped(SkipReason),
    Failed(String),
}

/// A single entity that could not be synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFailure {
    pub name: String,
    pub error: String,
}

/// Aggregated outcome of one sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub kind: EntityKind,
    pub from: Forge,
    pub to: Forge,
    pub created: usize,
    pub would_create: usize,
    pub already_present: usize,
    pub skipped: usize,
    pub failures: Vec<EntityFailure>,
}

impl SyncReport {
    pub fn new(kind: EntityKind, from: Forge, to: Forge) -> Self {
        Self {
            kind,
            from,
            to,
            created: 0,
            would_create: 0,
            already_present: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, outcome: &EntityOutcome) {
        match outcome {
            EntityOutcome::Created => self.created += 1,
            EntityOutcome::WouldCreate => self.would_create += 1,
            EntityOutcome::AlreadyPresent => self.already_present += 1,
            EntityOutcome::Skipped(_) => self.skipped += 1,
            EntityOutcome::Failed(error) => self.failures.push(EntityFailure {
                name: name.to_string(),
                error: error.clone(),
            }),
        }
    }

    /// Number of source entities processed.
    pub fn processed(&self) -> usize {
        self.created + self.would_create + self.already_present + self.skipped + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Operation-level failures that stop a sync before any entity is processed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("GitLab project not found: {0}")]
    ProjectNotFound(#[source] PlatformError),

    #[error("failed to list {kind} on {forge}: {source}")]
    SourceUnavailable {
        kind: &'static str,
        forge: Forge,
        #[source]
        source: PlatformError,
    },

    #[error("GitHub issue #{number} unavailable: {source}")]
    SourceIssueUnavailable {
        number: u64,
        #[source]
        source: PlatformError,
    },

    #[error("failed to look up the {forge} issue for #{number}: {source}")]
    ParentLookupFailed {
        number: u64,
        forge: Forge,
        #[source]
        source: PlatformError,
    },

    #[error("no GitLab issue matches GitHub issue #{number} ({title})")]
    ParentNotFound { number: u64, title: String },
}

impl SyncError {
    /// Whether this is a not-found condition rather than a remote error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SyncError::ProjectNotFound(_) | SyncError::ParentNotFound { .. }
        ) || matches!(
            self,
            SyncError::SourceIssueUnavailable { source, .. } if source.is_not_found()
        )
    }
}
