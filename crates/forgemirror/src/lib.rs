//! Forgemirror - keep a GitHub repository and its GitLab counterpart in step.
//!
//! The library covers two kinds of work:
//!
//! - [`sync`]: copies milestones, labels, issues and issue comments through
//!   the forges' REST APIs, creating only what the target is missing.
//! - [`mirror`]: pushes every branch of one repository to the other through
//!   a reusable scratch clone.
//!
//! All HTTP goes through [`http::HttpTransport`] and all subprocesses through
//! [`mirror::CommandRunner`]. Nothing here prints; progress is reported as
//! [`sync::SyncProgress`] events.
//!
//! # Example
//!
//! ```ignore
//! use forgemirror::{GitHubClient, GitLabClient, RepoPath};
//! use forgemirror::sync::{Direction, SyncOptions, sync_issues};
//!
//! let github = GitHubClient::new(github::DEFAULT_API_BASE, Some(&token), RepoPath::parse("octo/widgets")?, timeout)?;
//! let gitlab = GitLabClient::new(gitlab::DEFAULT_API_BASE, Some(&token), "octo/widgets", timeout)?;
//!
//! for result in sync_issues(&github, &gitlab, Direction::Both, &SyncOptions::default(), None).await {
//!     let report = result?;
//!     println!("{} → {}: {} created", report.from, report.to, report.created);
//! }
//! ```

pub mod github;
pub mod gitlab;
pub mod http;
pub mod mirror;
pub mod platform;
pub mod sync;

pub use github::GitHubClient;
pub use gitlab::GitLabClient;
pub use platform::{Forge, PlatformError, RepoPath};
