//! GitHub REST client for the primary forge.
//!
//! # Module Structure
//!
//! - [`types`] - Wire types for milestones, labels, issues and comments
//! - [`client`] - The authenticated client

mod client;
mod types;

pub use client::{DEFAULT_API_BASE, GitHubClient};
pub use types::{
    GitHubComment, GitHubIssue, GitHubIssueSearch, GitHubLabel, GitHubLabelRef, GitHubMilestone,
    GitHubUser, NewGitHubIssue,
};
