//! GitLab REST client for the secondary forge.
//!
//! # Module Structure
//!
//! - [`types`] - Wire types for projects, milestones, labels, issues and notes
//! - [`client`] - The authenticated client, including the project resolver

mod client;
mod types;

pub use client::{DEFAULT_API_BASE, GitLabClient};
pub use types::{
    GitLabIssue, GitLabLabel, GitLabMilestone, GitLabNote, GitLabProject, NewGitLabIssue,
    NewGitLabLabel, NewGitLabMilestone, NewGitLabNote,
};
