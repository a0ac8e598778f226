use std::fmt;

use super::errors::{PlatformError, Result};

/// The two forges this crate mirrors between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Forge {
    /// The primary forge.
    GitHub,
    /// The secondary forge.
    GitLab,
}

impl Forge {
    /// Human-readable platform name.
    pub fn name(self) -> &'static str {
        match self {
            Forge::GitHub => "GitHub",
            Forge::GitLab => "GitLab",
        }
    }

    /// Tag prefixed to titles of issues imported from this forge.
    pub fn origin_tag(self) -> &'static str {
        match self {
            Forge::GitHub => "[GitHub]",
            Forge::GitLab => "[GitLab]",
        }
    }

    /// The forge on the other side of the mirror.
    pub fn other(self) -> Forge {
        match self {
            Forge::GitHub => Forge::GitLab,
            Forge::GitLab => Forge::GitHub,
        }
    }

    /// Prefix `title` with this forge's origin tag.
    pub fn tag_title(self, title: &str) -> String {
        format!("{} {}", self.origin_tag(), title)
    }

    /// Whether `title` already carries this forge's origin tag.
    pub fn is_tagged(self, title: &str) -> bool {
        title.contains(self.origin_tag())
    }
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A repository path in `owner/repo` form.
///
/// GitLab paths may carry nested groups (`group/subgroup/project`), so any
/// number of segments above one is accepted as long as none is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoPath(String);

impl RepoPath {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(PlatformError::invalid_input(format!(
                "repository path '{raw}' is not in owner/repo form"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path segment.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
