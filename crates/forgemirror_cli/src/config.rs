//! Configuration file support for forgemirror.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. Unprefixed environment variables (`GITHUB_TOKEN`, `GITLAB_REPO`, ...)
//! 2. Environment variables prefixed with `FORGEMIRROR_`, e.g.
//!    `FORGEMIRROR_GITHUB_TOKEN` or `FORGEMIRROR_SYNC_MAX_PAGES`
//! 3. `./forgemirror.toml`, or the file given with `--config`
//! 4. `~/.config/forgemirror/config.toml`
//! 5. Built-in defaults
//!
//! A `.env` file in the current directory is loaded into the environment
//! before any of this is read.
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."        # or GITHUB_TOKEN
//! repo = "octo/widgets"    # or GITHUB_REPO
//!
//! [gitlab]
//! token = "glpat-..."      # or GITLAB_TOKEN
//! repo = "octo/widgets"    # or GITLAB_REPO
//! api_base = "https://gitlab.example.com/api/v4"  # or GITLAB_API_BASE
//!
//! [sync]
//! match_policy = "exact"   # default "any"
//! max_pages = 10
//! strict = false
//!
//! [mirror]
//! work_dir = "/var/lib/forgemirror"
//! push_policy = "force"    # default "fast-forward"
//!
//! [http]
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config as ConfigBuilder, ConfigBuilder as Builder, File, FileFormat};
use directories::ProjectDirs;
use forgemirror::mirror::PushPolicy;
use forgemirror::platform::{DEFAULT_MAX_PAGES, RepoPath};
use forgemirror::sync::MatchPolicy;
use serde::Deserialize;
use thiserror::Error;

const APP_NAME: &str = "forgemirror";
const LOCAL_CONFIG: &str = "forgemirror.toml";
const ENV_PREFIX: &str = "FORGEMIRROR";

/// Keys that may be set through `FORGEMIRROR_<SECTION>_<KEY>`.
const PREFIXED_KEYS: &[&str] = &[
    "github.token",
    "github.repo",
    "github.api_base",
    "gitlab.token",
    "gitlab.repo",
    "gitlab.api_base",
    "sync.match_policy",
    "sync.max_pages",
    "sync.strict",
    "mirror.work_dir",
    "mirror.push_policy",
    "http.timeout_secs",
];

/// Unprefixed variables, applied last.
const PLAIN_ENV: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "github.token"),
    ("GITLAB_TOKEN", "gitlab.token"),
    ("GITHUB_REPO", "github.repo"),
    ("GITLAB_REPO", "gitlab.repo"),
    ("GITLAB_API_BASE", "gitlab.api_base"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("missing {}; set them in the environment or the config file", .0.join(" and "))]
    Missing(Vec<&'static str>),

    #[error("invalid GitHub repository '{repo}': {message} (expected owner/repository)")]
    InvalidRepo { repo: String, message: String },
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub gitlab: GitLabConfig,
    pub sync: SyncConfig,
    pub mirror: MirrorConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub token: Option<String>,
    /// `owner/repository`.
    pub repo: Option<String>,
    pub api_base: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            api_base: forgemirror::github::DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    pub token: Option<String>,
    /// `namespace/project`, subgroups allowed.
    pub repo: Option<String>,
    pub api_base: String,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            api_base: forgemirror::gitlab::DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Entity sync options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub match_policy: MatchPolicy,
    /// Upper bound on pages fetched per listing.
    pub max_pages: u32,
    /// Exit non-zero when anything failed.
    pub strict: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            max_pages: DEFAULT_MAX_PAGES,
            strict: false,
        }
    }
}

/// Code mirror options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Directory holding the scratch clones.
    pub work_dir: PathBuf,
    pub push_policy: PushPolicy,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            push_policy: PushPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Config {
    /// Load configuration from files and the process environment.
    ///
    /// `explicit` replaces `./forgemirror.toml` and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        match explicit {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let local_config = PathBuf::from(LOCAL_CONFIG);
                if local_config.exists() {
                    tracing::debug!("Loading config from ./{LOCAL_CONFIG}");
                    builder = builder.add_source(
                        File::from(local_config)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        Self::from_builder(builder, |name| std::env::var(name).ok())
    }

    /// Apply environment overrides through `lookup` and deserialize.
    fn from_builder(
        mut builder: Builder<DefaultState>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        for key in PREFIXED_KEYS {
            let var = format!("{ENV_PREFIX}_{}", key.replace('.', "_").to_uppercase());
            builder = builder.set_override_option(*key, non_empty(lookup(&var)))?;
        }
        for (var, key) in PLAIN_ENV {
            builder = builder.set_override_option(*key, non_empty(lookup(var)))?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    pub fn gitlab_token(&self) -> Option<&str> {
        self.gitlab.token.as_deref()
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Names of unset tokens, in environment-variable form.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.github_token().is_none() {
            missing.push("GITHUB_TOKEN");
        }
        if self.gitlab_token().is_none() {
            missing.push("GITLAB_TOKEN");
        }
        missing
    }

    /// Names of unset repository identifiers.
    pub fn missing_repos(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.github.repo.is_none() {
            missing.push("GITHUB_REPO");
        }
        if self.gitlab.repo.is_none() {
            missing.push("GITLAB_REPO");
        }
        missing
    }

    /// Both repository identifiers are set and the GitHub one is well formed.
    ///
    /// A malformed GitLab path is left to the project resolver, which
    /// reports it as a missing project.
    pub fn require_repos(&self) -> Result<RepoPath, ConfigError> {
        let missing = self.missing_repos();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let repo = self.github.repo.as_deref().unwrap_or_default();
        RepoPath::parse(repo).map_err(|e| ConfigError::InvalidRepo {
            repo: repo.to_string(),
            message: e.to_string(),
        })
    }

    /// Both tokens are set.
    pub fn require_tokens(&self) -> Result<(), ConfigError> {
        let missing = self.missing_tokens();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(missing))
        }
    }

    pub fn gitlab_repo(&self) -> &str {
        self.gitlab.repo.as_deref().unwrap_or_default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
