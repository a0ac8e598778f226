//! Shared plumbing for the two entrypoints: flags, config loading, client
//! construction, run summaries and exit codes.

pub mod activity;
pub mod repos;

use std::path::PathBuf;
use std::process::ExitCode;

use console::{Term, style};
use forgemirror::mirror::{MirrorError, MirrorReport};
use forgemirror::sync::{SyncError, SyncOptions, SyncReport};
use forgemirror::{GitHubClient, GitLabClient, PlatformError, RepoPath};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

/// Missing or invalid configuration.
pub const EXIT_PRECONDITION: u8 = 1;
/// `--strict` run in which something failed.
pub const EXIT_PARTIAL_FAILURE: u8 = 2;

/// Flags accepted by both programs.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Read and compare, but create nothing and push nothing
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Exit with status 2 if any operation or item failed
    #[arg(long, global = true)]
    pub strict: bool,

    /// Config file to use instead of ./forgemirror.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Load `.env` and install the tracing subscriber for non-TTY output.
pub fn init() {
    dotenvy::dotenv().ok();

    // Interactive runs report through spinners instead.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("forgemirror=info,forgemirror_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }
}

/// Load configuration, reporting failures as a precondition exit.
pub(crate) fn load_config(args: &CommonArgs) -> Result<Config, ExitCode> {
    Config::load(args.config.as_deref()).map_err(|e| precondition_failed(&e))
}

pub(crate) fn precondition_failed(err: &ConfigError) -> ExitCode {
    error_line(&err.to_string());
    ExitCode::from(EXIT_PRECONDITION)
}

pub(crate) fn sync_options(config: &Config, args: &CommonArgs) -> SyncOptions {
    SyncOptions {
        match_policy: config.sync.match_policy,
        dry_run: args.dry_run,
    }
}

/// Build both API clients. Tokens are optional here; callers that need
/// them check first.
pub(crate) fn clients(
    config: &Config,
    github_repo: RepoPath,
) -> Result<(GitHubClient, GitLabClient), PlatformError> {
    let timeout = config.http_timeout();
    let github = GitHubClient::new(
        &config.github.api_base,
        config.github_token(),
        github_repo,
        timeout,
    )?
    .with_max_pages(config.sync.max_pages);
    let gitlab = GitLabClient::new(
        &config.gitlab.api_base,
        config.gitlab_token(),
        config.gitlab_repo(),
        timeout,
    )?
    .with_max_pages(config.sync.max_pages);
    Ok((github, gitlab))
}

pub(crate) fn banner(title: &str) {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if Term::stdout().is_term() {
        println!("{} {}", style(title).bold(), style(format!("({now})")).dim());
        println!();
    } else {
        tracing::info!(started_at = %now, "{title}");
    }
}

pub(crate) fn warn_line(message: &str) {
    if Term::stdout().is_term() {
        println!("{} {}", style("warning:").yellow().bold(), message);
    } else {
        tracing::warn!("{message}");
    }
}

pub(crate) fn error_line(message: &str) {
    if Term::stdout().is_term() {
        eprintln!("{} {}", style("error:").red().bold(), message);
    } else {
        tracing::error!("{message}");
    }
}

/// Aggregated outcome of every operation in one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub operations: usize,
    /// Operations that stopped before processing items.
    pub aborted: usize,
    /// Items (entities or branches) that failed inside completed operations.
    pub item_failures: usize,
}

impl RunSummary {
    pub fn record_sync(&mut self, result: &Result<SyncReport, SyncError>) {
        self.operations += 1;
        match result {
            Ok(report) => self.item_failures += report.failures.len(),
            Err(_) => self.aborted += 1,
        }
    }

    pub fn record_mirror(&mut self, result: &Result<MirrorReport, MirrorError>) {
        self.operations += 1;
        match result {
            Ok(report) => self.item_failures += report.failures.len(),
            Err(_) => self.aborted += 1,
        }
    }

    /// An operation that could not even be set up.
    pub fn record_setup_failure(&mut self) {
        self.operations += 1;
        self.aborted += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.aborted > 0 || self.item_failures > 0
    }

    /// Process exit status. Failures only change it under `strict`.
    pub fn exit_status(&self, strict: bool) -> u8 {
        if strict && self.has_failures() {
            EXIT_PARTIAL_FAILURE
        } else {
            0
        }
    }

    pub fn exit_code(&self, strict: bool) -> ExitCode {
        ExitCode::from(self.exit_status(strict))
    }

    /// Print the closing line.
    pub fn print(&self, dry_run: bool) {
        let suffix = if dry_run { " (dry run)" } else { "" };
        if Term::stdout().is_term() {
            println!();
            if self.has_failures() {
                println!(
                    "{} {} of {} operations aborted, {} items failed{}",
                    style("Done with errors:").yellow().bold(),
                    self.aborted,
                    self.operations,
                    self.item_failures,
                    suffix
                );
            } else {
                println!("{}{}", style("Done!").green().bold(), suffix);
            }
        } else {
            tracing::info!(
                operations = self.operations,
                aborted = self.aborted,
                item_failures = self.item_failures,
                dry_run,
                "Done"
            );
        }
    }
}
