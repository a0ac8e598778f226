//! `forgemirror-repos`: branch mirroring and issue sync.

use std::process::ExitCode;
use std::sync::Arc;

use forgemirror::Forge;
use forgemirror::mirror::{MirrorEndpoint, MirrorError, MirrorOptions, ProcessRunner, mirror_code};
use forgemirror::sync::{Direction, sync_issues};

use super::{
    CommonArgs, RunSummary, banner, clients, error_line, load_config, precondition_failed,
    sync_options, warn_line,
};
use crate::config::Config;
use crate::progress::ProgressReporter;

/// What to synchronize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RepoTarget {
    /// Every branch, through git
    #[default]
    Code,
    /// Issues, through the REST APIs
    Issues,
    /// Code first, then issues
    All,
}

impl RepoTarget {
    fn includes_code(self) -> bool {
        matches!(self, RepoTarget::Code | RepoTarget::All)
    }

    fn includes_issues(self) -> bool {
        matches!(self, RepoTarget::Issues | RepoTarget::All)
    }
}

/// Which way to synchronize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DirectionArg {
    /// GitHub → GitLab, then GitLab → GitHub
    #[default]
    Both,
    /// GitHub → GitLab
    #[value(alias = "github-to-gitlab")]
    SourceToTarget,
    /// GitLab → GitHub
    #[value(alias = "gitlab-to-github")]
    TargetToSource,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Both => Direction::Both,
            DirectionArg::SourceToTarget => Direction::SourceToTarget,
            DirectionArg::TargetToSource => Direction::TargetToSource,
        }
    }
}

pub async fn run(target: RepoTarget, direction: DirectionArg, args: &CommonArgs) -> ExitCode {
    banner("Starting sync...");

    let config = match load_config(args) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let missing_tokens = config.missing_tokens();
    if !missing_tokens.is_empty() {
        warn_line(&format!(
            "{} not set; some operations will fail",
            missing_tokens.join(" and ")
        ));
    }

    let github_repo = match config.require_repos() {
        Ok(repo) => repo,
        Err(e) => return precondition_failed(&e),
    };

    let direction = Direction::from(direction);
    let strict = args.strict || config.sync.strict;
    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();
    let mut summary = RunSummary::default();

    if target.includes_code() {
        match mirror_endpoints(&config) {
            Ok((github, gitlab)) => {
                let options = MirrorOptions {
                    work_dir: config.mirror.work_dir.clone(),
                    push_policy: config.mirror.push_policy,
                    dry_run: args.dry_run,
                };
                let results = mirror_code(
                    &ProcessRunner,
                    &github,
                    &gitlab,
                    direction,
                    &options,
                    Some(&callback),
                )
                .await;
                for result in &results {
                    summary.record_mirror(result);
                }
            }
            Err(e) => {
                error_line(&e.to_string());
                summary.record_setup_failure();
            }
        }
    }

    if target.includes_issues() {
        match clients(&config, github_repo) {
            Ok((github, gitlab)) => {
                let options = sync_options(&config, args);
                let results =
                    sync_issues(&github, &gitlab, direction, &options, Some(&callback)).await;
                for result in &results {
                    summary.record_sync(result);
                }
            }
            Err(e) => {
                error_line(&format!("cannot build API clients: {e}"));
                summary.record_setup_failure();
            }
        }
    }

    reporter.finish();
    summary.print(args.dry_run);
    summary.exit_code(strict)
}

fn mirror_endpoints(config: &Config) -> Result<(MirrorEndpoint, MirrorEndpoint), MirrorError> {
    let github = MirrorEndpoint::new(
        Forge::GitHub,
        &config.github.api_base,
        config.github.repo.as_deref().unwrap_or_default(),
        config.github_token(),
    )?;
    let gitlab = MirrorEndpoint::new(
        Forge::GitLab,
        &config.gitlab.api_base,
        config.gitlab_repo(),
        config.gitlab_token(),
    )?;
    Ok((github, gitlab))
}
