//! `forgemirror-activity`: milestones, labels and issue comments.

use std::process::ExitCode;
use std::sync::Arc;

use forgemirror::sync::{sync_comments, sync_labels, sync_milestones};

use super::{
    CommonArgs, RunSummary, banner, clients, error_line, load_config, precondition_failed,
    sync_options,
};
use crate::progress::ProgressReporter;

/// What to synchronize. Running without one syncs milestones, then labels.
#[derive(Debug, Clone, PartialEq, Eq, clap::Subcommand)]
pub enum Activity {
    /// Copy GitHub milestones to GitLab
    Milestones,
    /// Copy GitHub labels to GitLab
    Labels,
    /// Copy the comments of one GitHub issue to its GitLab counterpart
    Comments {
        /// GitHub issue number
        issue_number: u64,
    },
}

impl Activity {
    /// The steps to run, in order.
    fn plan(activity: Option<Activity>) -> Vec<Activity> {
        match activity {
            Some(activity) => vec![activity],
            None => vec![Activity::Milestones, Activity::Labels],
        }
    }
}

pub async fn run(activity: Option<Activity>, args: &CommonArgs) -> ExitCode {
    banner("Starting activity sync...");

    let config = match load_config(args) {
        Ok(config) => config,
        Err(code) => return code,
    };
    if let Err(e) = config.require_tokens() {
        return precondition_failed(&e);
    }
    let github_repo = match config.require_repos() {
        Ok(repo) => repo,
        Err(e) => return precondition_failed(&e),
    };

    let strict = args.strict || config.sync.strict;
    let (github, gitlab) = match clients(&config, github_repo) {
        Ok(clients) => clients,
        Err(e) => {
            error_line(&format!("cannot build API clients: {e}"));
            let mut summary = RunSummary::default();
            summary.record_setup_failure();
            return summary.exit_code(strict);
        }
    };

    let options = sync_options(&config, args);
    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();
    let mut summary = RunSummary::default();

    for step in Activity::plan(activity) {
        let result = match step {
            Activity::Milestones => {
                sync_milestones(&github, &gitlab, &options, Some(&callback)).await
            }
            Activity::Labels => sync_labels(&github, &gitlab, &options, Some(&callback)).await,
            Activity::Comments { issue_number } => {
                sync_comments(&github, &gitlab, issue_number, &options, Some(&callback)).await
            }
        };
        if let Err(e) = &result {
            tracing::debug!(error = %e, not_found = e.is_not_found(), "Activity step failed");
        }
        summary.record_sync(&result);
    }

    reporter.finish();
    summary.print(args.dry_run);
    summary.exit_code(strict)
}
