//! Copy milestones, labels and issue comments from GitHub to GitLab.

use std::process::ExitCode;

use clap::Parser;
use forgemirror_cli::commands::activity::{self, Activity};
use forgemirror_cli::commands::{self, CommonArgs};

#[derive(Parser)]
#[command(name = "forgemirror-activity")]
#[command(version)]
#[command(about = "Copy milestones, labels and issue comments from GitHub to GitLab")]
#[command(long_about = "Copy milestones, labels and issue comments from GitHub to GitLab. \
Without a subcommand, milestones are synced first and labels second. Items that already \
exist on GitLab are left alone.")]
#[command(after_long_help = r#"EXAMPLES
    Sync milestones and labels:
        $ forgemirror-activity

    Copy the comments of GitHub issue #42:
        $ forgemirror-activity comments 42

    Fail the job if anything could not be created:
        $ forgemirror-activity labels --strict

ENVIRONMENT VARIABLES
    GITHUB_TOKEN, GITLAB_TOKEN, GITHUB_REPO and GITLAB_REPO are required.
    GITLAB_API_BASE defaults to https://gitlab.com/api/v4.
"#)]
struct Cli {
    #[command(subcommand)]
    activity: Option<Activity>,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    commands::init();
    let cli = Cli::parse();
    activity::run(cli.activity, &cli.common).await
}
