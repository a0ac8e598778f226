//! Mirror branches and issues between GitHub and GitLab.

use std::process::ExitCode;

use clap::Parser;
use forgemirror_cli::commands::repos::{self, DirectionArg, RepoTarget};
use forgemirror_cli::commands::{self, CommonArgs};

#[derive(Parser)]
#[command(name = "forgemirror-repos")]
#[command(version)]
#[command(about = "Mirror branches and issues between GitHub and GitLab")]
#[command(after_long_help = r#"EXAMPLES
    Push every branch both ways:
        $ forgemirror-repos

    Copy GitHub issues to GitLab only:
        $ forgemirror-repos issues github-to-gitlab

    See what a full run would do:
        $ forgemirror-repos all --dry-run

CONFIGURATION
    Settings are read from ~/.config/forgemirror/config.toml, then
    ./forgemirror.toml (or --config), then FORGEMIRROR_* variables, then the
    variables below. A .env file in the current directory is loaded first.

ENVIRONMENT VARIABLES
    GITHUB_TOKEN       GitHub personal access token
    GITLAB_TOKEN       GitLab personal access token
    GITHUB_REPO        GitHub repository (owner/repository)
    GITLAB_REPO        GitLab project (namespace/project)
    GITLAB_API_BASE    GitLab API root (default: https://gitlab.com/api/v4)
"#)]
struct Cli {
    /// What to synchronize
    #[arg(value_enum, default_value_t = RepoTarget::Code)]
    target: RepoTarget,

    /// Which way to synchronize
    #[arg(value_enum, default_value_t = DirectionArg::Both)]
    direction: DirectionArg,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    commands::init();
    let cli = Cli::parse();
    repos::run(cli.target, cli.direction, &cli.common).await
}
