//! Issue sync in either direction.
//!
//! Imported issues carry their origin's tag in the title (`[GitHub] …`,
//! `[GitLab] …`). A source issue that already carries the target's tag came
//! from the target in the first place and is never sent back.

use super::convert::{issue_to_github, issue_to_gitlab};
use super::engine::{abort, complete, failure, record, require_project, start};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{
    Direction, EntityKind, EntityOutcome, SkipReason, SyncError, SyncOptions, SyncReport,
};
use crate::github::{GitHubClient, GitHubIssue};
use crate::gitlab::{GitLabClient, GitLabIssue};
use crate::platform::Forge;

const KIND: EntityKind = EntityKind::Issue;

/// Sync issues for every leg of `direction`, in order.
///
/// Each leg is independent: a failure in one does not prevent the other.
pub async fn sync_issues(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    direction: Direction,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Vec<Result<SyncReport, SyncError>> {
    let mut results = Vec::new();
    for (from, _) in direction.legs() {
        let result = match from {
            Forge::GitHub => sync_issues_to_gitlab(github, gitlab, options, on_progress).await,
            Forge::GitLab => sync_issues_to_github(github, gitlab, options, on_progress).await,
        };
        results.push(result);
    }
    results
}

/// Copy GitHub issues (all states, pull requests excluded) to GitLab.
pub async fn sync_issues_to_gitlab(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, SyncError> {
    let mut report = start(KIND, Forge::GitHub, Forge::GitLab, on_progress);
    require_project(gitlab, KIND, on_progress).await?;

    let issues = github.list_issues().await.map_err(|source| {
        abort(
            KIND,
            SyncError::SourceUnavailable {
                kind: KIND.plural(),
                forge: Forge::GitHub,
                source,
            },
            on_progress,
        )
    })?;
    emit(
        on_progress,
        SyncProgress::FetchedSource {
            kind: KIND,
            count: issues.len(),
        },
    );

    for issue in &issues {
        let outcome = issue_to_gitlab_outcome(gitlab, issue, options).await;
        record(&mut report, on_progress, &issue.title, outcome);
    }

    Ok(complete(report, on_progress))
}

async fn issue_to_gitlab_outcome(
    gitlab: &GitLabClient,
    issue: &GitHubIssue,
    options: &SyncOptions,
) -> EntityOutcome {
    if issue.is_pull_request() {
        return EntityOutcome::Skipped(SkipReason::PullRequest);
    }
    if Forge::GitLab.is_tagged(&issue.title) {
        return EntityOutcome::Skipped(SkipReason::ImportedFrom(Forge::GitLab));
    }

    let existing = match gitlab.search_issues(&issue.title).await {
        Ok(found) => found,
        Err(e) => return failure("search", &e),
    };
    let tagged = Forge::GitHub.tag_title(&issue.title);
    if options
        .match_policy
        .find(&existing, |i| i.title.as_str(), &[issue.title.as_str(), tagged.as_str()])
        .is_some()
    {
        return EntityOutcome::AlreadyPresent;
    }

    if options.dry_run {
        return EntityOutcome::WouldCreate;
    }
    match gitlab.create_issue(&issue_to_gitlab(issue)).await {
        Ok(_) => EntityOutcome::Created,
        Err(e) => failure("create", &e),
    }
}

/// Copy GitLab issues (all states) to GitHub.
pub async fn sync_issues_to_github(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, SyncError> {
    let mut report = start(KIND, Forge::GitLab, Forge::GitHub, on_progress);
    require_project(gitlab, KIND, on_progress).await?;

    let issues = gitlab.list_issues().await.map_err(|source| {
        abort(
            KIND,
            SyncError::SourceUnavailable {
                kind: KIND.plural(),
                forge: Forge::GitLab,
                source,
            },
            on_progress,
        )
    })?;
    emit(
        on_progress,
        SyncProgress::FetchedSource {
            kind: KIND,
            count: issues.len(),
        },
    );

    for issue in &issues {
        let outcome = issue_to_github_outcome(github, issue, options).await;
        record(&mut report, on_progress, &issue.title, outcome);
    }

    Ok(complete(report, on_progress))
}

async fn issue_to_github_outcome(
    github: &GitHubClient,
    issue: &GitLabIssue,
    options: &SyncOptions,
) -> EntityOutcome {
    if Forge::GitHub.is_tagged(&issue.title) {
        return EntityOutcome::Skipped(SkipReason::ImportedFrom(Forge::GitHub));
    }

    let existing = match github.search_issues(&issue.title).await {
        Ok(found) => found,
        Err(e) => return failure("search", &e),
    };
    let tagged = Forge::GitLab.tag_title(&issue.title);
    if options
        .match_policy
        .find(&existing, |i| i.title.as_str(), &[issue.title.as_str(), tagged.as_str()])
        .is_some()
    {
        return EntityOutcome::AlreadyPresent;
    }

    if options.dry_run {
        return EntityOutcome::WouldCreate;
    }
    match github.create_issue(&issue_to_github(issue)).await {
        Ok(_) => EntityOutcome::Created,
        Err(e) => failure("create", &e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::{HttpMethod, MockTransport};
    use crate::platform::RepoPath;
    use crate::sync::MatchPolicy;

    const PROJECT_URL: &str = "https://gitlab.com/api/v4/projects/octo%2Fwidgets";
    const GITHUB_ISSUES_URL: &str =
        "https://api.github.com/repos/octo/widgets/issues?state=all&per_page=100&page=1";
    const GITLAB_ISSUES_URL: &str =
        "https://gitlab.com/api/v4/projects/5/issues?state=all&per_page=100&page=1";
    const GITLAB_CREATE_URL: &str = "https://gitlab.com/api/v4/projects/5/issues";
    const GITHUB_CREATE_URL: &str = "https://api.github.com/repos/octo/widgets/issues";

    fn clients(transport: &MockTransport) -> (GitHubClient, GitLabClient) {
        let github = GitHubClient::new_with_transport(
            "https://api.github.com",
            Some("gh"),
            RepoPath::parse("octo/widgets").unwrap(),
            Arc::new(transport.clone()),
        );
        let gitlab = GitLabClient::new_with_transport(
            "https://gitlab.com/api/v4",
            Some("gl"),
            "octo/widgets",
            Arc::new(transport.clone()),
        );
        (github, gitlab)
    }

    fn gitlab_search_url(title: &str) -> String {
        format!("https://gitlab.com/api/v4/projects/5/issues?search={title}")
    }

    fn github_search_url(title: &str) -> String {
        format!(
            "https://api.github.com/search/issues?q=%22{title}%22+repo%3Aocto%2Fwidgets+is%3Aissue+in%3Atitle"
        )
    }

    fn github_issue(number: u64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "title": title,
            "body": "details",
            "html_url": format!("https://github.com/octo/widgets/issues/{number}"),
            "labels": [{"name": "bug"}]
        })
    }

    fn gitlab_issue(iid: u64, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 100 + iid,
            "iid": iid,
            "title": title,
            "description": "details",
            "web_url": format!("https://gitlab.com/octo/widgets/-/issues/{iid}"),
            "labels": ["ci"]
        })
    }

    #[tokio::test]
    async fn test_pull_requests_are_never_created() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        let mut pr = github_issue(2, "Feature");
        pr["pull_request"] = serde_json::json!({"url": "https://api.github.com/repos/octo/widgets/pulls/2"});
        transport.push_json(HttpMethod::Get, GITHUB_ISSUES_URL, 200, serde_json::json!([pr]));

        let (github, gitlab) = clients(&transport);
        let report = sync_issues_to_gitlab(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert!(transport.requests_with_method(HttpMethod::Post).is_empty());
        // No search either: the item is dropped before matching.
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_github_issue_created_with_origin_tag() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITHUB_ISSUES_URL,
            200,
            serde_json::json!([github_issue(1, "Crash")]),
        );
        transport.push_json(HttpMethod::Get, gitlab_search_url("Crash"), 200, serde_json::json!([]));
        transport.push_json(
            HttpMethod::Post,
            GITLAB_CREATE_URL,
            201,
            gitlab_issue(1, "[GitHub] Crash"),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_issues_to_gitlab(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.created, 1);

        let posts = transport.requests_with_method(HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
        assert_eq!(body["title"], "[GitHub] Crash");
        assert_eq!(body["labels"], "bug");
        assert!(
            body["description"]
                .as_str()
                .unwrap()
                .ends_with("*Synced from GitHub: https://github.com/octo/widgets/issues/1*")
        );
    }

    #[tokio::test]
    async fn test_github_issue_imported_from_gitlab_is_not_sent_back() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITHUB_ISSUES_URL,
            200,
            serde_json::json!([github_issue(3, "[GitLab] Slow")]),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_issues_to_gitlab(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.skipped, 1);
        assert!(transport.requests_with_method(HttpMethod::Post).is_empty());
    }

    #[tokio::test]
    async fn test_reverse_sync_never_recreates_github_tagged_issues() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITLAB_ISSUES_URL,
            200,
            serde_json::json!([gitlab_issue(1, "[GitHub] Crash"), gitlab_issue(2, "[GitHub] Leak")]),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_issues_to_github(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.skipped, 2);
        assert!(transport.requests_with_method(HttpMethod::Post).is_empty());
    }

    #[tokio::test]
    async fn test_reverse_sync_creates_tagged_github_issue() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITLAB_ISSUES_URL,
            200,
            serde_json::json!([gitlab_issue(4, "Slow")]),
        );
        transport.push_json(
            HttpMethod::Get,
            github_search_url("Slow"),
            200,
            serde_json::json!({"total_count": 0, "items": []}),
        );
        transport.push_json(
            HttpMethod::Post,
            GITHUB_CREATE_URL,
            201,
            github_issue(20, "[GitLab] Slow"),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_issues_to_github(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.created, 1);

        let posts = transport.requests_with_method(HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
        assert_eq!(body["title"], "[GitLab] Slow");
        assert_eq!(body["labels"], serde_json::json!(["ci"]));
    }

    #[tokio::test]
    async fn test_reverse_sync_skips_issue_already_on_github() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITLAB_ISSUES_URL,
            200,
            serde_json::json!([gitlab_issue(4, "Slow")]),
        );
        transport.push_json(
            HttpMethod::Get,
            github_search_url("Slow"),
            200,
            serde_json::json!({"total_count": 1, "items": [github_issue(20, "[GitLab] Slow")]}),
        );

        let (github, gitlab) = clients(&transport);
        let options = SyncOptions {
            match_policy: MatchPolicy::Exact,
            dry_run: false,
        };
        let report = sync_issues_to_github(&github, &gitlab, &options, None)
            .await
            .unwrap();
        assert_eq!(report.already_present, 1);
        assert!(transport.requests_with_method(HttpMethod::Post).is_empty());
    }

    #[tokio::test]
    async fn test_both_directions_run_even_if_first_fails() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            GITHUB_ISSUES_URL,
            502,
            serde_json::json!({"message": "bad gateway"}),
        );
        transport.push_json(HttpMethod::Get, GITLAB_ISSUES_URL, 200, serde_json::json!([]));

        let (github, gitlab) = clients(&transport);
        let results = sync_issues(
            &github,
            &gitlab,
            Direction::Both,
            &SyncOptions::default(),
            None,
        )
        .await;

        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(SyncError::SourceUnavailable {
                forge: Forge::GitHub,
                ..
            })
        ));
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.from, Forge::GitLab);
        assert_eq!(second.processed(), 0);
    }
}
