//! GitHub → GitLab label sync.

use super::convert::label_payload;
use super::engine::{abort, complete, failure, record, require_project, start};
use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{EntityKind, EntityOutcome, SyncError, SyncOptions, SyncReport};
use crate::github::{GitHubClient, GitHubLabel};
use crate::gitlab::GitLabClient;
use crate::platform::Forge;

const KIND: EntityKind = EntityKind::Label;

/// Copy GitHub labels to GitLab.
///
/// A label counts as present only when a search result has exactly the same
/// name; the match policy does not apply here.
pub async fn sync_labels(
    github: &GitHubClient,
    gitlab: &GitLabClient,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, SyncError> {
    let mut report = start(KIND, Forge::GitHub, Forge::GitLab, on_progress);
    require_project(gitlab, KIND, on_progress).await?;

    let labels = github.list_labels().await.map_err(|source| {
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
            count: labels.len(),
        },
    );

    for label in &labels {
        let outcome = sync_one(gitlab, label, options).await;
        record(&mut report, on_progress, &label.name, outcome);
    }

    Ok(complete(report, on_progress))
}

async fn sync_one(gitlab: &GitLabClient, label: &GitHubLabel, options: &SyncOptions) -> EntityOutcome {
    match gitlab.search_labels(&label.name).await {
        Ok(found) if found.iter().any(|l| l.name == label.name) => {
            return EntityOutcome::AlreadyPresent;
        }
        Ok(_) => {}
        Err(e) => return failure("search", &e),
    }

    if options.dry_run {
        return EntityOutcome::WouldCreate;
    }
    match gitlab.create_label(&label_payload(label)).await {
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

    const PROJECT_URL: &str = "https://gitlab.com/api/v4/projects/octo%2Fwidgets";
    const LABELS_URL: &str = "https://api.github.com/repos/octo/widgets/labels?per_page=100&page=1";
    const CREATE_URL: &str = "https://gitlab.com/api/v4/projects/5/labels";

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

    fn search_url(name: &str) -> String {
        format!("https://gitlab.com/api/v4/projects/5/labels?search={name}")
    }

    #[tokio::test]
    async fn test_exact_name_match_is_skipped() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            LABELS_URL,
            200,
            serde_json::json!([{"name": "bug", "color": "d73a4a"}]),
        );
        transport.push_json(
            HttpMethod::Get,
            search_url("bug"),
            200,
            serde_json::json!([{"id": 1, "name": "bug"}]),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_labels(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.already_present, 1);
        assert!(transport.requests_with_method(HttpMethod::Post).is_empty());
    }

    #[tokio::test]
    async fn test_substring_match_still_creates_with_stripped_color() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            LABELS_URL,
            200,
            serde_json::json!([{"name": "bug", "color": "#FF0000", "description": null}]),
        );
        transport.push_json(
            HttpMethod::Get,
            search_url("bug"),
            200,
            serde_json::json!([{"id": 1, "name": "bugfix"}]),
        );
        transport.push_json(
            HttpMethod::Post,
            CREATE_URL,
            201,
            serde_json::json!({"id": 2, "name": "bug", "color": "#FF0000"}),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_labels(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.created, 1);

        let posts = transport.requests_with_method(HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_slice(&posts[0].body).unwrap();
        assert_eq!(body["color"], "FF0000");
        assert_eq!(body["description"], "");
    }

    #[tokio::test]
    async fn test_search_failure_is_recorded_and_next_label_proceeds() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            LABELS_URL,
            200,
            serde_json::json!([
                {"name": "ci", "color": "000000"},
                {"name": "docs", "color": "0075ca"}
            ]),
        );
        // No route for the "ci" search: the transport fails.
        transport.push_json(HttpMethod::Get, search_url("docs"), 200, serde_json::json!([]));
        transport.push_json(
            HttpMethod::Post,
            CREATE_URL,
            201,
            serde_json::json!({"id": 3, "name": "docs"}),
        );

        let (github, gitlab) = clients(&transport);
        let report = sync_labels(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.starts_with("search failed"));
        assert_eq!(report.created, 1);
    }

    #[tokio::test]
    async fn test_source_listing_failure_aborts() {
        let transport = MockTransport::new();
        transport.push_json(HttpMethod::Get, PROJECT_URL, 200, serde_json::json!({"id": 5}));
        transport.push_json(
            HttpMethod::Get,
            LABELS_URL,
            403,
            serde_json::json!({"message": "Bad credentials"}),
        );

        let (github, gitlab) = clients(&transport);
        let err = sync_labels(&github, &gitlab, &SyncOptions::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::SourceUnavailable {
                forge: Forge::GitHub,
                ..
            }
        ));
    }
}
