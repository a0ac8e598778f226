//! Remote URLs with embedded credentials, and their redaction.

use url::Url;

use crate::platform::Forge;

const REDACTED: &str = "***";

/// Git host for an API base.
///
/// `api.github.com` maps to `github.com`; any other host (GitHub
/// Enterprise, self-hosted GitLab) is used as-is, port included.
pub fn git_host(api_base: &str) -> Option<String> {
    let url = Url::parse(api_base).ok()?;
    let host = url.host_str()?;
    let host = if host == "api.github.com" {
        "github.com"
    } else {
        host
    };
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// HTTPS clone URL for `repo` on `host`, with the token embedded the way each
/// forge expects it.
pub fn remote_url(forge: Forge, host: &str, repo: &str, token: Option<&str>) -> String {
    match (forge, token.filter(|t| !t.is_empty())) {
        (Forge::GitHub, Some(token)) => format!("https://{token}@{host}/{repo}.git"),
        (Forge::GitLab, Some(token)) => format!("https://oauth2:{token}@{host}/{repo}.git"),
        (_, None) => format!("https://{host}/{repo}.git"),
    }
}

/// Replace every occurrence of the given secrets.
pub fn redact(text: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, secret| {
            acc.replace(secret, REDACTED)
        })
}
