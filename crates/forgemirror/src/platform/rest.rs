//! Authenticated JSON-over-HTTP helper shared by the forge clients.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::errors::{PlatformError, Result};
use crate::http::{HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// User agent sent with every request.
pub const USER_AGENT: &str = "forgemirror";

/// Page size for list endpoints.
pub const PAGE_SIZE: u32 = 100;

/// Default upper bound on pages fetched from a list endpoint.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// A REST endpoint root plus the headers every request carries.
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn HttpTransport>,
    base: String,
    headers: HttpHeaders,
}

impl RestClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base: &str, headers: HttpHeaders) -> Self {
        let mut all = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        for (name, value) in headers {
            all.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            all.push((name, value));
        }
        Self {
            transport,
            base: base.trim_end_matches('/').to_string(),
            headers: all,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build an absolute URL for `path` with the given query parameters.
    ///
    /// `path` is appended verbatim, so callers percent-encode any segment
    /// that needs it.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))
            .map_err(|e| PlatformError::invalid_input(format!("bad URL for {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }

    async fn send(&self, method: HttpMethod, url: String, body: Vec<u8>) -> Result<HttpResponse> {
        let mut headers = self.headers.clone();
        if !body.is_empty() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        tracing::debug!(method = method.as_str(), url = %url, "Sending request");
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;
        Ok(response)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
    ) -> Result<T> {
        let url = self.url(path, query)?;
        let response = self.send(HttpMethod::Get, url, Vec::new()).await?;
        if !response.is_success() {
            return Err(PlatformError::from_response(&response, resource));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// GET every page of a list endpoint, up to `max_pages`.
    ///
    /// Stops early on a page shorter than [`PAGE_SIZE`].
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        resource: &str,
        max_pages: u32,
    ) -> Result<Vec<T>> {
        let per_page = PAGE_SIZE.to_string();
        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let page_str = page.to_string();
            let mut params: Vec<(&str, &str)> = query.to_vec();
            params.push(("per_page", per_page.as_str()));
            params.push(("page", page_str.as_str()));

            let items: Vec<T> = self.get(path, &params, resource).await?;
            let count = items.len();
            all.extend(items);

            if count < PAGE_SIZE as usize || page >= max_pages.max(1) {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// POST a JSON body to `path` and decode the created resource.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<T> {
        let url = self.url(path, &[])?;
        let payload = serde_json::to_vec(body)?;
        let response = self.send(HttpMethod::Post, url, payload).await?;
        if !response.is_success() {
            return Err(PlatformError::from_response(&response, resource));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Percent-encode a single path segment (e.g. `group/project` → `group%2Fproject`).
pub fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
