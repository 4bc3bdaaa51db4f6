//! Upstream scripture provider client.
//!
//! One outbound GET per invocation, credential attached as the `api-key`
//! header. Provider-side 4xx/5xx are not reinterpreted here; status and
//! body are handed back for relaying. No retries, no caching.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::content::reshape_body;
use crate::ProxyConfig;

/// Upstream call errors. These all surface to the caller as a 500 with the
/// underlying message; provider error statuses are NOT errors here.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Deployment-configuration fault: fail closed, never retry, never
    /// issue a network call.
    #[error("BIBLE_API_KEY is not set")]
    MissingApiKey,

    /// Network failure or a body that is not JSON.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Raw upstream reply: the status to relay plus the parsed JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Scripture API client. Holds the credential; callers never see it.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Build a client from config.
    ///
    /// Fails closed with [`UpstreamError::MissingApiKey`] when no
    /// credential is configured; no request is ever issued without one.
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(UpstreamError::MissingApiKey)?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.upstream_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Forward a GET to the upstream provider.
    ///
    /// `path` is the upstream path fragment (e.g.
    /// `/bibles/{translationId}/chapters/JHN.3`); `params` are forwarded
    /// verbatim as the query string.
    #[instrument(skip(self, params), fields(path = %path))]
    pub async fn get(
        &self,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Proxying upstream request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .header("api-key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        Ok(UpstreamResponse { status, body })
    }

    /// Fetch one chapter and flatten it to verse records.
    ///
    /// Requests tree-structured (`content-type=json`) content because only
    /// the tree form carries per-verse boundaries. The returned body is
    /// `{"data": [VerseRecord, ...]}` sorted by verse, or the raw upstream
    /// body when it was not tree-shaped. The upstream status is relayed
    /// either way.
    pub async fn fetch_chapter(
        &self,
        translation_id: &str,
        book_code: &str,
        chapter: u32,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let (path, params) = chapter_request(translation_id, book_code, chapter);
        let response = self.get(&path, &params).await?;

        Ok(UpstreamResponse {
            status: response.status,
            body: reshape_body(response.body),
        })
    }

    /// Search verses. The upstream's flat verse-array shape is passed
    /// through untouched.
    pub async fn search(
        &self,
        translation_id: &str,
        query: &str,
        limit: u32,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let (path, params) = search_request(translation_id, query, limit);
        self.get(&path, &params).await
    }
}

/// Path and params for a chapter fetch.
pub fn chapter_request(
    translation_id: &str,
    book_code: &str,
    chapter: u32,
) -> (String, HashMap<String, String>) {
    let path = format!("/bibles/{translation_id}/chapters/{book_code}.{chapter}");
    let params = HashMap::from([("content-type".to_string(), "json".to_string())]);
    (path, params)
}

/// Path and params for a relevance-sorted verse search.
pub fn search_request(
    translation_id: &str,
    query: &str,
    limit: u32,
) -> (String, HashMap<String, String>) {
    let path = format!("/bibles/{translation_id}/search");
    let params = HashMap::from([
        ("query".to_string(), query.to_string()),
        ("limit".to_string(), limit.to_string()),
        ("sort".to_string(), "relevance".to_string()),
    ]);
    (path, params)
}
