//! API handlers for the bible proxy server
//!
//! Provides REST endpoints for:
//! - Generic upstream proxying with chapter-tree flattening
//! - Typed chapter fetch by human-readable reference
//! - Verse search (passthrough)
//! - Canonical book listing

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use bible_proxy_core::content::reshape_body;
use scripture_types::{parse_reference, BibleBook, BOOKS, DEFAULT_TRANSLATION_ID};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "bible-proxy-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Generic proxy invocation: the upstream path fragment plus query params
/// forwarded verbatim (the calling convention of the reading clients).
#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    pub path: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Handler: POST /proxy
///
/// Forwards the request upstream, flattens the body when it carries a
/// chapter tree, and relays the upstream's own status code. Provider
/// errors (4xx/5xx) come back with the provider's status and body; only
/// faults on our side become a 500 here.
pub async fn handle_proxy(
    State(state): State<AppState>,
    Json(req): Json<ProxyRequest>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    if !req.path.starts_with('/') {
        return Err(ServerError::InvalidRequest(format!(
            "Path must start with '/': {}",
            req.path
        )));
    }

    let upstream = state.upstream()?;
    let response = upstream.get(&req.path, &req.params).await?;

    info!(path = %req.path, status = %response.status, "Proxied upstream request");

    Ok((response.status, Json(reshape_body(response.body))))
}

/// Query for the typed chapter endpoint.
#[derive(Debug, Deserialize)]
pub struct ChapterQuery {
    /// Human-readable citation, e.g. "John 3" or "1 John 1"
    pub reference: String,
    /// Upstream translation id; defaults to KJV
    pub translation: Option<String>,
}

/// Handler: GET /api/chapter?reference=John+3
///
/// Resolves the citation to a canonical (bookCode, chapter) pair and
/// returns the flattened verse list for that chapter.
pub async fn handle_fetch_chapter(
    State(state): State<AppState>,
    Query(query): Query<ChapterQuery>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    let reference = parse_reference(&query.reference)
        .ok_or_else(|| ServerError::InvalidReference(query.reference.clone()))?;

    let translation = query
        .translation
        .as_deref()
        .unwrap_or(DEFAULT_TRANSLATION_ID);

    let upstream = state.upstream()?;
    let response = upstream
        .fetch_chapter(translation, reference.book.code, reference.chapter)
        .await?;

    info!(
        chapter = %reference.chapter_id(),
        status = %response.status,
        "Fetched chapter"
    );

    Ok((response.status, Json(response.body)))
}

/// Query for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub translation: Option<String>,
    pub limit: Option<u32>,
}

/// Handler: GET /api/search?query=love
///
/// Passthrough of the upstream's flat verse-array shape; no reshaping.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    if query.query.trim().is_empty() {
        return Err(ServerError::InvalidRequest("Empty search query".into()));
    }

    let translation = query
        .translation
        .as_deref()
        .unwrap_or(DEFAULT_TRANSLATION_ID);

    let upstream = state.upstream()?;
    let response = upstream
        .search(translation, &query.query, query.limit.unwrap_or(20))
        .await?;

    Ok((response.status, Json(response.body)))
}

/// Book list response
#[derive(Serialize)]
pub struct BookListResponse {
    pub books: &'static [BibleBook],
    pub count: usize,
}

/// Handler: GET /api/books
pub async fn handle_list_books() -> Json<BookListResponse> {
    Json(BookListResponse {
        books: &BOOKS,
        count: BOOKS.len(),
    })
}
