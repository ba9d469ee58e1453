//! The upstream comment API: one page per call
//!
//! `YouTubeCommentApi` wraps the Data API v3 `commentThreads` endpoint.
//! The trait seam exists so the pagination loop in [`crate::source`] can
//! be exercised against in-memory fakes, and so a retry layer could be
//! slotted in without touching the loop.

use async_trait::async_trait;
use crowdpulse_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Per-call item ceiling imposed by the upstream API.
pub const MAX_PAGE_SIZE: usize = 100;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// One page of comments plus the continuation cursor, if any.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    /// Comment texts in source ("most relevant first") order
    pub comments: Vec<String>,

    /// Opaque cursor for the next page; absent on the last page
    pub next_page_token: Option<String>,
}

/// Failure modes of a single page fetch.
///
/// `Disabled` is terminal and must never be retried; everything else is
/// `Other` and left to the caller's degradation policy.
#[derive(Debug, thiserror::Error)]
pub enum CommentApiError {
    /// The comment section is closed for this video
    #[error("comments are disabled")]
    Disabled,

    /// Quota, malformed request, transient upstream failure, transport
    /// or decode error
    #[error("{0}")]
    Other(String),
}

/// A paginated comment listing keyed by video identifier.
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Fetch one page of top-level comments for `video_id`.
    ///
    /// `page_size` is clamped by implementations to [`MAX_PAGE_SIZE`];
    /// `page_token` continues a previous page's cursor.
    async fn list_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> std::result::Result<CommentPage, CommentApiError>;
}

/// Real client for the YouTube Data API v3 `commentThreads` endpoint.
pub struct YouTubeCommentApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeCommentApi {
    /// Build a client with a bounded request timeout.
    ///
    /// The upstream call otherwise blocks a request indefinitely; every
    /// instance carries a timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// Build a client against a non-default endpoint (used in tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build comment API client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CommentApi for YouTubeCommentApi {
    async fn list_page(
        &self,
        video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> std::result::Result<CommentPage, CommentApiError> {
        let url = format!("{}/commentThreads", self.base_url);
        let page_size = page_size.min(MAX_PAGE_SIZE);
        let max_results = page_size.to_string();

        let mut query: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", &max_results),
            ("order", "relevance"),
            ("textFormat", "plainText"),
            ("key", &self.api_key),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CommentApiError::Other(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::FORBIDDEN && is_comments_disabled(&body) {
                return Err(CommentApiError::Disabled);
            }
            return Err(CommentApiError::Other(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let listing: ThreadListResponse = response
            .json()
            .await
            .map_err(|e| CommentApiError::Other(format!("failed to decode response: {e}")))?;

        let comments = listing
            .items
            .into_iter()
            .map(|item| item.snippet.top_level_comment.snippet.text_display)
            .collect();

        Ok(CommentPage {
            comments,
            next_page_token: listing.next_page_token,
        })
    }
}

/// Whether a 403 body names the `commentsDisabled` reason.
fn is_comments_disabled(body: &str) -> bool {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| {
            envelope
                .error
                .errors
                .iter()
                .any(|item| item.reason.as_deref() == Some("commentsDisabled"))
        })
        .unwrap_or(false)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadListResponse {
    #[serde(default)]
    items: Vec<Thread>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    reason: Option<String>,
}
