//! Pagination loop over the comment API
//!
//! Collects up to `max_comments` comments in source order, degrading to
//! whatever was collected when the upstream fails mid-run. The disabled
//! state stays a distinct variant so callers cannot confuse it with an
//! empty batch.

use crate::api::{CommentApi, CommentApiError, MAX_PAGE_SIZE};
use crowdpulse_core::VideoId;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default number of comments analyzed per request.
pub const DEFAULT_MAX_COMMENTS: usize = 20;

/// Outcome of a comment fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentFetch {
    /// The comment section is closed; distinct from an empty batch
    Disabled,

    /// Comments in source order, possibly empty, at most `max_comments`
    Comments(Vec<String>),
}

/// Retrieves a bounded batch of top comments for a video.
pub struct CommentSource {
    api: Arc<dyn CommentApi>,
}

impl CommentSource {
    pub fn new(api: Arc<dyn CommentApi>) -> Self {
        Self { api }
    }

    /// Fetch up to `max_comments` comments for `video_id`.
    ///
    /// Pages through the API until enough comments are collected or the
    /// source runs out of pages. A continuation token identical to the
    /// one just used ends the loop. Upstream errors other than the
    /// disabled signal degrade to the partial batch collected so far;
    /// they are logged here and never propagated.
    pub async fn fetch(&self, video_id: &VideoId, max_comments: usize) -> CommentFetch {
        let mut comments: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;
        let page_size = max_comments.min(MAX_PAGE_SIZE);

        while comments.len() < max_comments {
            let page = match self
                .api
                .list_page(video_id.as_str(), page_size, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(CommentApiError::Disabled) => {
                    info!(video_id = %video_id, "comments are disabled");
                    return CommentFetch::Disabled;
                }
                Err(CommentApiError::Other(reason)) => {
                    warn!(
                        video_id = %video_id,
                        collected = comments.len(),
                        %reason,
                        "comment fetch degraded, keeping partial batch"
                    );
                    break;
                }
            };

            for text in page.comments {
                comments.push(text);
                if comments.len() >= max_comments {
                    break;
                }
            }
            if comments.len() >= max_comments {
                break;
            }

            match page.next_page_token {
                Some(next) if page_token.as_deref() == Some(next.as_str()) => {
                    warn!(video_id = %video_id, "continuation token repeated, stopping pagination");
                    break;
                }
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!(video_id = %video_id, count = comments.len(), "comment fetch complete");
        CommentFetch::Comments(comments)
    }
}
