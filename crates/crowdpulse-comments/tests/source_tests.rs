//! Pagination and degradation behavior of `CommentSource`
//!
//! Runs the fetch loop against configurable in-memory fakes so the
//! termination and failure policies can be asserted without network I/O.

use async_trait::async_trait;
use crowdpulse_comments::{CommentApi, CommentApiError, CommentFetch, CommentPage, CommentSource};
use crowdpulse_core::VideoId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn video() -> VideoId {
    VideoId::from_reference("https://x/watch?v=ABC").unwrap()
}

/// Fake API serving a fixed total of comments in pages of `per_page`.
struct PagedApi {
    total: usize,
    per_page: usize,
    calls: AtomicUsize,
}

impl PagedApi {
    fn new(total: usize, per_page: usize) -> Self {
        Self {
            total,
            per_page,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CommentApi for PagedApi {
    async fn list_page(
        &self,
        _video_id: &str,
        page_size: usize,
        page_token: Option<&str>,
    ) -> Result<CommentPage, CommentApiError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let start: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + page_size.min(self.per_page)).min(self.total);
        let comments = (start..end).map(|i| format!("comment {i}")).collect();
        let next_page_token = (end < self.total).then(|| end.to_string());

        Ok(CommentPage {
            comments,
            next_page_token,
        })
    }
}

/// Fake API that fails every call the same way.
struct FailingApi {
    disabled: bool,
}

#[async_trait]
impl CommentApi for FailingApi {
    async fn list_page(
        &self,
        _video_id: &str,
        _page_size: usize,
        _page_token: Option<&str>,
    ) -> Result<CommentPage, CommentApiError> {
        if self.disabled {
            Err(CommentApiError::Disabled)
        } else {
            Err(CommentApiError::Other("quota exceeded".to_string()))
        }
    }
}

/// Fake API that keeps returning the same continuation token.
struct StuckTokenApi;

#[async_trait]
impl CommentApi for StuckTokenApi {
    async fn list_page(
        &self,
        _video_id: &str,
        _page_size: usize,
        _page_token: Option<&str>,
    ) -> Result<CommentPage, CommentApiError> {
        Ok(CommentPage {
            comments: vec!["same page".to_string()],
            next_page_token: Some("stuck".to_string()),
        })
    }
}

/// Fake API that fails after serving one good page.
struct FlakyApi {
    calls: AtomicUsize,
}

#[async_trait]
impl CommentApi for FlakyApi {
    async fn list_page(
        &self,
        _video_id: &str,
        _page_size: usize,
        _page_token: Option<&str>,
    ) -> Result<CommentPage, CommentApiError> {
        if self.calls.fetch_add(1, Ordering::Relaxed) == 0 {
            Ok(CommentPage {
                comments: vec!["first".to_string(), "second".to_string()],
                next_page_token: Some("next".to_string()),
            })
        } else {
            Err(CommentApiError::Other("500 internal error".to_string()))
        }
    }
}

#[tokio::test]
async fn single_page_collects_everything() {
    let source = CommentSource::new(Arc::new(PagedApi::new(5, 100)));
    match source.fetch(&video(), 20).await {
        CommentFetch::Comments(comments) => {
            assert_eq!(comments.len(), 5);
            assert_eq!(comments[0], "comment 0");
            assert_eq!(comments[4], "comment 4");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn source_order_is_preserved() {
    let source = CommentSource::new(Arc::new(PagedApi::new(10, 3)));
    match source.fetch(&video(), 10).await {
        CommentFetch::Comments(comments) => {
            let expected: Vec<String> = (0..10).map(|i| format!("comment {i}")).collect();
            assert_eq!(comments, expected);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_never_exceeds_max_comments() {
    let source = CommentSource::new(Arc::new(PagedApi::new(500, 100)));
    match source.fetch(&video(), 20).await {
        CommentFetch::Comments(comments) => assert_eq!(comments.len(), 20),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn page_count_stays_within_bound() {
    // ceil(max / per_page_cap) pages at most, across a spread of shapes.
    for (max_comments, per_page) in [(1, 1), (20, 7), (100, 9), (100, 100), (60, 25)] {
        let api = Arc::new(PagedApi::new(1000, per_page));
        let source = CommentSource::new(api.clone());
        match source.fetch(&video(), max_comments).await {
            CommentFetch::Comments(comments) => assert_eq!(comments.len(), max_comments),
            other => panic!("unexpected outcome: {other:?}"),
        }
        let bound = max_comments.div_ceil(per_page);
        assert!(
            api.calls() <= bound,
            "max={max_comments} per_page={per_page}: {} calls exceeds bound {bound}",
            api.calls()
        );
    }
}

#[tokio::test]
async fn missing_token_ends_the_loop() {
    let api = Arc::new(PagedApi::new(4, 2));
    let source = CommentSource::new(api.clone());
    match source.fetch(&video(), 20).await {
        CommentFetch::Comments(comments) => assert_eq!(comments.len(), 4),
        other => panic!("unexpected outcome: {other:?}"),
    }
    // Two full pages; the second carries no token.
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn repeated_token_does_not_loop_forever() {
    let source = CommentSource::new(Arc::new(StuckTokenApi));
    match source.fetch(&video(), 20).await {
        CommentFetch::Comments(comments) => {
            // First page accepted, second page re-issues the same token
            // and the loop stops instead of spinning.
            assert!(comments.len() < 20);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn disabled_is_distinct_from_empty() {
    let source = CommentSource::new(Arc::new(FailingApi { disabled: true }));
    assert_eq!(source.fetch(&video(), 20).await, CommentFetch::Disabled);

    let source = CommentSource::new(Arc::new(PagedApi::new(0, 100)));
    assert_eq!(
        source.fetch(&video(), 20).await,
        CommentFetch::Comments(vec![])
    );
}

#[tokio::test]
async fn upstream_error_degrades_to_empty_batch() {
    let source = CommentSource::new(Arc::new(FailingApi { disabled: false }));
    assert_eq!(
        source.fetch(&video(), 20).await,
        CommentFetch::Comments(vec![])
    );
}

#[tokio::test]
async fn mid_run_error_keeps_partial_batch() {
    let source = CommentSource::new(Arc::new(FlakyApi {
        calls: AtomicUsize::new(0),
    }));
    match source.fetch(&video(), 20).await {
        CommentFetch::Comments(comments) => {
            assert_eq!(comments, vec!["first".to_string(), "second".to_string()]);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
