//! CrowdPulse Comments
//!
//! Comment retrieval from the YouTube Data API.
//!
//! The [`CommentApi`] trait models one page of the upstream
//! `commentThreads` list operation; [`CommentSource`] drives the
//! pagination loop on top of it and collapses failures into the three
//! outcomes callers must distinguish: comments disabled, a (possibly
//! empty) batch, or a degraded partial batch after an upstream error.

pub mod api;
pub mod source;

pub use api::{CommentApi, CommentApiError, CommentPage, YouTubeCommentApi, MAX_PAGE_SIZE};
pub use source::{CommentFetch, CommentSource, DEFAULT_MAX_COMMENTS};
