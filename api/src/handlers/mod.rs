//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;

pub use feed::{main_feed, topic_feed, topic_feed_ordered, type_feed, type_feed_ordered};
