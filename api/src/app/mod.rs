//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod feed_service;
pub mod pagination;

pub use feed_service::{FeedPage, FeedPost, FeedRequest, FeedService};
pub use pagination::{Page, PageParams};
