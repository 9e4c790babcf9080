//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Post, PostId, Topic, User, UserId};
use crate::domain::feed_query::FeedQuery;
use crate::error::DomainError;

/// Repository for Post entities
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts matching the query, in the query's order.
    /// `limit = None` returns every match.
    async fn find(
        &self,
        query: &FeedQuery,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError>;

    /// Number of posts matching the query
    async fn count(&self, query: &FeedQuery) -> Result<u64, DomainError>;
}

/// Repository for Topic entities
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Find a topic by its slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Topic>, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by the SHA-256 hash of their session token
    async fn find_by_session_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Record that the user was active at `now`
    async fn touch_last_activity(&self, id: &UserId, now: DateTime<Utc>)
        -> Result<(), DomainError>;
}

/// Repository for post upvotes
#[async_trait]
pub trait PostVoteRepository: Send + Sync {
    /// Which of `post_ids` the user has upvoted
    async fn upvoted_among(
        &self,
        user_id: &UserId,
        post_ids: &[PostId],
    ) -> Result<HashSet<PostId>, DomainError>;
}
