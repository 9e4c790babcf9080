//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Post, PostId, Topic, User, UserId};
use crate::domain::feed_query::FeedQuery;
use crate::domain::ports::{PostRepository, PostVoteRepository, TopicRepository, UserRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Post Repository
// ============================================================================

/// Evaluates feed queries with `FeedPredicate::matches` over a post list.
/// Insertion order breaks sort ties.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
    queries: AtomicUsize,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a post for testing
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    /// Number of `find`/`count` calls served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn matching(&self, query: &FeedQuery) -> Vec<Post> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let posts = self.posts.read().unwrap();
        let mut found: Vec<Post> = posts.iter().filter(|p| query.matches(p)).cloned().collect();
        found.sort_by(|a, b| query.sort.compare(a, b));
        found
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find(
        &self,
        query: &FeedQuery,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let found = self.matching(query).into_iter().skip(offset as usize);
        Ok(match limit {
            Some(limit) => found.take(limit as usize).collect(),
            None => found.collect(),
        })
    }

    async fn count(&self, query: &FeedQuery) -> Result<u64, DomainError> {
        Ok(self.matching(query).len() as u64)
    }
}

// ============================================================================
// In-Memory Topic Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTopicRepository {
    topics: Arc<RwLock<HashMap<String, Topic>>>,
}

impl InMemoryTopicRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a topic for testing
    pub fn with_topic(self, topic: Topic) -> Self {
        self.topics
            .write()
            .unwrap()
            .insert(topic.slug.clone(), topic);
        self
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Topic>, DomainError> {
        let topics = self.topics.read().unwrap();
        Ok(topics.get(slug).cloned())
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

/// Records every activity write so tests can assert on side effects
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    touches: Arc<RwLock<Vec<(UserId, DateTime<Utc>)>>>,
    should_fail: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes always fail
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    /// Activity writes seen so far, in order
    pub fn touched(&self) -> Vec<(UserId, DateTime<Utc>)> {
        self.touches.read().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_session_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.session_token_hash == hash)
            .cloned())
    }

    async fn touch_last_activity(
        &self,
        id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("connection reset".to_string()));
        }

        self.touches.write().unwrap().push((*id, now));
        if let Some(user) = self.users.write().unwrap().get_mut(id) {
            user.last_activity_at = Some(now);
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Post Vote Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPostVoteRepository {
    upvotes: Arc<RwLock<HashSet<(UserId, PostId)>>>,
}

impl InMemoryPostVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an upvote for testing
    pub fn with_upvote(self, user_id: UserId, post_id: PostId) -> Self {
        self.upvotes.write().unwrap().insert((user_id, post_id));
        self
    }
}

#[async_trait]
impl PostVoteRepository for InMemoryPostVoteRepository {
    async fn upvoted_among(
        &self,
        user_id: &UserId,
        post_ids: &[PostId],
    ) -> Result<HashSet<PostId>, DomainError> {
        let upvotes = self.upvotes.read().unwrap();
        Ok(post_ids
            .iter()
            .filter(|id| upvotes.contains(&(*user_id, **id)))
            .copied()
            .collect())
    }
}
