//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Post, PostId, PostType, Topic, TopicId, User, UserId};

/// Create a test user with default values
pub fn test_user() -> User {
    let id = UserId(Uuid::new_v4());
    User {
        id,
        slug: format!("member-{}", &id.to_string()[..8]),
        full_name: "Test Member".to_string(),
        session_token_hash: format!("hash-{}", id),
        created_at: Utc::now(),
        last_activity_at: None,
    }
}

/// Create a test topic with a specific slug
pub fn test_topic(slug: &str) -> Topic {
    Topic {
        id: TopicId(Uuid::new_v4()),
        slug: slug.to_string(),
        name: slug.to_uppercase(),
        icon: None,
        color: None,
    }
}

/// Create a published, public, main-page post by a random author
pub fn test_post() -> Post {
    test_post_by(UserId(Uuid::new_v4()))
}

/// Create a test post written by a specific author
pub fn test_post_by(author_id: UserId) -> Post {
    let id = PostId(Uuid::new_v4());
    let now = Utc::now();
    Post {
        id,
        slug: id.to_string()[..8].to_string(),
        post_type: PostType::Post,
        title: "Test Post".to_string(),
        author_id,
        topic_id: None,
        is_visible: true,
        is_public: true,
        is_shadow_banned: false,
        is_visible_on_main_page: true,
        is_pinned_until: None,
        upvotes: 0,
        comment_count: 0,
        view_count: 0,
        created_at: now,
        last_activity_at: now,
        published_at: Some(now),
    }
}
