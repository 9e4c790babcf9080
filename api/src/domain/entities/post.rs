//! Post domain entity
//!
//! Represents a piece of content published on the club.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{TopicId, UserId};

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Post,
    /// A member's self-introduction. Never shown to anonymous visitors.
    Intro,
    Link,
    Question,
    Idea,
    Project,
    Event,
    Battle,
    WeeklyDigest,
    Guide,
    Thread,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Post => "post",
            PostType::Intro => "intro",
            PostType::Link => "link",
            PostType::Question => "question",
            PostType::Idea => "idea",
            PostType::Project => "project",
            PostType::Event => "event",
            PostType::Battle => "battle",
            PostType::WeeklyDigest => "weekly_digest",
            PostType::Guide => "guide",
            PostType::Thread => "thread",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(PostType::Post),
            "intro" => Ok(PostType::Intro),
            "link" => Ok(PostType::Link),
            "question" => Ok(PostType::Question),
            "idea" => Ok(PostType::Idea),
            "project" => Ok(PostType::Project),
            "event" => Ok(PostType::Event),
            "battle" => Ok(PostType::Battle),
            "weekly_digest" => Ok(PostType::WeeklyDigest),
            "guide" => Ok(PostType::Guide),
            "thread" => Ok(PostType::Thread),
            _ => Err(format!("Unknown post type: {}", s)),
        }
    }
}

/// A post as the feed sees it
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub post_type: PostType,
    pub title: String,
    pub author_id: UserId,
    pub topic_id: Option<TopicId>,
    /// False for drafts and removed posts
    pub is_visible: bool,
    /// False for members-only posts
    pub is_public: bool,
    #[serde(skip_serializing)]
    pub is_shadow_banned: bool,
    pub is_visible_on_main_page: bool,
    pub is_pinned_until: Option<DateTime<Utc>>,
    pub upvotes: i32,
    pub comment_count: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// A post is pinned while its pin expiry has not passed yet
    pub fn is_pinned_at(&self, now: DateTime<Utc>) -> bool {
        self.is_pinned_until.is_some_and(|until| until >= now)
    }
}
