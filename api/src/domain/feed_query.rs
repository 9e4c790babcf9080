//! Feed query vocabulary
//!
//! A feed is described as an ordered list of predicates plus a sort key.
//! The PostgreSQL adapter folds the predicates into a SQL condition; the
//! in-memory repository used in tests evaluates them with [`FeedPredicate::matches`].

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Post, PostType, TopicId, UserId};

/// Path value meaning "no post type filter"
pub const POST_TYPE_ALL: &str = "all";

/// Look-back window of the `top_week` ordering
pub const TOP_WEEK_WINDOW_DAYS: i64 = 7;

/// A single restriction applied to the candidate posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPredicate {
    /// Visible posts, plus the viewer's own hidden posts when a viewer is given
    VisibleTo(Option<UserId>),
    /// Exact post type. Unknown type names match nothing.
    OfType(String),
    InTopic(TopicId),
    PublicOnly,
    ExcludeType(PostType),
    /// Drop shadow-banned posts, keeping those written by `except_author`
    HideShadowBanned { except_author: Option<UserId> },
    OnMainPage,
    PublishedSince(DateTime<Utc>),
    PinnedAt(DateTime<Utc>),
    NotPinnedAt(DateTime<Utc>),
}

impl FeedPredicate {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            FeedPredicate::VisibleTo(viewer) => {
                post.is_visible || viewer.is_some_and(|id| id == post.author_id)
            }
            FeedPredicate::OfType(post_type) => post.post_type.as_str() == post_type,
            FeedPredicate::InTopic(topic_id) => post.topic_id == Some(*topic_id),
            FeedPredicate::PublicOnly => post.is_public,
            FeedPredicate::ExcludeType(post_type) => post.post_type != *post_type,
            FeedPredicate::HideShadowBanned { except_author } => {
                !post.is_shadow_banned || except_author.is_some_and(|id| id == post.author_id)
            }
            FeedPredicate::OnMainPage => post.is_visible_on_main_page,
            // Posts without a publication date never fall inside a window
            FeedPredicate::PublishedSince(since) => {
                post.published_at.is_some_and(|published| published >= *since)
            }
            FeedPredicate::PinnedAt(now) => post.is_pinned_at(*now),
            FeedPredicate::NotPinnedAt(now) => !post.is_pinned_at(*now),
        }
    }
}

/// Sort key of a feed, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSort {
    LastActivityDesc,
    CreatedDesc,
    UpvotesDesc,
}

impl FeedSort {
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            FeedSort::LastActivityDesc => b.last_activity_at.cmp(&a.last_activity_at),
            FeedSort::CreatedDesc => b.created_at.cmp(&a.created_at),
            FeedSort::UpvotesDesc => b.upvotes.cmp(&a.upvotes),
        }
    }
}

/// Predicates applied in order, then sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub predicates: Vec<FeedPredicate>,
    pub sort: FeedSort,
}

impl FeedQuery {
    pub fn new(sort: FeedSort) -> Self {
        Self {
            predicates: Vec::new(),
            sort,
        }
    }

    /// Append a predicate
    pub fn filter(mut self, predicate: FeedPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// A copy of this query narrowed by one more predicate
    pub fn narrowed(&self, predicate: FeedPredicate) -> Self {
        self.clone().filter(predicate)
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.predicates.iter().all(|p| p.matches(post))
    }
}

/// How a feed is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrdering {
    #[default]
    Activity,
    New,
    Top,
    TopWeek,
}

impl FeedOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedOrdering::Activity => "activity",
            FeedOrdering::New => "new",
            FeedOrdering::Top => "top",
            FeedOrdering::TopWeek => "top_week",
        }
    }

    /// The window predicate (if any) and sort key this ordering stands for
    pub fn plan(&self, now: DateTime<Utc>) -> (Option<FeedPredicate>, FeedSort) {
        match self {
            FeedOrdering::Activity => (None, FeedSort::LastActivityDesc),
            FeedOrdering::New => (None, FeedSort::CreatedDesc),
            FeedOrdering::Top => (None, FeedSort::UpvotesDesc),
            FeedOrdering::TopWeek => (
                Some(FeedPredicate::PublishedSince(
                    now - Duration::days(TOP_WEEK_WINDOW_DAYS),
                )),
                FeedSort::UpvotesDesc,
            ),
        }
    }

    /// The "new" tab shows everything, shadow-banned posts included
    pub fn hides_shadow_banned(&self) -> bool {
        !matches!(self, FeedOrdering::New)
    }
}

impl std::fmt::Display for FeedOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activity" => Ok(FeedOrdering::Activity),
            "new" => Ok(FeedOrdering::New),
            "top" => Ok(FeedOrdering::Top),
            "top_week" => Ok(FeedOrdering::TopWeek),
            _ => Err(format!("Unknown ordering: {}", s)),
        }
    }
}
