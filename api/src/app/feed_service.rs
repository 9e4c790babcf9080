//! Feed service
//!
//! Builds the post feed page for a visitor: picks the candidate posts,
//! narrows them by type, topic and visibility rules, orders them and splits
//! off the pinned ones. The regular posts are paginated, pinned ones are not.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::pagination::{paginate, Page};
use crate::domain::entities::{Post, PostId, PostType, Topic, User, UserId};
use crate::domain::feed_query::{FeedOrdering, FeedPredicate, FeedQuery, POST_TYPE_ALL};
use crate::domain::ports::{PostRepository, PostVoteRepository, TopicRepository, UserRepository};
use crate::error::AppError;

/// What the visitor asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRequest {
    /// `None` when the URL carried no type at all (the main page)
    pub post_type: Option<String>,
    pub topic_slug: Option<String>,
    pub ordering: FeedOrdering,
    /// Raw `?page=` value
    pub page: Option<String>,
}

impl FeedRequest {
    /// Build a request from URL parts. An unknown ordering is a 404, like any
    /// other URL that doesn't exist.
    pub fn from_path(
        post_type: Option<String>,
        topic_slug: Option<String>,
        ordering: Option<&str>,
        page: Option<String>,
    ) -> Result<Self, AppError> {
        let ordering = match ordering {
            Some(raw) => raw
                .parse::<FeedOrdering>()
                .map_err(AppError::NotFound)?,
            None => FeedOrdering::default(),
        };

        Ok(Self {
            post_type: post_type.filter(|t| !t.is_empty()),
            topic_slug: topic_slug.filter(|s| !s.is_empty()),
            ordering,
            page,
        })
    }
}

/// A post annotated for the current viewer
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub is_upvoted: bool,
}

/// A rendered feed page
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    /// Type filter in effect, "all" when none
    pub post_type: String,
    pub ordering: FeedOrdering,
    pub topic: Option<Topic>,
    /// Regular (unpinned) posts, paginated
    pub posts: Page<FeedPost>,
    pub pinned_posts: Vec<FeedPost>,
}

/// Assemble the predicates for a feed request, in application order
pub fn feed_query(
    viewer: Option<UserId>,
    post_type: Option<&str>,
    topic: Option<&Topic>,
    ordering: FeedOrdering,
    now: DateTime<Utc>,
) -> FeedQuery {
    let anonymous = viewer.is_none();
    let (window, sort) = ordering.plan(now);

    let steps = [
        Some(FeedPredicate::VisibleTo(viewer)),
        post_type
            .filter(|t| *t != POST_TYPE_ALL)
            .map(|t| FeedPredicate::OfType(t.to_string())),
        topic.map(|t| FeedPredicate::InTopic(t.id)),
        anonymous.then_some(FeedPredicate::PublicOnly),
        anonymous.then_some(FeedPredicate::ExcludeType(PostType::Intro)),
        ordering
            .hides_shadow_banned()
            .then_some(FeedPredicate::HideShadowBanned {
                except_author: viewer,
            }),
        // no type and no topic: this is the main page
        (post_type.is_none() && topic.is_none()).then_some(FeedPredicate::OnMainPage),
        window,
    ];

    steps
        .into_iter()
        .flatten()
        .fold(FeedQuery::new(sort), FeedQuery::filter)
}

/// Service for building post feeds
pub struct FeedService<PR, TR, UR, VR>
where
    PR: PostRepository,
    TR: TopicRepository,
    UR: UserRepository,
    VR: PostVoteRepository,
{
    posts: Arc<PR>,
    topics: Arc<TR>,
    users: Arc<UR>,
    votes: Arc<VR>,
    page_size: u64,
}

impl<PR, TR, UR, VR> FeedService<PR, TR, UR, VR>
where
    PR: PostRepository,
    TR: TopicRepository,
    UR: UserRepository,
    VR: PostVoteRepository,
{
    pub fn new(
        posts: Arc<PR>,
        topics: Arc<TR>,
        users: Arc<UR>,
        votes: Arc<VR>,
        page_size: u64,
    ) -> Self {
        Self {
            posts,
            topics,
            users,
            votes,
            page_size,
        }
    }

    /// Build the feed page for a viewer (or an anonymous visitor)
    pub async fn build_feed(
        &self,
        viewer: Option<&User>,
        request: &FeedRequest,
    ) -> Result<FeedPage, AppError> {
        self.build_feed_at(viewer, request, Utc::now()).await
    }

    /// Same as [`build_feed`](Self::build_feed) with an explicit clock
    pub async fn build_feed_at(
        &self,
        viewer: Option<&User>,
        request: &FeedRequest,
        now: DateTime<Utc>,
    ) -> Result<FeedPage, AppError> {
        if let Some(user) = viewer {
            self.record_activity(user, now).await;
        }

        let topic = match request.topic_slug.as_deref() {
            Some(slug) => Some(
                self.topics
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Topic '{}' not found", slug)))?,
            ),
            None => None,
        };

        let viewer_id = viewer.map(|u| u.id);
        let query = feed_query(
            viewer_id,
            request.post_type.as_deref(),
            topic.as_ref(),
            request.ordering,
            now,
        );

        let pinned = self
            .posts
            .find(&query.narrowed(FeedPredicate::PinnedAt(now)), None, 0)
            .await?;

        let regular = paginate(
            self.posts.as_ref(),
            &query.narrowed(FeedPredicate::NotPinnedAt(now)),
            request.page.as_deref(),
            self.page_size,
        )
        .await?;

        let upvoted = self
            .upvoted_by(viewer_id, pinned.iter().chain(regular.items.iter()))
            .await?;
        let annotate = |post: Post| FeedPost {
            is_upvoted: upvoted.contains(&post.id),
            post,
        };

        tracing::debug!(
            viewer = ?viewer_id,
            post_type = ?request.post_type,
            topic = ?request.topic_slug,
            ordering = %request.ordering,
            pinned = pinned.len(),
            page = regular.number,
            total = regular.total_items,
            "Built feed"
        );

        Ok(FeedPage {
            post_type: request
                .post_type
                .clone()
                .unwrap_or_else(|| POST_TYPE_ALL.to_string()),
            ordering: request.ordering,
            topic,
            posts: regular.map(annotate),
            pinned_posts: pinned.into_iter().map(annotate).collect(),
        })
    }

    /// Best effort: a failed write never breaks the feed
    async fn record_activity(&self, user: &User, now: DateTime<Utc>) {
        if let Err(e) = self.users.touch_last_activity(&user.id, now).await {
            tracing::warn!(error = %e, user_id = %user.id, "Failed to update last activity");
        }
    }

    async fn upvoted_by<'a>(
        &self,
        viewer: Option<UserId>,
        posts: impl Iterator<Item = &'a Post>,
    ) -> Result<HashSet<PostId>, AppError> {
        let Some(user_id) = viewer else {
            return Ok(HashSet::new());
        };

        let ids: Vec<PostId> = posts.map(|p| p.id).collect();
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        Ok(self.votes.upvoted_among(&user_id, &ids).await?)
    }
}
