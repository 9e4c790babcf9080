//! PostgreSQL adapter for PostRepository
//!
//! Feed predicates are translated one by one into SQL conditions, so the
//! database applies exactly the filters the in-memory evaluation would.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::domain::entities::{Post, PostId, PostType, TopicId, UserId};
use crate::domain::feed_query::{FeedPredicate, FeedQuery, FeedSort};
use crate::domain::ports::PostRepository;
use crate::entity::posts;
use crate::error::DomainError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// SQL condition equivalent to `FeedPredicate::matches`
fn predicate_condition(predicate: &FeedPredicate) -> Condition {
    match predicate {
        FeedPredicate::VisibleTo(None) => Condition::all().add(posts::Column::IsVisible.eq(true)),
        FeedPredicate::VisibleTo(Some(viewer)) => Condition::any()
            .add(posts::Column::IsVisible.eq(true))
            .add(posts::Column::AuthorId.eq(viewer.0)),
        FeedPredicate::OfType(post_type) => {
            Condition::all().add(posts::Column::PostType.eq(post_type.as_str()))
        }
        FeedPredicate::InTopic(topic_id) => {
            Condition::all().add(posts::Column::TopicId.eq(topic_id.0))
        }
        FeedPredicate::PublicOnly => Condition::all().add(posts::Column::IsPublic.eq(true)),
        FeedPredicate::ExcludeType(post_type) => {
            Condition::all().add(posts::Column::PostType.ne(post_type.as_str()))
        }
        FeedPredicate::HideShadowBanned {
            except_author: None,
        } => Condition::all().add(posts::Column::IsShadowBanned.eq(false)),
        FeedPredicate::HideShadowBanned {
            except_author: Some(author),
        } => Condition::any()
            .add(posts::Column::IsShadowBanned.eq(false))
            .add(posts::Column::AuthorId.eq(author.0)),
        FeedPredicate::OnMainPage => {
            Condition::all().add(posts::Column::IsVisibleOnMainPage.eq(true))
        }
        FeedPredicate::PublishedSince(since) => {
            Condition::all().add(posts::Column::PublishedAt.gte(since.fixed_offset()))
        }
        FeedPredicate::PinnedAt(now) => {
            Condition::all().add(posts::Column::IsPinnedUntil.gte(now.fixed_offset()))
        }
        FeedPredicate::NotPinnedAt(now) => Condition::any()
            .add(posts::Column::IsPinnedUntil.is_null())
            .add(posts::Column::IsPinnedUntil.lt(now.fixed_offset())),
    }
}

fn feed_condition(query: &FeedQuery) -> Condition {
    query
        .predicates
        .iter()
        .fold(Condition::all(), |cond, p| cond.add(predicate_condition(p)))
}

fn feed_select(query: &FeedQuery) -> Select<posts::Entity> {
    let select = posts::Entity::find().filter(feed_condition(query));

    match query.sort {
        FeedSort::LastActivityDesc => select.order_by_desc(posts::Column::LastActivityAt),
        FeedSort::CreatedDesc => select.order_by_desc(posts::Column::CreatedAt),
        FeedSort::UpvotesDesc => select.order_by_desc(posts::Column::Upvotes),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(
        &self,
        query: &FeedQuery,
        limit: Option<u64>,
        offset: u64,
    ) -> Result<Vec<Post>, DomainError> {
        let mut select = feed_select(query).offset(offset);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let results = select
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self, query: &FeedQuery) -> Result<u64, DomainError> {
        posts::Entity::find()
            .filter(feed_condition(query))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Post {
            id: PostId(model.id),
            slug: model.slug,
            post_type: model.post_type.parse().unwrap_or(PostType::Post),
            title: model.title,
            author_id: UserId(model.author_id),
            topic_id: model.topic_id.map(TopicId),
            is_visible: model.is_visible,
            is_public: model.is_public,
            is_shadow_banned: model.is_shadow_banned,
            is_visible_on_main_page: model.is_visible_on_main_page,
            is_pinned_until: model.is_pinned_until.map(|dt| dt.with_timezone(&Utc)),
            upvotes: model.upvotes,
            comment_count: model.comment_count,
            view_count: model.view_count,
            created_at: model.created_at.with_timezone(&Utc),
            last_activity_at: model.last_activity_at.with_timezone(&Utc),
            published_at: model.published_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
