//! PostgreSQL adapter for PostVoteRepository

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::domain::entities::{PostId, UserId};
use crate::domain::ports::PostVoteRepository;
use crate::entity::post_votes;
use crate::error::DomainError;

/// PostgreSQL implementation of PostVoteRepository
pub struct PostgresPostVoteRepository {
    db: DatabaseConnection,
}

impl PostgresPostVoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostVoteRepository for PostgresPostVoteRepository {
    async fn upvoted_among(
        &self,
        user_id: &UserId,
        post_ids: &[PostId],
    ) -> Result<HashSet<PostId>, DomainError> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let voted: Vec<Uuid> = post_votes::Entity::find()
            .select_only()
            .column(post_votes::Column::PostId)
            .filter(post_votes::Column::UserId.eq(user_id.0))
            .filter(post_votes::Column::PostId.is_in(post_ids.iter().map(|id| id.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(voted.into_iter().map(PostId).collect())
    }
}
