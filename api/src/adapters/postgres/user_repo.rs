//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
    /// Minimum gap between two stored last-activity timestamps
    activity_throttle: Duration,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection, activity_throttle: Duration) -> Self {
        Self {
            db,
            activity_throttle,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_session_token_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::SessionTokenHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn touch_last_activity(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), DomainError> {
        // Every feed view calls this, so only write when the stored value is stale
        let stale_before = (at - self.activity_throttle).fixed_offset();

        users::Entity::update_many()
            .col_expr(users::Column::LastActivityAt, Expr::value(at.fixed_offset()))
            .filter(users::Column::Id.eq(id.0))
            .filter(
                Condition::any()
                    .add(users::Column::LastActivityAt.is_null())
                    .add(users::Column::LastActivityAt.lt(stale_before)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            slug: model.slug,
            full_name: model.full_name,
            session_token_hash: model.session_token_hash,
            created_at: model.created_at.with_timezone(&Utc),
            last_activity_at: model.last_activity_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
