//! PostgreSQL adapter for TopicRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{Topic, TopicId};
use crate::domain::ports::TopicRepository;
use crate::entity::topics;
use crate::error::DomainError;

/// PostgreSQL implementation of TopicRepository
pub struct PostgresTopicRepository {
    db: DatabaseConnection,
}

impl PostgresTopicRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Topic>, DomainError> {
        let result = topics::Entity::find()
            .filter(topics::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

impl From<topics::Model> for Topic {
    fn from(model: topics::Model) -> Self {
        Topic {
            id: TopicId(model.id),
            slug: model.slug,
            name: model.name,
            icon: model.icon,
            color: model.color,
        }
    }
}
