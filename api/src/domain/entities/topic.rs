//! Topic domain entity
//!
//! Topics ("rooms") group posts by subject and are addressed by slug.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(pub Uuid);

impl TopicId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TopicId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TopicId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: TopicId,
    pub slug: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}
