//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod post;
pub mod topic;
pub mod user;

pub use post::{Post, PostId, PostType};
pub use topic::{Topic, TopicId};
pub use user::{User, UserId};
