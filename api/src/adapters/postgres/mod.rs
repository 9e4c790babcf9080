//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod post_repo;
pub mod topic_repo;
pub mod user_repo;
pub mod vote_repo;

#[cfg(test)]
mod integration_tests;

pub use post_repo::PostgresPostRepository;
pub use topic_repo::PostgresTopicRepository;
pub use user_repo::PostgresUserRepository;
pub use vote_repo::PostgresPostVoteRepository;
