//! SeaORM entities
//!
//! Table models mirroring `migrations/`. Adapters convert these into domain
//! entities; nothing outside `adapters::postgres` should touch them.

pub mod post_votes;
pub mod posts;
pub mod topics;
pub mod users;
