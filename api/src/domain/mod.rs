//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `feed_query`: Predicates, sort keys and orderings that describe a feed
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod feed_query;
pub mod ports;
