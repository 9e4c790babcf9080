//! Authentication
//!
//! Resolves the optional viewer of a request from its session token.

pub mod session;

pub use session::optional_viewer_middleware;
