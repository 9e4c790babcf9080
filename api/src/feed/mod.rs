//! Feed module
//!
//! Plain-text rendering of feed pages.

pub mod renderer;

pub use renderer::render_feed_page;
