//! Feed renderer
//!
//! Renders feed pages to plain-text markdown.

use crate::app::{FeedPage, FeedPost};

/// Render a feed page. `base_path` is the page's own URL without query
/// string, used for the navigation links.
pub fn render_feed_page(page: &FeedPage, base_path: &str) -> String {
    let mut buf = String::new();

    // Header
    match &page.topic {
        Some(topic) => buf.push_str(&format!("# {}\n\n", topic.name)),
        None => buf.push_str("# Feed\n\n"),
    }
    buf.push_str(&format!(
        "Type: {} | Ordering: {}\n\n",
        page.post_type, page.ordering
    ));

    // Pinned posts go first and are never paginated
    if !page.pinned_posts.is_empty() {
        buf.push_str("## Pinned\n\n");
        for post in &page.pinned_posts {
            buf.push_str(&render_post("[PIN]", post));
        }
        buf.push('\n');
    }

    buf.push_str("## Posts\n\n");
    if page.posts.items.is_empty() {
        buf.push_str("_No posts here yet._\n\n");
    } else {
        let first = (page.posts.number - 1) * page.posts.per_page;
        for (i, post) in page.posts.items.iter().enumerate() {
            let marker = format!("[{}]", first + i as u64 + 1);
            buf.push_str(&render_post(&marker, post));
        }
        buf.push('\n');
    }

    // Navigation
    buf.push_str("---\n\n");
    buf.push_str(&format!(
        "Page {} of {} ({} posts)\n",
        page.posts.number, page.posts.total_pages, page.posts.total_items
    ));
    if page.posts.has_previous() {
        buf.push_str(&format!(
            "- Previous: {}?page={}\n",
            base_path,
            page.posts.number - 1
        ));
    }
    if page.posts.has_next() {
        buf.push_str(&format!(
            "- Next: {}?page={}\n",
            base_path,
            page.posts.number + 1
        ));
    }

    buf
}

fn render_post(marker: &str, item: &FeedPost) -> String {
    let post = &item.post;
    let voted = if item.is_upvoted { " (upvoted)" } else { "" };

    format!(
        "{} {} ({})\n    {} upvotes{} | {} comments | /{}/{}/\n",
        marker,
        truncate(&post.title, 80),
        post.post_type,
        post.upvotes,
        voted,
        post.comment_count,
        post.post_type,
        post.slug
    )
}

/// Truncate a string with ellipsis, counting characters rather than bytes
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
