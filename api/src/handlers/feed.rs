//! Feed handlers
//!
//! Endpoints for the post feed, by type and by topic ("room").
//! Supports content negotiation: Accept: application/json for JSON, otherwise text/plain.

use std::sync::LazyLock;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use regex::Regex;

use crate::app::{FeedRequest, PageParams};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::feed::render_feed_page;
use crate::AppState;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Path segments must be slugs, anything else is a URL that doesn't exist
fn check_slug(segment: &str) -> Result<(), AppError> {
    if SLUG.is_match(segment) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("No such page: {}", segment)))
    }
}

/// URL of a feed page, without the page number
fn feed_path(request: &FeedRequest, explicit_ordering: bool) -> String {
    let mut path = match (&request.topic_slug, &request.post_type) {
        (Some(slug), _) => format!("/room/{}", slug),
        (None, Some(post_type)) => format!("/{}", post_type),
        (None, None) => String::new(),
    };

    if explicit_ordering {
        path.push('/');
        path.push_str(request.ordering.as_str());
    }

    if path.is_empty() {
        path.push('/');
    }
    path
}

async fn respond(
    state: &AppState,
    viewer: Option<Extension<User>>,
    request: FeedRequest,
    explicit_ordering: bool,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let viewer = viewer.map(|Extension(user)| user);
    let page = state
        .feed_service
        .build_feed(viewer.as_ref(), &request)
        .await?;

    if wants_json(headers) {
        Ok(Json(page).into_response())
    } else {
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_feed_page(&page, &feed_path(&request, explicit_ordering)),
        )
            .into_response())
    }
}

/// GET /
///
/// The main page: no type, no topic, ordered by activity.
pub async fn main_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let request = FeedRequest::from_path(None, None, None, params.page)?;
    respond(&state, viewer, request, false, &headers).await
}

/// GET /:post_type
pub async fn type_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    Path(post_type): Path<String>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_slug(&post_type)?;
    let request = FeedRequest::from_path(Some(post_type), None, None, params.page)?;
    respond(&state, viewer, request, false, &headers).await
}

/// GET /:post_type/:ordering
pub async fn type_feed_ordered(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    Path((post_type, ordering)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_slug(&post_type)?;
    let request =
        FeedRequest::from_path(Some(post_type), None, Some(&ordering), params.page)?;
    respond(&state, viewer, request, true, &headers).await
}

/// GET /room/:topic_slug
pub async fn topic_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    Path(topic_slug): Path<String>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_slug(&topic_slug)?;
    let request = FeedRequest::from_path(None, Some(topic_slug), None, params.page)?;
    respond(&state, viewer, request, false, &headers).await
}

/// GET /room/:topic_slug/:ordering
pub async fn topic_feed_ordered(
    State(state): State<AppState>,
    viewer: Option<Extension<User>>,
    Path((topic_slug, ordering)): Path<(String, String)>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    check_slug(&topic_slug)?;
    let request =
        FeedRequest::from_path(None, Some(topic_slug), Some(&ordering), params.page)?;
    respond(&state, viewer, request, true, &headers).await
}
