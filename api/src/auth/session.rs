//! Session token authentication
//!
//! Visitors may browse feeds anonymously, so a missing or bad token never
//! rejects the request: it just leaves the viewer unset.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::domain::entities::User;
use crate::domain::ports::UserRepository;
use crate::AppState;

/// Hash a session token for storage and lookup
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the session token from the Authorization header
fn extract_session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Look up the viewer behind the request's session token, if any
pub async fn resolve_viewer<UR>(users: &UR, headers: &HeaderMap) -> Option<User>
where
    UR: UserRepository + ?Sized,
{
    let token = extract_session_token(headers)?;

    match users
        .find_by_session_token_hash(&hash_session_token(token))
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed, serving anonymously");
            None
        }
    }
}

/// Optional authentication middleware
///
/// Injects the `User` into request extensions when the session token is valid.
/// Handlers read it as `Option<Extension<User>>`.
pub async fn optional_viewer_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = resolve_viewer(state.user_repo.as_ref(), request.headers()).await {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}
