//! Club feed API server
//!
//! Serves the post feeds of a members' club: the main page, per-type feeds
//! and topic rooms, in several orderings with pinned posts on top.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresPostRepository, PostgresPostVoteRepository, PostgresTopicRepository,
    PostgresUserRepository,
};
use app::FeedService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<
        FeedService<
            PostgresPostRepository,
            PostgresTopicRepository,
            PostgresUserRepository,
            PostgresPostVoteRepository,
        >,
    >,
    pub user_repo: Arc<PostgresUserRepository>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clubfeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting club feed API...");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let post_repo = Arc::new(PostgresPostRepository::new(db.clone()));
    let topic_repo = Arc::new(PostgresTopicRepository::new(db.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(
        db.clone(),
        config.activity_throttle,
    ));
    let vote_repo = Arc::new(PostgresPostVoteRepository::new(db.clone()));

    let feed_service = Arc::new(FeedService::new(
        post_repo,
        topic_repo,
        user_repo.clone(),
        vote_repo,
        config.feed_page_size,
    ));

    let state = AppState {
        feed_service,
        user_repo,
    };

    // Uses PeerIpKeyExtractor to get client IP from socket connection.
    // The builder takes the interval at which one request is replenished.
    let replenish_ms = (1000 / config.rate_limit_per_second.max(1)).max(1);
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_millisecond(replenish_ms)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    // Feed pages (optional session auth, rate limited)
    let feed_routes = Router::new()
        .route("/", get(handlers::main_feed))
        .route("/:post_type", get(handlers::type_feed))
        .route("/:post_type/:ordering", get(handlers::type_feed_ordered))
        .route("/room/:topic_slug", get(handlers::topic_feed))
        .route("/room/:topic_slug/:ordering", get(handlers::topic_feed_ordered))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_viewer_middleware,
        ))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(feed_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
