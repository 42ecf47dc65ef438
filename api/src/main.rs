//! Comment Board API Server
//!
//! A public comment board where every new comment passes automated toxicity
//! moderation (static blacklist, then a remote classifier) before it can be
//! shown. Admins review what moderation held back or users reported.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
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
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    load_blacklist, HttpToxicityClassifier, PostgresCommentRepository, PostgresUserRepository,
};
use app::{BoardService, ModerationService, UserService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub board_service: Arc<BoardService<PostgresCommentRepository, HttpToxicityClassifier>>,
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

fn router(state: AppState) -> Router {
    // Admin routes (auth runs first, then the role check)
    let admin_routes = Router::new()
        .route("/admin/review", get(handlers::review_queue))
        .route("/admin/comments", get(handlers::list_all_comments))
        .route(
            "/admin/comments/:id/override",
            post(handlers::override_comment),
        )
        .route("/admin/export.csv", get(handlers::export_csv))
        .layer(middleware::from_fn(auth::require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // Routes for any registered user
    let user_routes = Router::new()
        .route("/users/me", get(handlers::me))
        .route("/comments", post(handlers::submit_comment))
        .route("/comments/:id/like", post(handlers::like_comment))
        .route("/comments/:id/report", post(handlers::report_comment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public endpoints
        .route("/users/register", post(handlers::register))
        .route("/comments", get(handlers::list_comments))
        .route("/comments/search", get(handlers::search_comments))
        .route("/comments/:id", get(handlers::get_comment))
        .merge(user_routes)
        .merge(admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,commentboard_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Comment Board API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::debug!(classifier = ?config.classifier, "Configuration loaded");

    // Blacklist problems are fatal at startup, never at comment time
    let blacklist = Arc::new(load_blacklist(&config.blacklist_path)?);

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(db.clone()));
    let classifier = Arc::new(
        HttpToxicityClassifier::new(&config.classifier)
            .context("Failed to build classifier client")?,
    );
    tracing::info!(url = classifier.url(), "Classifier client ready");

    // Create application services
    let user_service = Arc::new(UserService::new(user_repo, config.admin_token.clone()));
    let moderation = ModerationService::new(classifier, blacklist);
    let board_service = Arc::new(BoardService::new(
        comment_repo,
        moderation,
        config.report_review_threshold,
    ));

    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, no user can register as admin");
    }

    // Create app state
    let state = AppState {
        user_service,
        board_service,
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
