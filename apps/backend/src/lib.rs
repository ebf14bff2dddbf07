pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState { db: Arc::new(db) };

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the API router. Authentication is applied to every route; the
/// middleware lets public routes through.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // User routes
        .route("/api/users/register", post(routes::users::register))
        .route(
            "/api/users/profile",
            get(routes::users::profile).put(routes::users::update_profile),
        )
        // Lesson routes
        .route(
            "/api/lessons",
            get(routes::lessons::list).post(routes::lessons::create),
        )
        .route(
            "/api/lessons/:id",
            get(routes::lessons::get)
                .put(routes::lessons::update)
                .delete(routes::lessons::delete),
        )
        .route("/api/lessons/:id/audio", delete(routes::lessons::delete_audio))
        // Voice routes
        .route("/api/voice/submit", post(routes::voice::submit))
        .route("/api/voice/submissions", get(routes::voice::my_submissions))
        .route(
            "/api/voice/submissions/:id",
            delete(routes::voice::delete_submission),
        )
        .route("/api/voice/all", get(routes::voice::all_submissions))
        // Progress routes
        .route("/api/progress", get(routes::progress::list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
