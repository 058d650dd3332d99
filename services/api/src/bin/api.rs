//! services/api/src/bin/api.rs

use api_lib::{
    adapters::PgCommentStore,
    config::{Config, ConfigError, StoreBackend},
    error::ApiError,
    web::{
        health_handler, list_today_handler, rest::ApiDoc, state::AppState,
        submit_comment_handler, ws_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use comment_wall_core::{Clock, CommentStore, MemoryCommentStore, SystemClock};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Set Up the Comment Store ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn CommentStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            // Connect lazily: an unreachable database is reported by the probe, not fatal here.
            info!("Using the Postgres comment store.");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect_lazy(database_url)?;
            Arc::new(PgCommentStore::new(db_pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory comment store; comments will not survive a restart.");
            Arc::new(MemoryCommentStore::new(clock.clone()))
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState { store, clock });

    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
    })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route("/comments", post(submit_comment_handler))
        .route("/comments/today", get(list_today_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
