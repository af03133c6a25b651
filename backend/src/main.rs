use axum::http::{header, HeaderValue, Method};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::services::lead_service::LeadStore;

mod config;
mod error;
mod handlers;
mod logging;
mod models;
mod services;

#[derive(Clone)]
pub struct AppState {
    leads: LeadStore,
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(AllowOrigin::exact(origin)),
        Some(Err(_)) => {
            warn!("ALLOWED_ORIGIN is not a valid header value, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/api/health_check", get(health_check))
        .nest("/api/leads", handlers::create_router())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn connect_store(config: &Config) -> Result<LeadStore, Box<dyn std::error::Error>> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, leads are kept in memory and lost on restart");
        return Ok(LeadStore::in_memory());
    };

    let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Connected to Postgres, migrations applied");
    Ok(LeadStore::Postgres(pool))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup();

    let config = Config::from_env()?;
    let state = AppState {
        leads: connect_store(&config).await?,
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app(state, &config)).await?;

    Ok(())
}
