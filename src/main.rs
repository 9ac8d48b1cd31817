//! SafeNet Assistant Server
//!
//! Keyword-driven safety assistant for the SafeNet digital-safety platform.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SAFENET ASSISTANT                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────────┐  ┌──────────────────┐  │
//! │  │  API      │  │  Safety         │  │  Chat Provider   │  │
//! │  │  (Axum)   │─▶│  crisis / scan  │  │  (reqwest)       │  │
//! │  └───────────┘  └────────┬────────┘  └────────▲─────────┘  │
//! │                          └── no crisis, key set ┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod assistant;
mod config;
mod error;
mod handlers;
mod models;
mod provider;
mod safety;

use axum::{
    Router,
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::net::SocketAddr;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use assistant::Assistant;
use provider::ChatProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "safenet_assistant=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("SafeNet Assistant starting ({})", config.environment);

    let state = AppState::new(config.clone())?;
    if state.assistant.has_provider() {
        tracing::info!("Chat provider: {} ({})", config.provider.name, config.provider.model);
    } else {
        tracing::info!("No chat provider configured, using local keyword replies");
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(config: config::Config) -> AppResult<Self> {
        let provider = ChatProvider::from_config(&config.provider)?;
        let assistant = Assistant::new(provider, config.support.clone());
        Ok(Self { config, assistant })
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/health", get(handlers::health::check))
        .route("/api/ai/chat", post(handlers::ai::chat))
        .route("/api/ai/scan", post(handlers::ai::scan))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Production only admits the configured frontend; development mirrors any origin.
fn cors_layer(config: &config::Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);
    }

    let origin = match HeaderValue::from_str(&config.frontend_url) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            tracing::warn!("Invalid FRONTEND_URL '{}', cross-origin requests disabled", config.frontend_url);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::Internal { context: "Server error", details }.into_response()
}
