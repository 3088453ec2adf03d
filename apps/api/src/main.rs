mod config;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod markdown;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::default_page_config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DraftStore, KeyValueStore, MemoryStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RecruitAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize persistence
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            let redis = RedisStore::open(url)?;
            info!("Redis store initialized");
            Arc::new(redis)
        }
        None => {
            warn!("REDIS_URL not set; drafts and saved results are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_url.clone())?;
    info!(
        "LLM client initialized (models: {}, {})",
        llm_client::GENERATION_MODEL,
        llm_client::IMAGE_MODEL
    );

    let page_config = default_page_config();
    info!(
        "Export page: {}x{}mm, margin {}mm",
        page_config.page_width_mm, page_config.page_height_mm, page_config.margin_mm
    );

    // Build app state
    let state = AppState {
        llm,
        drafts: DraftStore::new(store),
        config: config.clone(),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
