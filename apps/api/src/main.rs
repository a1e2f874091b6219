mod ai_client;
mod analysis;
mod config;
mod errors;
mod extract;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::{DisabledSuggestions, GeminiClient, SuggestionBackend};
use crate::analysis::lexicon::Lexicon;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerScope API v{}", env!("CARGO_PKG_VERSION"));

    // Lexicon load is startup-fatal: the extractor cannot run without it.
    let lexicon = Arc::new(load_lexicon(&config)?);
    info!("Lexicon loaded: {} domains", lexicon.domains.len());

    let suggester: Arc<dyn SuggestionBackend> = match &config.ai_api_key {
        Some(api_key) => {
            info!("AI suggestion client initialized (model: {})", ai_client::MODEL);
            Arc::new(GeminiClient::new(api_key.clone()))
        }
        None => {
            warn!("AI_API_KEY not set — AI suggestions disabled");
            Arc::new(DisabledSuggestions)
        }
    };

    let state = AppState {
        lexicon,
        suggester,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_lexicon(config: &Config) -> Result<Lexicon> {
    match &config.lexicon_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read lexicon file '{path}'"))?;
            Lexicon::from_json(&raw).with_context(|| format!("failed to load lexicon '{path}'"))
        }
        None => Ok(Lexicon::builtin()),
    }
}
