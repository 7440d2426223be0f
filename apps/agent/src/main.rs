mod batch;
mod config;
mod errors;
mod llm_client;
mod publish;
mod render;
mod routes;
mod rpc;
mod search;
mod state;
mod storage;
#[cfg(test)]
mod test_support;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};
use crate::llm_client::LlmClient;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::search::SerpApiClient;
use crate::state::AppState;
use crate::storage::{ObjectStore, S3ObjectStore, UnconfiguredStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http={}",
            env!("CARGO_CRATE_NAME"),
            &config.rust_log,
            &config.rust_log
        ))
    });
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting interview agent v{}", env!("CARGO_PKG_VERSION"));

    let state = build_state(config).await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => serve(state).await,
        Some("batch") => {
            let report = batch::run_batch(&state, Utc::now().date_naive()).await?;
            info!("Batch complete: {}", serde_json::to_string(&report)?);
            Ok(())
        }
        Some("schedule") => {
            batch::scheduler::run_schedule(state).await;
            Ok(())
        }
        Some(other) => bail!("unknown mode {other:?}; expected serve, batch or schedule"),
    }
}

async fn build_state(config: Config) -> Result<AppState> {
    // Initialize LLM client
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every agent.chat call will fail");
    }
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize search client
    if config.serpapi_api_key.is_none() {
        warn!("SERPAPI_API_KEY is not set; searches will return no papers");
    }
    let search = SerpApiClient::new(config.serpapi_api_key.clone(), &config.serpapi_base_url)?;

    // Initialize S3 / Spaces
    let store: Arc<dyn ObjectStore> = match &config.storage {
        Some(storage) => {
            let store = S3ObjectStore::connect(storage).await;
            info!(
                "S3 client initialized (endpoint: {}, bucket: {})",
                storage.endpoint_url, storage.bucket
            );
            Arc::new(store)
        }
        None => {
            warn!("S3 storage is not configured; PDF uploads will fail");
            Arc::new(UnconfiguredStore)
        }
    };

    Ok(AppState {
        llm: Arc::new(llm),
        search: Arc::new(search),
        renderer: Arc::new(PdfRenderer),
        store,
        config,
    })
}

async fn serve(state: AppState) -> Result<()> {
    let port = state.config.port;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
