mod config;
mod errors;
mod models;
mod recommend;
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
use crate::models::candidate::Candidate;
use crate::recommend::model_cache::ModelCache;
use crate::recommend::recommender::RecommenderConfig;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::corpus::JsonFileCorpus;
use crate::store::JobCorpusProvider;
use crate::store::memory::{InMemoryCandidateStore, InMemoryNotificationSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobreco API v{}", env!("CARGO_PKG_VERSION"));

    let corpus = Arc::new(JsonFileCorpus::new(&config.jobs_path));
    let candidates = Arc::new(load_candidate_store(config.profiles_path.as_deref()).await);
    let notifications = Arc::new(InMemoryNotificationSink::new());
    let models = Arc::new(ModelCache::new());

    // Pre-train at startup so the first request does not pay the fit cost.
    // Tolerant: a missing or empty corpus logs a warning and training is
    // retried per request through the model cache.
    match corpus.fetch_all().await {
        Ok(jobs) => match models.get_or_train(&jobs) {
            Ok(model) => info!(classes = model.labels.len(), "model pre-trained at startup"),
            Err(e) => warn!("startup training skipped: {e}"),
        },
        Err(e) => warn!("job corpus unavailable at startup: {e}"),
    }

    let state = AppState {
        corpus,
        candidates,
        notifications,
        models,
        recommender: Arc::new(RecommenderConfig::default()),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the candidate store, seeded from `PROFILES_PATH` when set.
async fn load_candidate_store(profiles_path: Option<&str>) -> InMemoryCandidateStore {
    let Some(path) = profiles_path else {
        return InMemoryCandidateStore::new();
    };
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => match serde_json::from_str::<Vec<Candidate>>(&raw) {
            Ok(profiles) => {
                info!(profiles = profiles.len(), path, "candidate profiles loaded");
                InMemoryCandidateStore::with_candidates(profiles)
            }
            Err(e) => {
                warn!("invalid profiles file {path}: {e}");
                InMemoryCandidateStore::new()
            }
        },
        Err(e) => {
            warn!("cannot read profiles file {path}: {e}");
            InMemoryCandidateStore::new()
        }
    }
}
