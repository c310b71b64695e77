use std::sync::Arc;

use crate::config::Config;
use crate::recommend::model_cache::ModelCache;
use crate::recommend::recommender::RecommenderConfig;
use crate::store::{CandidateStore, JobCorpusProvider, NotificationSink};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Corpus snapshot source. Default: `JsonFileCorpus` over `JOBS_PATH`.
    pub corpus: Arc<dyn JobCorpusProvider>,
    pub candidates: Arc<dyn CandidateStore>,
    pub notifications: Arc<dyn NotificationSink>,
    /// Train-once/serve-many model reuse, keyed by corpus fingerprint.
    pub models: Arc<ModelCache>,
    pub recommender: Arc<RecommenderConfig>,
    pub config: Config,
}
