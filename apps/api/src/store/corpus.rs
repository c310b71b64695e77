//! JSON-file corpus provider: a flat array of job records, the same shape
//! the one-time import script loads from `data/jobs.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::store::JobCorpusProvider;

pub struct JsonFileCorpus {
    path: PathBuf,
}

impl JsonFileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobCorpusProvider for JsonFileCorpus {
    async fn fetch_all(&self) -> Result<Vec<Job>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Data(format!("cannot read {}: {e}", self.path.display())))?;
        let jobs: Vec<Job> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Data(format!("invalid job corpus file: {e}")))?;
        info!(jobs = jobs.len(), path = %self.path.display(), "job corpus loaded");
        Ok(jobs)
    }
}
