//! Train-once/serve-many model reuse.
//!
//! The trained model is derived entirely from the job corpus, so the cache
//! keys on a corpus fingerprint: same corpus → shared `Arc<TrainedModel>`,
//! changed corpus → retrain and swap. This replaces the original design's
//! retrain-per-request while keeping "corpus changed ⇒ model rebuilt".

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::errors::AppError;
use crate::models::job::Job;
use crate::recommend::classifier::{train, TrainedModel};

#[derive(Default)]
pub struct ModelCache {
    inner: RwLock<Option<(u64, Arc<TrainedModel>)>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached model when the corpus fingerprint matches,
    /// otherwise trains and caches. Training errors are returned to the
    /// caller untouched (empty corpus stays a training-boundary failure).
    pub fn get_or_train(&self, jobs: &[Job]) -> Result<Arc<TrainedModel>, AppError> {
        let fingerprint = corpus_fingerprint(jobs);

        if let Some((cached_fp, model)) = self.inner.read().expect("model cache poisoned").as_ref()
        {
            if *cached_fp == fingerprint {
                return Ok(Arc::clone(model));
            }
        }

        let model = Arc::new(train(jobs)?);
        *self.inner.write().expect("model cache poisoned") =
            Some((fingerprint, Arc::clone(&model)));
        Ok(model)
    }
}

/// Order-sensitive hash over the fields that feed training. A reordered
/// corpus retrains; harmless, since training is deterministic per input.
fn corpus_fingerprint(jobs: &[Job]) -> u64 {
    let mut hasher = DefaultHasher::new();
    jobs.len().hash(&mut hasher);
    for job in jobs {
        job.title.hash(&mut hasher);
        job.company.hash(&mut hasher);
        job.required_skills.hash(&mut hasher);
        job.experience_required.to_bits().hash(&mut hasher);
        job.description.hash(&mut hasher);
    }
    hasher.finish()
}
