//! External collaborator contracts. The ranking core only ever sees these
//! traits; transports and storage engines stay behind them.
//!
//! Carried in `AppState` as `Arc<dyn …>`, swapped at startup.

pub mod corpus;
pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::recommendation::MatchResult;

/// Supplies a consistent snapshot of the job corpus. An empty snapshot is a
/// valid response; training is where emptiness becomes an error.
#[async_trait]
pub trait JobCorpusProvider: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Job>, AppError>;
}

/// Candidate lookup and insertion, keyed by email.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, AppError>;
    async fn insert(&self, candidate: Candidate) -> Result<(), AppError>;
    async fn list_all(&self) -> Result<Vec<Candidate>, AppError>;
}

/// Receives ranked matches as notification records. The "one new_candidate
/// batch per email" idempotency rule lives with the caller; the sink only
/// has to answer whether such a batch already exists.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publishes one notification per match and returns the count written.
    async fn publish(
        &self,
        candidate: &Candidate,
        results: &[MatchResult],
    ) -> Result<usize, AppError>;

    async fn has_new_candidate_notification(&self, email: &str) -> Result<bool, AppError>;
}
