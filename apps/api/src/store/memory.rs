//! In-memory collaborator implementations. These back the default service
//! wiring and double as test fixtures.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::recommendation::{
    MatchResult, Notification, NOTIFICATION_TYPE_NEW_CANDIDATE,
};
use crate::store::{CandidateStore, NotificationSink};

/// Candidate map keyed by email. Insertion order is kept so `list_all`
/// iterates candidates the way they arrived.
#[derive(Default)]
pub struct InMemoryCandidateStore {
    inner: RwLock<Vec<Candidate>>,
}

impl InMemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            inner: RwLock::new(candidates),
        }
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Candidate>, AppError> {
        let guard = self.inner.read().expect("candidate store poisoned");
        Ok(guard.iter().find(|c| c.email == email).cloned())
    }

    async fn insert(&self, candidate: Candidate) -> Result<(), AppError> {
        let mut guard = self.inner.write().expect("candidate store poisoned");
        if guard.iter().any(|c| c.email == candidate.email) {
            return Err(AppError::Validation(format!(
                "candidate '{}' already exists",
                candidate.email
            )));
        }
        guard.push(candidate);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Candidate>, AppError> {
        Ok(self.inner.read().expect("candidate store poisoned").clone())
    }
}

/// Notification sink writing to an in-memory log, grouped by recipient
/// email for the new-candidate dedup check.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    inner: RwLock<HashMap<String, Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications_for(&self, email: &str) -> Vec<Notification> {
        self.inner
            .read()
            .expect("notification sink poisoned")
            .get(email)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn publish(
        &self,
        candidate: &Candidate,
        results: &[MatchResult],
    ) -> Result<usize, AppError> {
        if results.is_empty() {
            return Ok(0);
        }
        let records: Vec<Notification> = results
            .iter()
            .map(|r| Notification::for_match(candidate, r))
            .collect();
        let count = records.len();
        self.inner
            .write()
            .expect("notification sink poisoned")
            .entry(candidate.email.clone())
            .or_default()
            .extend(records);
        Ok(count)
    }

    async fn has_new_candidate_notification(&self, email: &str) -> Result<bool, AppError> {
        let guard = self.inner.read().expect("notification sink poisoned");
        Ok(guard.get(email).is_some_and(|list| {
            list.iter()
                .any(|n| n.notification_type == NOTIFICATION_TYPE_NEW_CANDIDATE)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Job;

    fn candidate(email: &str) -> Candidate {
        Candidate {
            name: "Ada".to_string(),
            email: email.to_string(),
            skills: "python".to_string(),
            bio: String::new(),
            experience: 2.0,
            location: "Remote".to_string(),
        }
    }

    fn one_match() -> Vec<MatchResult> {
        vec![MatchResult {
            job: Job {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                required_skills: "python,sql".to_string(),
                experience_required: 2.0,
                description: String::new(),
            },
            match_score: 80.0,
        }]
    }

    #[tokio::test]
    async fn test_find_by_email_roundtrip() {
        let store = InMemoryCandidateStore::new();
        store.insert(candidate("ada@example.com")).await.unwrap();
        let found = store.find_by_email("ada@example.com").await.unwrap();
        assert!(found.is_some());
        assert!(store.find_by_email("none@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = InMemoryCandidateStore::new();
        store.insert(candidate("ada@example.com")).await.unwrap();
        let err = store.insert(candidate("ada@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_publish_counts_and_flags_new_candidate() {
        let sink = InMemoryNotificationSink::new();
        let c = candidate("ada@example.com");
        assert!(!sink
            .has_new_candidate_notification("ada@example.com")
            .await
            .unwrap());

        let written = sink.publish(&c, &one_match()).await.unwrap();
        assert_eq!(written, 1);
        assert!(sink
            .has_new_candidate_notification("ada@example.com")
            .await
            .unwrap());
        assert_eq!(sink.notifications_for("ada@example.com").len(), 1);
    }

    #[tokio::test]
    async fn test_publish_empty_results_writes_nothing() {
        let sink = InMemoryNotificationSink::new();
        let written = sink.publish(&candidate("ada@example.com"), &[]).await.unwrap();
        assert_eq!(written, 0);
        assert!(!sink
            .has_new_candidate_notification("ada@example.com")
            .await
            .unwrap());
    }
}
