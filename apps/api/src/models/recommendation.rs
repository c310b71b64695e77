use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Candidate;
use crate::models::job::Job;

/// One ranked match produced by the recommender. Scores are 0–100 with
/// 2-decimal precision; lists are ordered descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub job: Job,
    pub match_score: f64,
}

/// Notification record handed to the sink, one per recommended job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub required_skills: String,
    pub experience_required: f64,
    pub match_score: f64,
    pub status: String,
    pub notification_type: String,
    pub created_at: DateTime<Utc>,
}

pub const NOTIFICATION_TYPE_NEW_CANDIDATE: &str = "new_candidate";
pub const NOTIFICATION_STATUS_UNREAD: &str = "unread";

impl Notification {
    pub fn for_match(candidate: &Candidate, result: &MatchResult) -> Self {
        Notification {
            id: Uuid::new_v4(),
            user_name: candidate.name.clone(),
            user_email: candidate.email.clone(),
            job_title: result.job.title.clone(),
            company: result.job.company.clone(),
            location: result.job.location.clone(),
            description: result.job.description.clone(),
            required_skills: result.job.required_skills.clone(),
            experience_required: result.job.experience_required,
            match_score: result.match_score,
            status: NOTIFICATION_STATUS_UNREAD.to_string(),
            notification_type: NOTIFICATION_TYPE_NEW_CANDIDATE.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_copies_candidate_and_job_fields() {
        let candidate = Candidate {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            skills: "python".to_string(),
            bio: String::new(),
            experience: 1.0,
            location: "Remote".to_string(),
        };
        let result = MatchResult {
            job: Job {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                required_skills: "python,sql".to_string(),
                experience_required: 2.0,
                description: "Build APIs".to_string(),
            },
            match_score: 82.5,
        };

        let n = Notification::for_match(&candidate, &result);
        assert_eq!(n.user_email, "ada@example.com");
        assert_eq!(n.job_title, "Backend Engineer");
        assert_eq!(n.match_score, 82.5);
        assert_eq!(n.status, NOTIFICATION_STATUS_UNREAD);
        assert_eq!(n.notification_type, NOTIFICATION_TYPE_NEW_CANDIDATE);
    }
}
