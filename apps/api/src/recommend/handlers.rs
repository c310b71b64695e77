use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::{lenient_f64, Candidate};
use crate::models::recommendation::MatchResult;
use crate::recommend::recommender::{recommend, DEFAULT_TOP_N};
use crate::state::AppState;

/// How many matches the HTTP surface returns per profile.
const RECOMMEND_TOP_N: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CandidateProfile {
    pub full_name: String,
    pub email: String,
    /// Comma-separated skill list.
    pub skills: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub years_of_experience: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
}

impl CandidateProfile {
    fn into_candidate(self) -> Candidate {
        Candidate {
            name: self.full_name,
            email: self.email,
            skills: self.skills,
            bio: self.bio,
            experience: self.years_of_experience,
            location: self.location,
        }
    }
}

/// Wire shape for one ranked job. `match_score` is the 0–100 score divided
/// by 100; `required_skills` is the comma field split into a list.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_title: String,
    pub company_name: String,
    pub job_location: String,
    pub required_skills: Vec<String>,
    pub match_score: f64,
    pub description: String,
    pub experience_required: f64,
}

impl From<&MatchResult> for JobRecommendation {
    fn from(result: &MatchResult) -> Self {
        JobRecommendation {
            job_title: result.job.title.clone(),
            company_name: result.job.company.clone(),
            job_location: result.job.location.clone(),
            required_skills: result
                .job
                .required_skills
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            match_score: result.match_score / 100.0,
            description: result.job.description.clone(),
            experience_required: result.job.experience_required,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<JobRecommendation>,
}

/// POST /recommend
///
/// Ranks the corpus for the submitted profile. The candidate is inserted
/// into the store on first sight; a stored profile with the same email wins
/// over the submitted one. Matches are also published to the notification
/// sink. An empty list is a valid 200 response.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if profile.email.trim().is_empty() || !profile.email.contains('@') {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let jobs = state.corpus.fetch_all().await?;
    let model = state.models.get_or_train(&jobs)?;

    let candidate = match state.candidates.find_by_email(&profile.email).await? {
        Some(stored) => stored,
        None => {
            let fresh = profile.into_candidate();
            state.candidates.insert(fresh.clone()).await?;
            fresh
        }
    };

    let results = recommend(&candidate, &jobs, &model, RECOMMEND_TOP_N, &state.recommender);
    info!(
        email = %candidate.email,
        matches = results.len(),
        "recommendations generated"
    );

    state.notifications.publish(&candidate, &results).await?;

    Ok(Json(RecommendationResponse {
        recommendations: results.iter().map(JobRecommendation::from).collect(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    pub candidates_processed: usize,
    pub candidates_skipped: usize,
    pub notifications_created: usize,
}

/// POST /recommend/sweep
///
/// Runs every stored candidate without an existing "new_candidate"
/// notification batch through one shared trained model. Trains once,
/// predicts many.
pub async fn handle_sweep(
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, AppError> {
    let jobs = state.corpus.fetch_all().await?;
    let model = state.models.get_or_train(&jobs)?;

    let mut processed = 0;
    let mut skipped = 0;
    let mut created = 0;

    for candidate in state.candidates.list_all().await? {
        if state
            .notifications
            .has_new_candidate_notification(&candidate.email)
            .await?
        {
            skipped += 1;
            continue;
        }
        let results = recommend(&candidate, &jobs, &model, DEFAULT_TOP_N, &state.recommender);
        created += state.notifications.publish(&candidate, &results).await?;
        processed += 1;
    }

    info!(processed, skipped, created, "candidate sweep finished");
    Ok(Json(SweepResponse {
        candidates_processed: processed,
        candidates_skipped: skipped,
        notifications_created: created,
    }))
}

#[derive(Debug, Serialize)]
pub struct DebugJobsResponse {
    pub total_jobs: usize,
    pub sample_jobs: Vec<crate::models::job::Job>,
    pub status: String,
}

/// GET /debug/jobs — corpus visibility check.
pub async fn handle_debug_jobs(
    State(state): State<AppState>,
) -> Result<Json<DebugJobsResponse>, AppError> {
    let jobs = state.corpus.fetch_all().await?;
    Ok(Json(DebugJobsResponse {
        total_jobs: jobs.len(),
        sample_jobs: jobs.into_iter().take(3).collect(),
        status: "ok".to_string(),
    }))
}
