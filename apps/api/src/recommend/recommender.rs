//! Two-phase recommendation pipeline.
//!
//! Phase 1 narrows the corpus to jobs whose titles the classifier considers
//! plausible for the candidate and keeps those scoring above a low bar.
//! Phase 2 backfills by scanning every job whenever phase 1 comes up short,
//! including when the classifier fails outright. The deterministic match
//! score is the ranking currency throughout; the classifier only shapes the
//! shortlist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::recommendation::MatchResult;
use crate::recommend::classifier::{predict, TrainedModel};
use crate::recommend::scoring::{match_score, ScoreWeights};

pub const DEFAULT_TOP_N: usize = 5;

/// Pipeline constants. Values carry over from the original product tuning;
/// they are configuration, not derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Grace window in years: jobs requiring more than
    /// candidate.experience + window are disqualified outright.
    pub experience_window: f64,
    /// Minimum score for a shortlisted (phase 1) job.
    pub phase1_min_score: f64,
    /// Minimum score for a fallback (phase 2) job.
    pub phase2_min_score: f64,
    /// Shortlist over-fetch factor: top `factor × top_n` predicted labels.
    /// Compensates for title-collision label collapse.
    pub shortlist_factor: usize,
    pub weights: ScoreWeights,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            experience_window: 3.0,
            phase1_min_score: 10.0,
            phase2_min_score: 5.0,
            shortlist_factor: 3,
            weights: ScoreWeights::default(),
        }
    }
}

/// Ranks `jobs` for `candidate` and returns at most `top_n` results,
/// descending by score, deduplicated on (title, company).
///
/// Never fails once a model exists: classifier errors degrade to an empty
/// shortlist and phase 2 takes over. An empty result is a valid outcome,
/// not an error.
pub fn recommend(
    candidate: &Candidate,
    jobs: &[Job],
    model: &TrainedModel,
    top_n: usize,
    config: &RecommenderConfig,
) -> Vec<MatchResult> {
    // No skills and no bio means nothing to rank on.
    if candidate.is_blank() || jobs.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    // Phase 1: classification-assisted shortlist. Failure here is recovered,
    // never propagated — phase 2 exists for exactly that case.
    match predict(&candidate.query_text(), model) {
        Ok(ranked) => {
            let shortlist: HashSet<&str> = ranked
                .iter()
                .take(config.shortlist_factor * top_n)
                .map(|(label, _)| label.as_str())
                .collect();

            for job in jobs {
                if outside_experience_window(candidate, job, config) {
                    continue;
                }
                if !shortlist.contains(job.title.as_str()) {
                    continue;
                }
                let score = match_score(candidate, job, &config.weights);
                if score > config.phase1_min_score && mark_seen(&mut seen, job) {
                    results.push(MatchResult {
                        job: job.clone(),
                        match_score: score,
                    });
                }
            }
        }
        Err(e) => {
            warn!("classifier unavailable, falling back to exhaustive scoring: {e}");
        }
    }

    // Phase 2: exhaustive backfill with a lower score bar.
    if results.len() < top_n {
        for job in jobs {
            if outside_experience_window(candidate, job, config) {
                continue;
            }
            if seen.contains(&(job.title.clone(), job.company.clone())) {
                continue;
            }
            let score = match_score(candidate, job, &config.weights);
            if score > config.phase2_min_score && mark_seen(&mut seen, job) {
                results.push(MatchResult {
                    job: job.clone(),
                    match_score: score,
                });
            }
        }
    }

    // Stable sort: ties keep phase-1-before-phase-2, then original job order.
    results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(top_n);
    results
}

fn outside_experience_window(candidate: &Candidate, job: &Job, config: &RecommenderConfig) -> bool {
    job.experience_required > candidate.experience + config.experience_window
}

fn mark_seen(seen: &mut HashSet<(String, String)>, job: &Job) -> bool {
    seen.insert((job.title.clone(), job.company.clone()))
}
