//! Deterministic 0–100 compatibility score between one candidate and one
//! job. Pure and total: missing fields contribute zero instead of erroring.

use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;
use crate::models::job::Job;

/// Term weights for the compatibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    /// Partial credit granted to under-qualified candidates, applied to the
    /// experience ratio. Half the full experience weight: even a ratio near
    /// 1 caps out at 15/30.
    pub experience_partial: f64,
    pub location: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 50.0,
            experience: 30.0,
            experience_partial: 15.0,
            location: 20.0,
        }
    }
}

/// Computes the weighted compatibility score, rounded to 2 decimals.
///
/// 1. Skill term: |candidate ∩ required| / |required| × 50 when both sets
///    are non-empty. The ratio is against the job's requirement set only;
///    extra candidate skills neither help nor hurt.
/// 2. Experience term: +30 when candidate experience covers the
///    requirement, else ratio × 15 with a max(required, 1) denominator.
/// 3. Location term: +20 on exact case-insensitive trimmed equality.
pub fn match_score(candidate: &Candidate, job: &Job, weights: &ScoreWeights) -> f64 {
    let mut score = 0.0;

    let candidate_skills = candidate.skill_set();
    let required = job.skill_set();
    if !candidate_skills.is_empty() && !required.is_empty() {
        let common = candidate_skills.intersection(&required).count();
        score += common as f64 / required.len() as f64 * weights.skills;
    }

    if candidate.experience >= job.experience_required {
        score += weights.experience;
    } else {
        let denom = job.experience_required.max(1.0);
        score += candidate.experience / denom * weights.experience_partial;
    }

    if candidate.location.trim().to_lowercase() == job.location.trim().to_lowercase() {
        score += weights.location;
    }

    round_score(score)
}

/// Rounds to 2 decimals, half away from zero (`f64::round` semantics).
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(skills: &str, experience: f64, location: &str) -> Candidate {
        Candidate {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            skills: skills.to_string(),
            bio: "backend dev".to_string(),
            experience,
            location: location.to_string(),
        }
    }

    fn backend_job() -> Job {
        Job {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            required_skills: "python,sql".to_string(),
            experience_required: 2.0,
            description: "backend role".to_string(),
        }
    }

    #[test]
    fn test_full_match_is_100() {
        let c = candidate("python,sql,docker", 3.0, "Remote");
        assert_eq!(match_score(&c, &backend_job(), &ScoreWeights::default()), 100.0);
    }

    #[test]
    fn test_boundary_example_scores_50() {
        // same skills, zero experience, wrong city: 50 + 0 + 0
        let c = candidate("python,sql,docker", 0.0, "NYC");
        assert_eq!(match_score(&c, &backend_job(), &ScoreWeights::default()), 50.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let weights = ScoreWeights::default();
        let cases = [
            candidate("", 0.0, ""),
            candidate("python", 100.0, "Remote"),
            candidate("python,sql,go,rust,java", 1.0, "remote "),
        ];
        for c in &cases {
            let s = match_score(c, &backend_job(), &weights);
            assert!((0.0..=100.0).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn test_extra_skills_are_neutral() {
        let weights = ScoreWeights::default();
        let lean = candidate("python,sql", 3.0, "Remote");
        let loaded = candidate("python,sql,go,rust,haskell", 3.0, "Remote");
        assert_eq!(
            match_score(&lean, &backend_job(), &weights),
            match_score(&loaded, &backend_job(), &weights)
        );
    }

    #[test]
    fn test_score_monotone_in_skill_overlap() {
        let weights = ScoreWeights::default();
        let none = candidate("go", 3.0, "Remote");
        let half = candidate("python", 3.0, "Remote");
        let full = candidate("python,sql", 3.0, "Remote");
        let s0 = match_score(&none, &backend_job(), &weights);
        let s1 = match_score(&half, &backend_job(), &weights);
        let s2 = match_score(&full, &backend_job(), &weights);
        assert!(s0 < s1 && s1 < s2);
    }

    #[test]
    fn test_underqualified_partial_credit_caps_at_half() {
        let weights = ScoreWeights::default();
        let job = Job {
            experience_required: 10.0,
            ..backend_job()
        };
        // ratio 0.9 → 13.5, nowhere near the 30 full credit
        let c = candidate("", 9.0, "nowhere");
        assert_eq!(match_score(&c, &job, &weights), 13.5);
    }

    #[test]
    fn test_zero_requirement_denominator_is_clamped() {
        let weights = ScoreWeights::default();
        let job = Job {
            experience_required: 0.0,
            ..backend_job()
        };
        // candidate.experience >= 0 always holds, so this is full credit;
        // the clamp matters for requirements between 0 and 1
        let c = candidate("", 0.0, "nowhere");
        assert_eq!(match_score(&c, &job, &weights), 30.0);

        let fractional = Job {
            experience_required: 0.5,
            ..backend_job()
        };
        let under = candidate("", 0.25, "nowhere");
        // 0.25 / max(0.5, 1) * 15 = 3.75
        assert_eq!(match_score(&under, &fractional, &weights), 3.75);
    }

    #[test]
    fn test_location_match_is_case_and_space_insensitive() {
        let weights = ScoreWeights::default();
        let c = candidate("", 3.0, "  remote ");
        assert_eq!(match_score(&c, &backend_job(), &weights), 50.0); // 30 + 20
    }

    #[test]
    fn test_missing_fields_contribute_zero() {
        let weights = ScoreWeights::default();
        let empty_job = Job {
            title: "Ghost".to_string(),
            company: String::new(),
            location: String::new(),
            required_skills: String::new(),
            experience_required: 0.0,
            description: String::new(),
        };
        let c = candidate("", 0.0, "");
        // skill term 0 (both sets empty), experience full credit,
        // location "" == "" matches
        assert_eq!(match_score(&c, &empty_job, &weights), 50.0);
    }

    #[test]
    fn test_rounding_is_two_decimals() {
        assert_eq!(round_score(200.0 / 3.0), 66.67);
        assert_eq!(round_score(100.0 / 3.0), 33.33);
        let weights = ScoreWeights::default();
        let job = Job {
            required_skills: "a1,b2,c3".to_string(),
            ..backend_job()
        };
        let c = candidate("a1", 3.0, "Remote");
        // 1/3*50 + 30 + 20 = 66.666... → 66.67
        assert_eq!(match_score(&c, &job, &weights), 66.67);
    }
}
