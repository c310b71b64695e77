use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::normalize_skill_list;

/// A job posting as stored in the corpus file. `required_skills` keeps the
/// comma-delimited source form; use `skill_set()` for comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required_skills: String,
    #[serde(default, deserialize_with = "super::candidate::lenient_f64")]
    pub experience_required: f64,
    #[serde(default)]
    pub description: String,
}

impl Job {
    /// Normalized requirement set derived from the comma-delimited field.
    pub fn skill_set(&self) -> BTreeSet<String> {
        normalize_skill_list(&self.required_skills)
    }

    /// Dedup key for recommendation lists: distinct postings are identified
    /// by the (title, company) pair.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.title, &self.company)
    }

    /// Training document text: skills, experience (as text), description.
    pub fn document_text(&self) -> String {
        format!(
            "{} {} {}",
            self.required_skills, self.experience_required, self.description
        )
        .trim()
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            required_skills: "Python, SQL".to_string(),
            experience_required: 2.0,
            description: "Build APIs".to_string(),
        }
    }

    #[test]
    fn test_skill_set_normalizes() {
        let set = job().skill_set();
        assert!(set.contains("python"));
        assert!(set.contains("sql"));
    }

    #[test]
    fn test_document_text_concatenates_fields() {
        assert_eq!(job().document_text(), "Python, SQL 2 Build APIs");
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let j: Job = serde_json::from_str(r#"{"title": "Analyst"}"#).unwrap();
        assert_eq!(j.experience_required, 0.0);
        assert!(j.required_skills.is_empty());
    }

    #[test]
    fn test_experience_accepts_string_number() {
        let j: Job =
            serde_json::from_str(r#"{"title": "Analyst", "experience_required": "3"}"#).unwrap();
        assert_eq!(j.experience_required, 3.0);
    }

    #[test]
    fn test_malformed_experience_defaults_to_zero() {
        let j: Job =
            serde_json::from_str(r#"{"title": "Analyst", "experience_required": "lots"}"#).unwrap();
        assert_eq!(j.experience_required, 0.0);
    }
}
