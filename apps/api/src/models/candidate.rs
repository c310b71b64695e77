use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::normalize_skill_list;

/// A candidate profile. `email` is the unique identifier; `skills` keeps the
/// comma-delimited source form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub experience: f64,
    #[serde(default)]
    pub location: String,
}

impl Candidate {
    pub fn skill_set(&self) -> BTreeSet<String> {
        normalize_skill_list(&self.skills)
    }

    /// Query text fed to the classifier: skills followed by bio.
    pub fn query_text(&self) -> String {
        format!("{} {}", self.skills, self.bio).trim().to_string()
    }

    /// True when there is no signal to rank on (no skills, no bio).
    pub fn is_blank(&self) -> bool {
        self.skills.trim().is_empty() && self.bio.trim().is_empty()
    }
}

/// Accepts a number, a numeric string, or nothing; anything malformed or
/// negative collapses to 0 so scoring stays total.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Null,
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Raw::Null => 0.0,
    };
    Ok(if value.is_finite() { value.max(0.0) } else { 0.0 })
}
