//! Job-title classifier: TF-IDF features over job postings feeding a
//! multinomial Naive Bayes model. Labels are job titles, so distinct
//! postings sharing a title collapse into one class — that loss is part of
//! the contract, not something to repair here.
//!
//! Training is deterministic for identical input: the vocabulary cap breaks
//! ties lexically and classes are encoded in sorted order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::job::Job;
use crate::recommend::text::tokenize;

/// Vocabulary cap, by document frequency.
pub const MAX_FEATURES: usize = 500;

/// Laplace smoothing for the Naive Bayes feature counts.
const NB_ALPHA: f64 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// TF-IDF vectorizer
// ────────────────────────────────────────────────────────────────────────────

/// Fitted TF-IDF vocabulary with smoothed idf weights. Columns are assigned
/// in lexical term order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fits vocabulary and idf weights over tokenized documents. Terms are
    /// ranked by document frequency (ties lexical) before the cap applies.
    fn fit(documents: &[Vec<String>]) -> Self {
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // BTreeMap iteration is lexical, and the sort is stable, so equal
        // frequencies keep lexical order.
        let mut ranked: Vec<(&str, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MAX_FEATURES);

        let mut kept: Vec<(&str, usize)> = ranked;
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (column, (term, df)) in kept.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }
        TfidfVectorizer { vocabulary, idf }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Maps tokens to an L2-normalized tf-idf row. Unknown terms are ignored.
    fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token.as_str()) {
                row[column] += 1.0;
            }
        }
        for (column, value) in row.iter_mut().enumerate() {
            *value *= self.idf[column];
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        row
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Label encoding
// ────────────────────────────────────────────────────────────────────────────

/// Explicit label ↔ id map over job titles, encoded in sorted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    fn fit(labels: &[&str]) -> Self {
        let mut classes: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        classes.sort_unstable();
        classes.dedup();
        LabelEncoder { classes }
    }

    fn encode(&self, label: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
    }

    pub fn decode(&self, id: usize) -> &str {
        &self.classes[id]
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Multinomial Naive Bayes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MultinomialNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>, // [class][feature]
}

impl MultinomialNb {
    fn fit(rows: &[Vec<f64>], classes: &[usize], n_classes: usize, n_features: usize) -> Self {
        let mut class_count = vec![0.0_f64; n_classes];
        let mut feature_count = vec![vec![0.0_f64; n_features]; n_classes];
        for (row, &class) in rows.iter().zip(classes) {
            class_count[class] += 1.0;
            for (feature, value) in feature_count[class].iter_mut().zip(row) {
                *feature += value;
            }
        }

        let total = rows.len() as f64;
        let class_log_prior = class_count.iter().map(|c| (c / total).ln()).collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let class_total: f64 = counts.iter().sum();
                let denom = class_total + NB_ALPHA * n_features as f64;
                counts
                    .iter()
                    .map(|c| ((c + NB_ALPHA) / denom).ln())
                    .collect()
            })
            .collect();

        MultinomialNb {
            class_log_prior,
            feature_log_prob,
        }
    }

    /// Posterior probabilities per class via log-sum-exp normalization.
    fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + row
                        .iter()
                        .zip(log_probs)
                        .map(|(value, log_prob)| value * log_prob)
                        .sum::<f64>()
            })
            .collect();

        let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trained model + train/predict entry points
// ────────────────────────────────────────────────────────────────────────────

/// Immutable training artifact. Safe to share across concurrent
/// recommendation calls behind an `Arc` — nothing here mutates after fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub vectorizer: TfidfVectorizer,
    pub labels: LabelEncoder,
    nb: MultinomialNb,
}

/// Fits the TF-IDF + Naive Bayes pipeline over the job corpus. Jobs whose
/// concatenated text is blank are skipped, mirroring the source corpus rules.
pub fn train(jobs: &[Job]) -> Result<TrainedModel, AppError> {
    if jobs.is_empty() {
        return Err(AppError::Data("no training data".to_string()));
    }

    let mut documents = Vec::new();
    let mut labels: Vec<&str> = Vec::new();
    for job in jobs {
        let text = job.document_text();
        if text.is_empty() {
            continue;
        }
        documents.push(tokenize(&text));
        labels.push(&job.title);
    }

    if documents.is_empty() {
        return Err(AppError::ModelNotReady(
            "job corpus produced no usable documents".to_string(),
        ));
    }

    let vectorizer = TfidfVectorizer::fit(&documents);
    if vectorizer.vocabulary_len() == 0 {
        return Err(AppError::ModelNotReady("empty vocabulary".to_string()));
    }

    let encoder = LabelEncoder::fit(&labels);
    let rows: Vec<Vec<f64>> = documents.iter().map(|d| vectorizer.transform(d)).collect();
    let classes: Vec<usize> = labels
        .iter()
        .map(|l| encoder.encode(l).unwrap_or_default())
        .collect();
    let nb = MultinomialNb::fit(&rows, &classes, encoder.len(), vectorizer.vocabulary_len());

    info!(
        jobs = jobs.len(),
        classes = encoder.len(),
        vocabulary = vectorizer.vocabulary_len(),
        "classifier trained"
    );

    Ok(TrainedModel {
        vectorizer,
        labels: encoder,
        nb,
    })
}

/// Ranks all known job titles by posterior probability for a free-text
/// query. Probabilities are non-increasing; equal probabilities keep
/// lexical label order.
pub fn predict(text: &str, model: &TrainedModel) -> Result<Vec<(String, f64)>, AppError> {
    if model.vectorizer.vocabulary_len() == 0 || model.labels.len() == 0 {
        return Err(AppError::ModelNotReady("empty vocabulary".to_string()));
    }

    let row = model.vectorizer.transform(&tokenize(text));
    let proba = model.nb.predict_proba(&row);

    let mut ranked: Vec<(String, f64)> = proba
        .into_iter()
        .enumerate()
        .map(|(id, p)| (model.labels.decode(id).to_string(), p))
        .collect();
    // stable sort: equal probabilities keep encoded (lexical) order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    Ok(ranked)
}
