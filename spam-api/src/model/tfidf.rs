//! TF-IDF vectorizer artifact

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{FeatureVector, Vectorizer};
use crate::error::{ArtifactError, InferenceError};

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Fitted TF-IDF vectorizer
///
/// Tokens are runs of two or more word characters (letters, digits or
/// `_`); anything outside the fitted vocabulary is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TfidfVectorizer {
    /// Term to column index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    /// Lowercase tokens before the vocabulary lookup
    #[serde(default = "default_lowercase")]
    lowercase: bool,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

impl TfidfVectorizer {
    /// Create a vectorizer with L2 normalization and raw term counts
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self, ArtifactError> {
        let vectorizer = Self {
            vocabulary,
            idf,
            sublinear_tf: false,
            norm: default_norm(),
            lowercase: true,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Check that the vocabulary and IDF table agree
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.vocabulary.is_empty() {
            return Err(ArtifactError::Invalid("Vectorizer vocabulary is empty".to_string()));
        }

        if self.idf.len() != self.vocabulary.len() {
            return Err(ArtifactError::Invalid(format!(
                "Vectorizer has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }

        if let Some((term, index)) = self.vocabulary.iter().find(|(_, i)| **i >= self.idf.len()) {
            return Err(ArtifactError::Invalid(format!(
                "Term '{}' maps to column {} outside of {} columns",
                term,
                index,
                self.idf.len()
            )));
        }

        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid(
                "Vectorizer idf contains non-finite weights".to_string(),
            ));
        }

        Ok(())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn term_counts(&self, text: &str) -> BTreeMap<usize, f64> {
        let mut counts = BTreeMap::new();

        for token in tokenize(text) {
            let index = if self.lowercase {
                self.vocabulary.get(&token.to_lowercase())
            } else {
                self.vocabulary.get(token)
            };

            if let Some(&index) = index {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        counts
    }
}

/// Split text into runs of two or more word characters
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().nth(1).is_some())
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, InferenceError> {
        let mut entries: Vec<(usize, f64)> = self
            .term_counts(text)
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        let length = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };

        if length > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= length;
            }
        }

        Ok(FeatureVector::new(self.idf.len(), entries))
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
