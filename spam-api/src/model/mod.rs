//! Model capability abstraction
//!
//! The service treats the vectorizer and the classifier as opaque
//! capabilities. Concrete artifacts live in the submodules; the loader picks
//! one based on the `kind` tag of the artifact file.

use crate::error::InferenceError;

pub mod logistic;
pub mod mock;
pub mod naive_bayes;
pub mod tfidf;

pub use logistic::LogisticRegression;
pub use mock::{MockClassifier, MockVectorizer};
pub use naive_bayes::MultinomialNb;
pub use tfidf::{Norm, TfidfVectorizer};

/// Sparse numeric representation of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    /// Number of columns (vocabulary size)
    dimension: usize,
    /// Non-zero `(column, weight)` pairs, sorted by column
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create a feature vector from non-zero entries
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        Self { dimension, entries }
    }

    /// Create a dense vector (zero weights are dropped)
    pub fn from_dense(values: &[f64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect();
        Self {
            dimension: values.len(),
            entries,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// True when the document contains no known feature
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense weight row
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(i, v)| weights.get(*i).map(|w| w * v))
            .sum()
    }
}

/// Converts normalized text into a feature vector
pub trait Vectorizer: Send + Sync {
    /// Vectorize a single document
    fn transform(&self, text: &str) -> Result<FeatureVector, InferenceError>;

    /// Number of columns produced by `transform`
    fn dimension(&self) -> usize;

    /// Short human-readable name for logs
    fn name(&self) -> &str;
}

/// Classifier producing a label and per-class probabilities
pub trait Classifier: Send + Sync {
    /// Class labels, in the order used by `predict_proba`
    fn classes(&self) -> &[String];

    /// Number of input features the model was trained on
    fn n_features(&self) -> usize;

    /// Probability of each class in `classes()` order
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError>;

    /// Most likely class label
    fn predict(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let probabilities = self.predict_proba(features)?;
        let best = argmax(&probabilities).ok_or(InferenceError::EmptyProbabilities)?;
        self.classes()
            .get(best)
            .cloned()
            .ok_or_else(|| InferenceError::Model(format!("No label for class index {}", best)))
    }

    /// Short human-readable name for logs
    fn name(&self) -> &str;
}

/// Reject vectors whose width differs from what the model expects
pub(crate) fn check_dimension(
    features: &FeatureVector,
    expected: usize,
) -> Result<(), InferenceError> {
    if features.dimension() != expected {
        return Err(InferenceError::DimensionMismatch {
            expected,
            actual: features.dimension(),
        });
    }
    Ok(())
}

/// Index of the largest value, first one on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Numerically stable softmax over log-space scores
pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
