//! Mock model for testing
//!
//! Scores messages by counting well-known spam keywords, so the service can
//! run and be tested without trained artifacts.

use super::{check_dimension, Classifier, FeatureVector, Vectorizer};
use crate::error::InferenceError;
use tracing::debug;

const SPAM_KEYWORDS: &[&str] = &[
    "free",
    "win",
    "won",
    "winner",
    "prize",
    "congratulations",
    "claim",
    "urgent",
    "cash",
    "offer",
    "txt",
];

/// Mock vectorizer producing a single "spam keyword count" feature
pub struct MockVectorizer {
    name: String,
}

impl MockVectorizer {
    pub fn new() -> Self {
        Self {
            name: "mock-vectorizer".to_string(),
        }
    }
}

impl Default for MockVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Vectorizer for MockVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector, InferenceError> {
        let hits = text
            .split_whitespace()
            .filter(|word| SPAM_KEYWORDS.contains(word))
            .count();

        debug!("MockVectorizer: {} spam keywords", hits);
        Ok(FeatureVector::from_dense(&[hits as f64]))
    }

    fn dimension(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Mock classifier: `P(spam) = hits / (hits + 1)`
pub struct MockClassifier {
    classes: Vec<String>,
    failure: Option<String>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            classes: vec!["ham".to_string(), "spam".to_string()],
            failure: None,
        }
    }

    /// Classifier whose every prediction fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MockClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        1
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        if let Some(ref message) = self.failure {
            return Err(InferenceError::Model(message.clone()));
        }

        check_dimension(features, 1)?;
        let hits = features.dot(&[1.0]);
        let spam = hits / (hits + 1.0);

        Ok(vec![1.0 - spam, spam])
    }

    fn name(&self) -> &str {
        "mock-classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_spam_message() {
        let vectorizer = MockVectorizer::new();
        let classifier = MockClassifier::new();

        let features = vectorizer
            .transform("congratulations you won a free prize")
            .unwrap();
        assert_eq!(features.entries(), &[(0, 4.0)]);

        let probabilities = classifier.predict_proba(&features).unwrap();
        assert!((probabilities[1] - 0.8).abs() < 1e-12);
        assert_eq!(classifier.predict(&features).unwrap(), "spam");
    }

    #[test]
    fn test_mock_ham_message() {
        let vectorizer = MockVectorizer::new();
        let classifier = MockClassifier::new();

        let features = vectorizer.transform("see you at lunch tomorrow").unwrap();
        assert_eq!(classifier.predict_proba(&features).unwrap(), vec![1.0, 0.0]);
        assert_eq!(classifier.predict(&features).unwrap(), "ham");
    }

    #[test]
    fn test_mock_failing_classifier() {
        let classifier = MockClassifier::failing("boom");
        let result = classifier.predict(&FeatureVector::from_dense(&[1.0]));
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }
}
