//! Multinomial naive Bayes classifier artifact

use serde::{Deserialize, Serialize};

use super::{check_dimension, softmax, Classifier, FeatureVector};
use crate::error::{ArtifactError, InferenceError};

/// Fitted multinomial naive Bayes model
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultinomialNb {
    /// Class labels
    classes: Vec<String>,
    /// Log prior probability per class
    class_log_prior: Vec<f64>,
    /// Log probability of each feature given the class, one row per class
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check that priors and likelihood rows line up with the classes
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.classes.len() < 2 {
            return Err(ArtifactError::Invalid(
                "Naive Bayes model needs at least two classes".to_string(),
            ));
        }

        if self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
        {
            return Err(ArtifactError::Invalid(format!(
                "Naive Bayes model has {} classes, {} priors and {} likelihood rows",
                self.classes.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }

        let width = self.n_features();
        if width == 0 || self.feature_log_prob.iter().any(|row| row.len() != width) {
            return Err(ArtifactError::Invalid(
                "Naive Bayes likelihood rows must be non-empty and equally wide".to_string(),
            ));
        }

        Ok(())
    }

    /// Joint log likelihood of the document under each class
    fn joint_log_likelihood(&self, features: &FeatureVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + features.dot(row))
            .collect()
    }
}

impl Classifier for MultinomialNb {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        check_dimension(features, self.n_features())?;
        Ok(softmax(&self.joint_log_likelihood(features)))
    }

    fn name(&self) -> &str {
        "multinomial_nb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> MultinomialNb {
        MultinomialNb::new(
            vec!["ham".to_string(), "spam".to_string()],
            vec![0.5f64.ln(), 0.5f64.ln()],
            vec![
                vec![0.2f64.ln(), 0.8f64.ln()],
                vec![0.8f64.ln(), 0.2f64.ln()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_predict_proba() {
        let features = FeatureVector::from_dense(&[2.0, 0.0]);
        let probabilities = model().predict_proba(&features).unwrap();

        // 0.8^2 / (0.8^2 + 0.2^2)
        assert!((probabilities[1] - 0.64 / 0.68).abs() < 1e-12);
        assert!((probabilities[0] + probabilities[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_label() {
        let model = model();
        assert_eq!(model.predict(&FeatureVector::from_dense(&[1.0, 0.0])).unwrap(), "spam");
        assert_eq!(model.predict(&FeatureVector::from_dense(&[0.0, 1.0])).unwrap(), "ham");
    }

    #[test]
    fn test_empty_document_uses_priors() {
        let probabilities = model().predict_proba(&FeatureVector::new(2, vec![])).unwrap();
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = model().predict_proba(&FeatureVector::from_dense(&[1.0, 0.0, 0.0]));
        assert!(matches!(
            result,
            Err(InferenceError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = MultinomialNb::new(
            vec!["ham".to_string(), "spam".to_string()],
            vec![0.0, 0.0],
            vec![vec![0.0, 0.0], vec![0.0]],
        );
        assert!(result.is_err());
    }
}
