//! Logistic regression classifier artifact

use serde::{Deserialize, Serialize};

use super::{check_dimension, sigmoid, softmax, Classifier, FeatureVector};
use crate::error::{ArtifactError, InferenceError};

/// Fitted linear model with a logistic link
///
/// Binary models carry a single weight row scoring `classes[1]`;
/// multiclass models carry one row per class.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogisticRegression {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(
        classes: Vec<String>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let rows = match self.classes.len() {
            0 | 1 => {
                return Err(ArtifactError::Invalid(
                    "Logistic regression needs at least two classes".to_string(),
                ))
            }
            2 => 1,
            n => n,
        };

        if self.coef.len() != rows || self.intercept.len() != rows {
            return Err(ArtifactError::Invalid(format!(
                "Logistic regression with {} classes needs {} rows and intercepts, got {} and {}",
                self.classes.len(),
                rows,
                self.coef.len(),
                self.intercept.len()
            )));
        }

        let width = self.n_features();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(ArtifactError::Invalid(
                "Logistic regression weight rows must be non-empty and equally wide".to_string(),
            ));
        }

        Ok(())
    }

    fn decision_function(&self, features: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot(row) + bias)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        check_dimension(features, self.n_features())?;
        let scores = self.decision_function(features);

        if let [score] = scores.as_slice() {
            let positive = sigmoid(*score);
            return Ok(vec![1.0 - positive, positive]);
        }

        Ok(softmax(&scores))
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
