//! Spam detector: normalize, vectorize, classify

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::InferenceError;
use crate::model::{argmax, Classifier, Vectorizer};
use crate::text::normalize;

/// Classification outcome for one message
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class label
    pub label: String,
    /// Highest class probability, rounded to 4 decimals
    pub confidence: f64,
}

/// Read-only pair of loaded artifacts
#[derive(Clone)]
pub struct SpamDetector {
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
}

impl SpamDetector {
    pub fn new(vectorizer: Arc<dyn Vectorizer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Classify a raw message
    pub fn classify(&self, message: &str) -> Result<Prediction, InferenceError> {
        let cleaned = normalize(message);
        let features = self.vectorizer.transform(&cleaned)?;

        let probabilities = self.classifier.predict_proba(&features)?;
        let best = argmax(&probabilities).ok_or(InferenceError::EmptyProbabilities)?;
        let confidence = probabilities[best];
        let label = self.classifier.classes().get(best).cloned().ok_or_else(|| {
            InferenceError::Model(format!("No label for class index {}", best))
        })?;

        if !confidence.is_finite() {
            return Err(InferenceError::NonFinite);
        }

        let confidence = round4(confidence.clamp(0.0, 1.0));
        debug!("Classified message as {} ({})", label, confidence);

        Ok(Prediction { label, confidence })
    }
}

impl fmt::Debug for SpamDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpamDetector")
            .field("vectorizer", &self.vectorizer.name())
            .field("classifier", &self.classifier.name())
            .field("classes", &self.classifier.classes())
            .finish()
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureVector, MockClassifier, MockVectorizer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn mock_detector() -> SpamDetector {
        SpamDetector::new(Arc::new(MockVectorizer::new()), Arc::new(MockClassifier::new()))
    }

    struct ConstantClassifier {
        classes: Vec<String>,
        probabilities: Vec<f64>,
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for ConstantClassifier {
        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn n_features(&self) -> usize {
            1
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.probabilities.clone())
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    fn counting_detector(probabilities: Vec<f64>) -> (SpamDetector, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = ConstantClassifier {
            classes: vec!["ham".to_string(), "spam".to_string()],
            probabilities,
            calls: calls.clone(),
        };
        let detector = SpamDetector::new(Arc::new(MockVectorizer::new()), Arc::new(classifier));
        (detector, calls)
    }

    fn constant_detector(probabilities: Vec<f64>) -> SpamDetector {
        counting_detector(probabilities).0
    }

    #[test]
    fn test_classify_normalizes_before_vectorizing() {
        // Keywords only match once punctuation and case are stripped
        let prediction = mock_detector()
            .classify("CONGRATULATIONS!!! You WON a FREE prize!")
            .unwrap();

        assert_eq!(prediction.label, "spam");
        assert_eq!(prediction.confidence, 0.8);
    }

    #[test]
    fn test_classify_rounds_confidence() {
        let prediction = constant_detector(vec![0.123_456, 0.876_544])
            .classify("anything")
            .unwrap();

        assert_eq!(prediction.label, "spam");
        assert_eq!(prediction.confidence, 0.8765);
    }

    #[test]
    fn test_classify_scores_once_per_message() {
        let (detector, calls) = counting_detector(vec![0.3, 0.7]);

        let prediction = detector.classify("anything").unwrap();
        assert_eq!(prediction.label, "spam");
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_classify_rejects_nan() {
        let result = constant_detector(vec![f64::NAN, f64::NAN]).classify("anything");
        assert!(matches!(result, Err(InferenceError::NonFinite)));
    }

    #[test]
    fn test_classify_rejects_empty_probabilities() {
        let result = constant_detector(vec![]).classify("anything");
        assert!(matches!(result, Err(InferenceError::EmptyProbabilities)));
    }

    #[test]
    fn test_classify_propagates_model_errors() {
        let detector = SpamDetector::new(
            Arc::new(MockVectorizer::new()),
            Arc::new(MockClassifier::failing("model exploded")),
        );

        let err = detector.classify("free prize").unwrap_err();
        assert_eq!(err.to_string(), "model exploded");
    }
}
