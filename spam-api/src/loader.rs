//! Artifact loading
//!
//! Reads the vectorizer and model documents from disk once at startup.
//! Each document is JSON with a `kind` tag selecting the implementation:
//!
//! ```json
//! {"kind": "tfidf", "vocabulary": {"free": 0, "prize": 1}, "idf": [1.2, 2.3]}
//! {"kind": "multinomial_nb", "classes": ["ham", "spam"],
//!  "class_log_prior": [-0.1, -2.3], "feature_log_prob": [[-1.0, -2.0], [-0.5, -0.9]]}
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{ArtifactConfig, Backend};
use crate::detector::SpamDetector;
use crate::error::ArtifactError;
use crate::model::{
    Classifier, LogisticRegression, MockClassifier, MockVectorizer, MultinomialNb,
    TfidfVectorizer, Vectorizer,
};

/// Vectorizer artifact document
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorizerArtifact {
    Tfidf(TfidfVectorizer),
}

/// Model artifact document
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    MultinomialNb(MultinomialNb),
    LogisticRegression(LogisticRegression),
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_slice(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a vectorizer artifact
pub fn load_vectorizer(path: &Path) -> Result<Arc<dyn Vectorizer>, ArtifactError> {
    match read_artifact::<VectorizerArtifact>(path)? {
        VectorizerArtifact::Tfidf(vectorizer) => {
            vectorizer.validate()?;
            info!(
                "Loaded tfidf vectorizer from {} ({} terms)",
                path.display(),
                vectorizer.vocabulary_size()
            );
            Ok(Arc::new(vectorizer))
        }
    }
}

/// Load and validate a model artifact
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let classifier: Arc<dyn Classifier> = match read_artifact::<ModelArtifact>(path)? {
        ModelArtifact::MultinomialNb(model) => {
            model.validate()?;
            Arc::new(model)
        }
        ModelArtifact::LogisticRegression(model) => {
            model.validate()?;
            Arc::new(model)
        }
    };

    info!(
        "Loaded {} model from {} (classes: {:?})",
        classifier.name(),
        path.display(),
        classifier.classes()
    );

    Ok(classifier)
}

/// Build the detector described by `config`
pub fn load_detector(config: &ArtifactConfig) -> Result<SpamDetector, ArtifactError> {
    let (vectorizer, classifier) = match config.backend {
        Backend::Mock => {
            warn!("Using mock model, predictions are keyword based");
            let vectorizer: Arc<dyn Vectorizer> = Arc::new(MockVectorizer::new());
            let classifier: Arc<dyn Classifier> = Arc::new(MockClassifier::new());
            (vectorizer, classifier)
        }
        Backend::File => (
            load_vectorizer(&config.vectorizer_path)?,
            load_classifier(&config.model_path)?,
        ),
    };

    if vectorizer.dimension() != classifier.n_features() {
        return Err(ArtifactError::Invalid(format!(
            "Vectorizer produces {} features but model expects {}",
            vectorizer.dimension(),
            classifier.n_features()
        )));
    }

    Ok(SpamDetector::new(vectorizer, classifier))
}

/// Load the detector at process start.
///
/// A load failure is fatal when `config.required` is set. Otherwise it is
/// logged and `None` is returned so the server can start without a model.
pub fn load_for_startup(config: &ArtifactConfig) -> Result<Option<SpamDetector>, ArtifactError> {
    info!("Loading model and vectorizer...");

    match load_detector(config) {
        Ok(detector) => {
            info!("Model loaded successfully");
            Ok(Some(detector))
        }
        Err(e) if config.required => {
            error!("Failed to load artifacts: {}", e);
            Err(e)
        }
        Err(e) => {
            error!("Failed to load artifacts: {}", e);
            warn!("Starting without a model, /predict will fail until artifacts are provided");
            Ok(None)
        }
    }
}
