//! spam-api: HTTP API for a pre-trained spam classifier
//!
//! Loads a fitted text vectorizer and classifier at startup and serves
//! predictions over JSON.
//!
//! # Features
//!
//! - `POST /predict` classifies a message as spam or ham with a confidence
//! - TF-IDF vectorizer, multinomial naive Bayes and logistic regression artifacts
//! - Keyword mock backend for running without trained artifacts
//! - Permissive CORS for browser and mobile front ends
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! listen_addr = "0.0.0.0:5000"
//! debug = true
//!
//! [artifacts]
//! model_path = "model.json"
//! vectorizer_path = "vectorizer.json"
//! required = false
//! ```
//!
//! # Modules
//!
//! - [`api`]: routes and handlers
//! - [`config`]: configuration management
//! - [`detector`]: normalize, vectorize, classify
//! - [`loader`]: artifact loading
//! - [`model`]: vectorizer and classifier capabilities
//! - [`text`]: text normalization

pub mod api;
pub mod config;
pub mod detector;
pub mod error;
pub mod loader;
pub mod model;
pub mod text;

pub use config::Config;
pub use detector::{Prediction, SpamDetector};
pub use error::{Result, SpamApiError};
