//! Configuration for spam-api

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpamApiError};

/// Main service configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Model and vectorizer locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:5000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Verbose logging
    #[serde(default = "default_debug")]
    pub debug: bool,
    /// Return raw inference errors to callers (defaults to `debug`)
    #[serde(default)]
    pub expose_errors: Option<bool>,
}

/// Where the model and vectorizer come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON artifact files on disk
    File,
    /// Built-in keyword mock
    Mock,
}

/// Artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
    /// Abort startup when the artifacts cannot be loaded
    #[serde(default)]
    pub required: bool,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_debug() -> bool {
    true
}

fn default_backend() -> Backend {
    Backend::File
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("vectorizer.json")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            debug: default_debug(),
            expose_errors: None,
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
            required: false,
        }
    }
}

impl ServerConfig {
    /// Whether 500 responses carry the underlying error text
    pub fn expose_errors(&self) -> bool {
        self.expose_errors.unwrap_or(self.debug)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamApiError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SpamApiError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve configuration: explicit path, then `config.toml`, then defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let default_path = Path::new("config.toml");

        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.exists() => Self::from_file(default_path)?,
            None => Self::default(),
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `SPAM_API_*` overrides using `lookup` to read variables
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("SPAM_API_LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }

        if let Some(debug) = lookup("SPAM_API_DEBUG") {
            self.server.debug = parse_bool("SPAM_API_DEBUG", &debug)?;
        }

        if let Some(path) = lookup("SPAM_API_MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("SPAM_API_VECTORIZER_PATH") {
            self.artifacts.vectorizer_path = PathBuf::from(path);
        }

        if let Some(backend) = lookup("SPAM_API_BACKEND") {
            self.artifacts.backend = match backend.to_lowercase().as_str() {
                "file" => Backend::File,
                "mock" => Backend::Mock,
                other => {
                    return Err(SpamApiError::Config(format!(
                        "Unknown backend '{}' in SPAM_API_BACKEND",
                        other
                    )))
                }
            };
        }

        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
            SpamApiError::Config(format!(
                "Invalid listen address '{}': {}",
                self.server.listen_addr, e
            ))
        })?;

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SpamApiError::Config(format!(
            "Invalid boolean '{}' in {}",
            value, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:5000");
        assert!(config.server.debug);
        assert!(config.server.expose_errors());
        assert_eq!(config.artifacts.backend, Backend::File);
        assert_eq!(config.artifacts.model_path, PathBuf::from("model.json"));
        assert!(!config.artifacts.required);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
listen_addr = "127.0.0.1:8080"
debug = false

[artifacts]
backend = "mock"
required = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert!(!config.server.expose_errors());
        assert_eq!(config.artifacts.backend, Backend::Mock);
        assert_eq!(config.artifacts.vectorizer_path, PathBuf::from("vectorizer.json"));
        assert!(config.artifacts.required);
    }

    #[test]
    fn test_expose_errors_override() {
        let toml = r#"
[server]
debug = true
expose_errors = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.server.expose_errors());
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("SPAM_API_LISTEN_ADDR", "127.0.0.1:9000"),
            ("SPAM_API_DEBUG", "off"),
            ("SPAM_API_MODEL_PATH", "/srv/model.json"),
            ("SPAM_API_BACKEND", "Mock"),
        ]);

        let config = Config::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert!(!config.server.debug);
        assert_eq!(config.artifacts.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.artifacts.vectorizer_path, PathBuf::from("vectorizer.json"));
        assert_eq!(config.artifacts.backend, Backend::Mock);
    }

    #[test]
    fn test_env_override_rejects_bad_values() {
        let result = Config::default()
            .with_env_overrides(|key| (key == "SPAM_API_DEBUG").then(|| "maybe".to_string()));
        assert!(result.is_err());

        let result = Config::default()
            .with_env_overrides(|key| (key == "SPAM_API_BACKEND").then(|| "onnx".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_listen_addr() {
        let mut config = Config::default();
        config.server.listen_addr = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[server]\nlisten_addr = \"0.0.0.0:5001\"\n").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:5001");
        assert!(config.server.debug);
    }
}
