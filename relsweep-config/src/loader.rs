use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::AssessmentConfig;
use crate::validation;

/// Failures loading or validating the assessment configuration. All of them
/// abort the run before any scheduling happens.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("config guard rail violated: {0}")]
    GuardRail(String),
}

/// Loads and validates the assessment configuration document.
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse, and validate the TOML document at `path`.
    pub fn load(path: &Path) -> Result<AssessmentConfig, ConfigLoadError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let config = Self::parse(&contents, &path.display().to_string())?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Parse without touching the filesystem. TOML first, JSON fallback for
    /// convenience.
    pub fn parse(
        contents: &str,
        origin: &str,
    ) -> Result<AssessmentConfig, ConfigLoadError> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                ConfigLoadError::Parse {
                    path: origin.to_owned(),
                    message: format!(
                        "toml error: {toml_err}; json error: {json_err}"
                    ),
                }
            })
        })
    }
}
