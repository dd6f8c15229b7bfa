//! Engine configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ortho_interpret::{Interpreter, Validator};
use ortho_steps::DrawingConfig;

/// Errors loading or checking an [`EngineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Allowed mismatch between stated and computed end-B positions (mm).
    pub endpoint_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            endpoint_tolerance: Validator::default().endpoint_tolerance,
        }
    }
}

/// Immutable engine configuration. Every field has a default.
///
/// ```toml
/// [drawing]
/// scale = 1.0
/// origin_x = 30.0
/// margin = 20.0
///
/// [validation]
/// endpoint_tolerance = 0.5
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Drawing placement.
    pub drawing: DrawingConfig,
    /// Validator settings.
    pub validation: ValidationConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drawing
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let tol = self.validation.endpoint_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "endpoint_tolerance must be zero or positive (got {tol})"
            )));
        }
        Ok(())
    }

    /// An interpreter using these settings.
    pub fn interpreter(&self) -> Interpreter {
        Interpreter::new().with_validator(Validator::new(self.validation.endpoint_tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.drawing.origin_x, 30.0);
        assert_eq!(config.validation.endpoint_tolerance, 0.5);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            [drawing]
            scale = 2.5

            [validation]
            endpoint_tolerance = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.drawing.scale, 2.5);
        assert_eq!(config.drawing.margin, 20.0);
        assert_eq!(config.validation.endpoint_tolerance, 0.1);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EngineConfig::from_toml_str("[drawing]\nscale = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EngineConfig::from_toml_str("[validation]\nendpoint_tolerance = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("endpoint_tolerance"));
    }

    #[test]
    fn test_rejects_unknown_section() {
        let err = EngineConfig::from_toml_str("[render]\ncolor = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load("/nonexistent/ortho.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
