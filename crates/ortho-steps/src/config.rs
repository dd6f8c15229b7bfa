//! Drawing placement settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StepError};

/// Where and how large the construction is drawn.
///
/// Coordinates of every generated element are a pure function of the
/// constraint set and this value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Drawing units per millimetre.
    pub scale: f64,
    /// x position of the projector through end A.
    pub origin_x: f64,
    /// Reference line overhang beyond the construction, in drawing units.
    pub margin: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin_x: 30.0,
            margin: 20.0,
        }
    }
}

impl DrawingConfig {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(StepError::InvalidConfig(format!(
                "scale must be a positive number (got {})",
                self.scale
            )));
        }
        if !self.origin_x.is_finite() {
            return Err(StepError::InvalidConfig("origin_x must be finite".into()));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(StepError::InvalidConfig(format!(
                "margin must be zero or positive (got {})",
                self.margin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DrawingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let config = DrawingConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(StepError::InvalidConfig(_))));

        let config = DrawingConfig {
            margin: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
