//! Application configuration
//!
//! Everything tunable lives here and can be overridden from a TOML file.
//! Missing keys fall back to the defaults below, so a config file only
//! needs to mention what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VolterriaError};
use crate::simulation::Settings;

/// Largest simulation step a single frame may apply (seconds).
pub const DEFAULT_MAX_FRAME_DELTA: f64 = 1.0 / 60.0;

/// Configuration for the snapshot-to-view layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    // === TIMING ===
    /// Upper bound on the delta fed to the engine each frame (seconds)
    ///
    /// A frame that took longer (window dragged, laptop asleep) still only
    /// advances the simulation by this much. The excess is dropped.
    pub max_frame_delta: f64,

    // === CREATURES ===
    /// Screen radius of a prey circle (pixels)
    pub prey_radius: f32,

    /// Screen radius of a predator circle (pixels)
    pub predator_radius: f32,

    // === LABELS ===
    /// Font size of the population status label
    pub status_font_size: f32,

    /// Inset of the status label from the top-left corner (pixels)
    pub status_margin: f32,

    /// Font size of the per-patch health labels
    pub grass_label_font_size: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            prey_radius: 4.0,
            predator_radius: 10.0,
            status_font_size: 24.0,
            status_margin: 8.0,
            grass_label_font_size: 12.0,
        }
    }
}

impl ViewConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_frame_delta.is_nan() || self.max_frame_delta <= 0.0 {
            return Err(VolterriaError::InvalidConfig(format!(
                "max_frame_delta ({}) must be positive",
                self.max_frame_delta
            )));
        }

        if self.prey_radius <= 0.0 || self.predator_radius <= 0.0 {
            return Err(VolterriaError::InvalidConfig(
                "creature radii must be positive".into(),
            ));
        }

        if self.status_font_size <= 0.0 || self.grass_label_font_size <= 0.0 {
            return Err(VolterriaError::InvalidConfig(
                "font sizes must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Top-level config file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub view: ViewConfig,
    pub simulation: Settings,
}

impl AppConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [view]
            prey_radius = 6.0

            [simulation]
            numprey = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.view.prey_radius, 6.0);
        assert_eq!(config.view.predator_radius, 10.0);
        assert_eq!(config.view.max_frame_delta, DEFAULT_MAX_FRAME_DELTA);
        assert_eq!(config.simulation.numprey, 12);
        assert_eq!(config.simulation.numpred, Settings::default().numpred);
    }

    #[test]
    fn test_rejects_non_positive_frame_delta() {
        let err = AppConfig::from_toml_str("[view]\nmax_frame_delta = 0.0\n").unwrap_err();
        assert!(matches!(err, VolterriaError::InvalidConfig(_)));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = AppConfig::from_toml_str(include_str!("../../data/volterria.toml")).unwrap();
        assert_eq!(config.simulation.numprey, 40);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.view.status_margin, 8.0);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::from_toml_str("[view\nprey_radius = ").unwrap_err();
        assert!(matches!(err, VolterriaError::ConfigParse(_)));
    }
}
