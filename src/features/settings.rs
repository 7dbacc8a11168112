//! Startup configuration
//!
//! Read once from `<config_dir>/config.json`. The app never writes it back;
//! effect parameters always start from their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How frames are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderBackend {
    /// wgpu fragment shader
    #[default]
    Gpu,
    /// rayon reference renderer, shown as an image
    Cpu,
}

impl std::fmt::Display for RenderBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderBackend::Gpu => write!(f, "gpu"),
            RenderBackend::Cpu => write!(f, "cpu"),
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    pub backend: RenderBackend,
    /// Image loaded on startup
    pub default_image: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
    /// Share of the window height given to the orb area
    pub orb_area_fraction: f32,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            backend: RenderBackend::Gpu,
            default_image: None,
            window_width: 420.0,
            window_height: 860.0,
            orb_area_fraction: 0.5,
        }
    }
}

impl OrbConfig {
    /// Get the config file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orbe", "Orbe")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config file, or return defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        match Self::load_from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) => {
                tracing::debug!("No config at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse config JSON, sanitizing out-of-range values
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.window_width.is_finite() && self.window_width >= 1.0) {
            self.window_width = defaults.window_width;
        }
        if !(self.window_height.is_finite() && self.window_height >= 1.0) {
            self.window_height = defaults.window_height;
        }
        if !(self.orb_area_fraction > 0.0 && self.orb_area_fraction <= 1.0) {
            self.orb_area_fraction = defaults.orb_area_fraction;
        }
        self
    }
}

/// Errors that can occur reading the config
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = OrbConfig::from_json(r#"{ "backend": "cpu" }"#).unwrap();
        assert_eq!(config.backend, RenderBackend::Cpu);
        assert_eq!(config.window_width, 420.0);
        assert_eq!(config.window_height, 860.0);
        assert_eq!(config.orb_area_fraction, 0.5);
        assert!(config.default_image.is_none());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = OrbConfig::from_json("{}").unwrap();
        assert_eq!(config.backend, RenderBackend::Gpu);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = OrbConfig::from_json("{ backend: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        assert!(OrbConfig::from_json(r#"{ "backend": "vulkan" }"#).is_err());
    }

    #[test]
    fn test_out_of_range_values_are_replaced() {
        let config = OrbConfig::from_json(
            r#"{ "window_width": -3, "window_height": 0, "orb_area_fraction": 4.0 }"#,
        )
        .unwrap();
        assert_eq!(config.window_width, 420.0);
        assert_eq!(config.window_height, 860.0);
        assert_eq!(config.orb_area_fraction, 0.5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = OrbConfig::load_from_file(Path::new("/nonexistent/orbe/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("orbe-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "default_image": "/tmp/sample.png" }"#).unwrap();
        let config = OrbConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.default_image, Some(PathBuf::from("/tmp/sample.png")));
    }
}
