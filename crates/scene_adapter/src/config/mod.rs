//! Configuration system
//!
//! Configuration documents (adapter settings, catalogs) are loaded from TOML
//! or RON files, chosen by extension.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        Self::parse(&contents, format)
    }

    /// Parse configuration from an in-memory document
    fn parse(contents: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// TOML document
    Toml,
    /// Rusty Object Notation document
    Ron,
}

impl Format {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Adapter Configuration
///
/// Settings for one adapter instance: logging, which catalog to load and
/// whether cameras grab input from their canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Default log filter, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Catalog file to load instead of the built-in catalog
    pub catalog_path: Option<String>,
    /// Attach input controls to the canvas after building a camera
    pub attach_camera_controls: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            catalog_path: None,
            attach_camera_controls: true,
        }
    }
}

impl Config for AdapterConfig {}

impl AdapterConfig {
    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load the catalog from a file instead of using the built-in one
    pub fn with_catalog_path(mut self, path: impl Into<String>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Enable or disable camera input attachment
    pub fn with_camera_controls(mut self, enabled: bool) -> Self {
        self.attach_camera_controls = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        // Only the global level is checked; module directives are left to env_logger
        let global = self.log_level.split(',').next().unwrap_or_default().trim();
        if !global.contains('=') && !LEVELS.contains(&global.to_ascii_lowercase().as_str()) {
            return Err(format!("Unknown log level: {}", self.log_level));
        }

        if let Some(path) = &self.catalog_path {
            Format::from_path(Path::new(path)).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
