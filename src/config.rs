use std::path::PathBuf;

use egui::Color32;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a JSON config file (native builds only)
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Largest accepted side length of the exported image, in pixels
pub const MAX_EXPORT_SIZE: u32 = 16384;

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerWidths {
    pub thin: f32,
    pub thick: f32,
}

impl Default for MarkerWidths {
    fn default() -> Self {
        Self {
            thin: 2.0,
            thick: 6.0,
        }
    }
}

/// Sketch pad settings. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Side length of the square on-screen canvas, in points
    pub display_size: f32,
    /// Side length of the exported PNG, in pixels
    pub export_size: u32,
    /// Canvas background as RGBA
    pub background: [u8; 4],
    pub marker_widths: MarkerWidths,
    /// Initial marker color as RGBA
    pub initial_color: [u8; 4],
    pub stickers: Vec<String>,
    pub sticker_size: f32,
    /// Opacity of the tool preview under the cursor
    pub preview_alpha: f32,
    pub export_dir: PathBuf,
    pub export_file_name: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            display_size: 500.0,
            export_size: 1000,
            background: [255, 255, 255, 255],
            marker_widths: MarkerWidths::default(),
            initial_color: [0, 0, 0, 255],
            stickers: vec!["🚀".to_owned(), "⭐".to_owned(), "🎨".to_owned(), "🌈".to_owned()],
            sticker_size: 30.0,
            preview_alpha: 0.5,
            export_dir: PathBuf::from("."),
            export_file_name: "sketchpad.png".to_owned(),
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl PadConfig {
    /// Load the configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}; using default configuration", err);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn try_load() -> Result<Self, ConfigError> {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) else {
            return Ok(Self::default());
        };
        log::info!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&text)
    }

    #[cfg(target_arch = "wasm32")]
    fn try_load() -> Result<Self, ConfigError> {
        Ok(Self::default())
    }

    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.display_size) {
            return Err(ConfigError::Invalid(format!(
                "display_size must be positive, got {}",
                self.display_size
            )));
        }
        if !(1..=MAX_EXPORT_SIZE).contains(&self.export_size) {
            return Err(ConfigError::Invalid(format!(
                "export_size must be within 1..={}, got {}",
                MAX_EXPORT_SIZE, self.export_size
            )));
        }
        if !positive(self.marker_widths.thin) || !positive(self.marker_widths.thick) {
            return Err(ConfigError::Invalid(format!(
                "marker widths must be positive, got {:?}",
                self.marker_widths
            )));
        }
        if !positive(self.sticker_size) {
            return Err(ConfigError::Invalid(format!(
                "sticker_size must be positive, got {}",
                self.sticker_size
            )));
        }
        if !(0.0..=1.0).contains(&self.preview_alpha) {
            return Err(ConfigError::Invalid(format!(
                "preview_alpha must be within 0..=1, got {}",
                self.preview_alpha
            )));
        }
        if self.stickers.iter().all(|glyph| glyph.trim().is_empty()) {
            return Err(ConfigError::Invalid("at least one sticker is required".to_owned()));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export_file_name must not be empty".to_owned()));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn default_color(&self) -> Color32 {
        let [r, g, b, a] = self.initial_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
