//! Pipeline configuration.
//!
//! Every field has a default, so an empty YAML document (or none at all)
//! yields the stock 192x63 canvas with a 6x grid and 15-entry history.

use std::path::Path;

use image::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::{CanvasSize, GRID_BLUE};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable constants for the transform pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pixelated canvas width in pixels
    pub canvas_width: u32,
    /// Pixelated canvas height in pixels
    pub canvas_height: u32,
    /// Integer upscale factor for the grid overlay
    pub grid_scale: u32,
    /// Grid line colour as RGB
    pub grid_color: [u8; 3],
    /// Maximum number of history entries, including the pinned first entry
    pub history_capacity: usize,
    /// JPEG export quality (1-100)
    pub jpeg_quality: u8,
    /// Neighbourhood size for adaptive binarization (odd, >= 3)
    pub adaptive_block_size: u32,
    /// Constant subtracted from the local mean during binarization
    pub adaptive_offset: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 192,
            canvas_height: 63,
            grid_scale: 6,
            grid_color: GRID_BLUE.0,
            history_capacity: 15,
            jpeg_quality: 90,
            adaptive_block_size: 11,
            adaptive_offset: 2,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            canvas_width = config.canvas_width,
            canvas_height = config.canvas_height,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Check value ranges that the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.grid_scale < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid_scale must be at least 2, got {}",
                self.grid_scale
            )));
        }
        if self.history_capacity < crate::history::MIN_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "history_capacity must be at least {}, got {}",
                crate::history::MIN_CAPACITY,
                self.history_capacity
            )));
        }
        if self.adaptive_block_size < 3 || self.adaptive_block_size % 2 == 0 {
            return Err(ConfigError::Invalid(format!(
                "adaptive_block_size must be odd and at least 3, got {}",
                self.adaptive_block_size
            )));
        }
        Ok(())
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    pub fn grid_rgb(&self) -> Rgb<u8> {
        Rgb(self.grid_color)
    }
}
