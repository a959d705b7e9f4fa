//! Rendering configuration and the explicit context threaded through every
//! builder and layout call.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// User preferences that affect how components look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub default_component_color: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_component_color: "#5c6bc0".to_string(),
        }
    }
}

/// Graphics options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Graphics {
    /// Horizontal padding between columns of an open chip interior.
    pub column_padding: f64,
    /// Vertical padding between stacked subcomponents.
    pub row_padding: f64,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            column_padding: 40.0,
            row_padding: 20.0,
        }
    }
}

/// Display settings as stored in the application settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub preferences: Preferences,
    pub graphics: Graphics,
}

impl DisplaySettings {
    /// Read the display part of a settings file. A missing file yields the
    /// defaults; unrelated entries (e.g. persisted open ids) are ignored.
    pub fn from_file(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Configuration for the rendering pipeline.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Allowed zoom range `(min, max)`.
    pub scale_extent: (f64, f64),
    /// Optional pan bound `[[x0, y0], [x1, y1]]` in diagram space.
    pub translate_extent: Option<[[f64; 2]; 2]>,
    /// Label font size in pixels.
    pub font_size: f64,
    pub display: DisplaySettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scale_extent: (1.0, 5.0),
            translate_extent: None,
            font_size: 16.0,
            display: DisplaySettings::default(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// ─── Text metrics ────────────────────────────────────────────────────────────

/// Measures rendered label text; gate boxes are sized from these metrics.
pub trait TextMetrics {
    /// Advance width of `text` at `font_size` pixels.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed-advance approximation of a sans-serif font.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.advance
    }
}

// ─── RenderContext ───────────────────────────────────────────────────────────

/// Shared, read-only context for a render pass.
pub struct RenderContext {
    pub config: RenderConfig,
    pub metrics: Box<dyn TextMetrics>,
}

impl RenderContext {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            metrics: Box::new(MonospaceMetrics::default()),
        }
    }

    pub fn with_metrics(config: RenderConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self { config, metrics }
    }

    pub fn component_color<'a>(&'a self, color: Option<&'a str>) -> &'a str {
        color.unwrap_or(&self.config.display.preferences.default_component_color)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
