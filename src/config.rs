//! Engine configuration.
//!
//! Loaded from a JSON file; every section carries `#[serde(default)]` so a
//! minimal `{}` file is valid and all values fall back to their compiled-in
//! defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "gaps": { "inner": { "top": 8, "bottom": 8, "left": 8, "right": 8 } },
//!   "activation": { "tiling_system": "ctrl", "span_multiple_tiles": "alt" },
//!   "edge_tiling": { "quarter_activation_percentage": 0.4 }
//! }
//! ```

use crate::traits::ModMask;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pixel insets around and between tiled windows.
    #[serde(default)]
    pub gaps: GapConfig,

    /// Which modifier keys engage the tiling features during a drag.
    #[serde(default)]
    pub activation: ActivationConfig,

    /// Screen-edge snapping behaviour.
    #[serde(default)]
    pub edge_tiling: EdgeTilingConfig,

    /// Interval of the drag-tracking poll, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gaps: GapConfig::default(),
            activation: ActivationConfig::default(),
            edge_tiling: EdgeTilingConfig::default(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Per-side pixel insets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gaps {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Gaps {
    pub fn uniform(px: i32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }
}

/// Inner gaps separate adjacent tiles; outer gaps inset the whole layout
/// from the work-area border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    pub inner: Gaps,
    pub outer: Gaps,
}

/// A modifier key that must be held for a feature to engage.
///
/// `None` means the feature is always engaged while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKey {
    None,
    Ctrl,
    Alt,
    Super,
}

impl ActivationKey {
    /// Whether this activation key is satisfied by the given modifier mask.
    pub fn matches(&self, mods: ModMask) -> bool {
        match self {
            ActivationKey::None => true,
            ActivationKey::Ctrl => mods.contains(ModMask::CTRL),
            ActivationKey::Alt => mods.contains(ModMask::ALT),
            ActivationKey::Super => mods.contains(ModMask::SUPER),
        }
    }
}

/// Activation keys for the two drag-time features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Key that opens the tiling grid while dragging. Default: `ctrl`.
    pub tiling_system: ActivationKey,
    /// Key that extends the selection across multiple tiles. Default: `alt`.
    pub span_multiple_tiles: ActivationKey,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            tiling_system: ActivationKey::Ctrl,
            span_multiple_tiles: ActivationKey::Alt,
        }
    }
}

/// Screen-edge snapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeTilingConfig {
    /// Master toggle for edge tiling. Default: `true`.
    pub enabled: bool,
    /// Fraction of the work area each corner activation zone occupies,
    /// in `(0, 0.5]`. Default: `0.40`.
    pub quarter_activation_percentage: f64,
    /// Whether dragging to the top-center zone maximizes instead of tiling.
    /// Default: `true`.
    pub top_edge_maximize: bool,
}

impl Default for EdgeTilingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quarter_activation_percentage: 0.40,
            top_edge_maximize: true,
        }
    }
}

impl EdgeTilingConfig {
    /// The activation percentage clamped into a usable range; values outside
    /// `[0.05, 0.5]` come from hand-edited config files.
    pub fn quarter_pct(&self) -> f64 {
        self.quarter_activation_percentage.clamp(0.05, 0.5)
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
