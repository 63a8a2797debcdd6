//! Layout heuristics configuration.
//!
//! Every geometric constant used by row grouping, column location and
//! candidate selection lives here. `LayoutConfig::default()` reproduces the
//! tuned values; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read layout config {0}: {1}")]
    Read(String, std::io::Error),

    #[error("Invalid layout config {0}: {1}")]
    Parse(String, serde_json::Error),
}

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Tunable constants for the spatial extraction heuristics.
///
/// Units are PDF points as reported by the word-geometry reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical bin size for grouping words into rows.
    pub row_tolerance: f64,
    /// Horizontal padding applied to both sides of a located header phrase.
    pub header_buffer: f64,
    /// Additional right-side padding when the header is "observed value".
    pub observed_value_extra: f64,
    /// Numeric tokens whose midpoint is left of this are ignored by the
    /// density pass (row indices, serial numbers).
    pub density_min_x: f64,
    /// Width of the midpoint histogram bins.
    pub density_bin_width: f64,
    /// Zone extent left of the densest bin's center.
    pub density_margin_left: f64,
    /// Zone extent right of the densest bin's center.
    pub density_margin_right: f64,
    /// Zone used when a page has neither a header nor numeric tokens.
    pub default_zone: (f64, f64),
    /// Slack added to the zone's left edge when deciding which words form
    /// the test name.
    pub name_edge_buffer: f64,
    /// Scan full page text line by line when the spatial pass finds nothing.
    pub text_fallback: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            header_buffer: 20.0,
            observed_value_extra: 30.0,
            density_min_x: 80.0,
            density_bin_width: 50.0,
            density_margin_left: 40.0,
            density_margin_right: 60.0,
            default_zone: (250.0, 400.0),
            name_edge_buffer: 5.0,
            text_fallback: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════

impl LayoutConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e))?;
        tracing::debug!(path = %path.display(), ?config, "Loaded layout config");
        Ok(config)
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
