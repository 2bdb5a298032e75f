//! Service configuration module.
//!
//! Handles loading and validating `edgefill.toml`. Stock defaults are
//! serialized to a TOML table and the user file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [padding]
//! strategy = "prominent"    # average | dominant | prominent
//! aspect_ratio = [1, 1]     # width:height used by `edgefill dir`
//!
//! [processing]
//! max_processes = 4         # Max parallel jobs (omit for auto = CPU cores)
//! ```
//!
//! Command-line flags (`--strategy`, `--ratio`) take precedence over the file.
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{AspectRatio, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `edgefill.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Padding behaviour (color strategy, default ratio).
    pub padding: PaddingConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ServiceConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if AspectRatio::new(self.padding.aspect_ratio[0], self.padding.aspect_ratio[1]).is_none()
        {
            return Err(ConfigError::Validation(
                "padding.aspect_ratio values must be non-zero".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The configured default ratio. Only valid after [`validate`](Self::validate).
    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        AspectRatio::new(self.padding.aspect_ratio[0], self.padding.aspect_ratio[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingConfig {
    /// Edge-color aggregation strategy.
    pub strategy: Strategy,
    /// Aspect ratio as `[width, height]` for directory runs.
    pub aspect_ratio: [u32; 2],
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            aspect_ratio: [1, 1],
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of jobs processed in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ServiceConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from the TOML file at `path`.
///
/// A missing file yields the stock defaults. An existing file is merged on
/// top of the defaults, checked for unknown keys, and validated.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: ServiceConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `edgefill.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# edgefill configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Padding
# ---------------------------------------------------------------------------
[padding]
# How each edge band is reduced to one padding color:
#   "average"   - mean of all band pixels
#   "dominant"  - largest color cluster, favouring saturated colors
#   "prominent" - most common hue, with that hue's mean chroma and luminance
strategy = "prominent"

# Target aspect ratio as [width, height] for `edgefill dir`.
# Jobs read from JSON carry their own ratio.
aspect_ratio = [1, 1]

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum jobs processed in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
