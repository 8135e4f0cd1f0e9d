//! Configuration and settings management for TileFit
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Tiling parameters (spacing, margin, scale, brick layout) in the
//!   user's display unit
//! - Engine limits (curve flattening resolution, maximum grid size)
//! - Recently used scene files

pub use tilefit_core::limits::{DEFAULT_FLATTEN_STEPS, DEFAULT_MAX_CELLS};
pub use tilefit_core::units::LengthUnit;

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MAX_FLATTEN_STEPS: u32 = 256;
const MAX_SCALE_PCT: f64 = 10_000.0;

/// Tiling parameters as entered by the user
///
/// Lengths are stored in `unit`; call [`TileSettings::to_points`] before
/// handing them to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSettings {
    /// Display unit of `gap_x`, `gap_y` and `margin`
    pub unit: LengthUnit,
    /// Horizontal gap between tiles
    pub gap_x: f64,
    /// Vertical gap between tiles
    pub gap_y: f64,
    /// Clearance between tiles and the container outline. Negative values
    /// let tiles overhang the outline.
    pub margin: f64,
    /// Uniform tile scale in percent
    pub scale_pct: f64,
    /// Offset every other row by half a step
    pub brick_mode: bool,
    /// Line segments per cubic segment when flattening container outlines
    pub flatten_steps: u32,
    /// Refuse grids with more candidate cells than this
    pub max_cells: usize,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Points,
            gap_x: 0.0,
            gap_y: 0.0,
            margin: 0.0,
            scale_pct: 100.0,
            brick_mode: false,
            flatten_steps: DEFAULT_FLATTEN_STEPS,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl TileSettings {
    /// Validate the tiling parameters
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [("gap_x", self.gap_x), ("gap_y", self.gap_y)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::invalid(key, "must be finite and >= 0"));
            }
        }

        if !self.margin.is_finite() {
            return Err(SettingsError::invalid("margin", "must be finite"));
        }

        if !self.scale_pct.is_finite() || self.scale_pct <= 0.0 || self.scale_pct > MAX_SCALE_PCT {
            return Err(SettingsError::invalid(
                "scale_pct",
                format!("must be in (0, {}]", MAX_SCALE_PCT),
            ));
        }

        if self.flatten_steps == 0 || self.flatten_steps > MAX_FLATTEN_STEPS {
            return Err(SettingsError::invalid(
                "flatten_steps",
                format!("must be in 1..={}", MAX_FLATTEN_STEPS),
            ));
        }

        if self.max_cells == 0 {
            return Err(SettingsError::invalid("max_cells", "must be > 0"));
        }

        Ok(())
    }

    /// Return a copy with all lengths converted to points
    pub fn to_points(&self) -> Self {
        Self {
            unit: LengthUnit::Points,
            gap_x: self.unit.to_points(self.gap_x),
            gap_y: self.unit.to_points(self.gap_y),
            margin: self.unit.to_points(self.margin),
            ..self.clone()
        }
    }

    /// Re-express the lengths in another display unit
    pub fn convert_to(&self, unit: LengthUnit) -> Self {
        let pt = self.to_points();
        Self {
            unit,
            gap_x: unit.from_points(pt.gap_x),
            gap_y: unit.from_points(pt.gap_y),
            margin: unit.from_points(pt.margin),
            ..pt
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of recent scenes kept
    pub recent_scenes_count: usize,
    /// Recently used scene files, most recent first
    pub recent_scenes: Vec<PathBuf>,
    /// Tiling parameters
    pub tiling: TileSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_scenes_count: 10,
            recent_scenes: Vec::new(),
            tiling: TileSettings::default(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location: `<config_dir>/tilefit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::from(ConfigError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        })?;
        Ok(dir.join("tilefit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is
    /// missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.tiling.validate()?;

        if self.recent_scenes_count == 0 {
            return Err(SettingsError::invalid("recent_scenes_count", "must be > 0"));
        }

        Ok(())
    }

    /// Add a scene file to the recent list
    pub fn add_recent_scene(&mut self, path: PathBuf) {
        self.recent_scenes.retain(|f| f != &path);
        self.recent_scenes.insert(0, path);
        self.recent_scenes.truncate(self.recent_scenes_count);
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
