//! TileFit Settings Crate
//!
//! Handles persisted tiling preferences: the last-used grid parameters,
//! the display unit they were entered in, and engine limits.

pub mod config;
pub mod error;

pub use config::{Config, TileSettings, DEFAULT_FLATTEN_STEPS, DEFAULT_MAX_CELLS};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
