//! # TileFit
//!
//! Fills a vector container shape with a grid of tile copies that stay
//! inside the container's exact outline, with:
//! - Uniform tile scaling, horizontal and vertical gaps
//! - A clearance margin (or overhang, when negative)
//! - Brick (staggered) layout
//! - A revocable preview that can be regenerated on every parameter
//!   change and committed or cancelled
//!
//! ## Architecture
//!
//! TileFit is organized as a workspace with multiple crates:
//!
//! 1. **tilefit-core** - Shared error type and length units
//! 2. **tilefit-settings** - Persisted tiling preferences (JSON/TOML)
//! 3. **tilefit-designer** - Geometry, classification, planning, preview
//! 4. **tilefit** - Headless binary that integrates all crates

pub use tilefit_designer as designer;

pub use tilefit_core::{Error, LengthUnit, Result};

pub use tilefit_designer::{
    BoundingBox, Canvas, ContainerKind, GenerationReport, GridParams, HostDocument, LayoutFile,
    PathGeometry, PreviewController, PreviewSession, PreviewState, SceneFile, SceneShape, ShapeId,
    TileError, TileInstantiator,
};

pub use tilefit_settings::{Config, SettingsError, TileSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Grid parameters in points for the engine.
///
/// `settings` may be in any display unit; lengths are converted here.
pub fn grid_params_from_settings(settings: &TileSettings) -> GridParams {
    let pt = settings.to_points();
    GridParams {
        gap_x: pt.gap_x,
        gap_y: pt.gap_y,
        margin: pt.margin,
        scale_pct: pt.scale_pct,
        brick_mode: pt.brick_mode,
    }
}

/// Instantiator honouring the engine limits in `settings`.
pub fn instantiator_from_settings(settings: &TileSettings) -> TileInstantiator {
    TileInstantiator::new()
        .with_flatten_steps(settings.flatten_steps as usize)
        .with_max_cells(settings.max_cells)
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays free for reports
/// - RUST_LOG environment variable support (default level `info`)
/// - JSON lines instead of human-readable output when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
