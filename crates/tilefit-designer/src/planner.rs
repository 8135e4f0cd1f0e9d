//! # Grid Placement Planner
//!
//! Computes where tile copies go before any shape is touched.
//!
//! Supports:
//! - Uniform tile scaling (percent of the tile's bounding box)
//! - Independent horizontal and vertical gaps
//! - Brick (staggered) layout, offsetting every other row by half a step
//! - Deterministic row-major cell order, so identical inputs always give
//!   identical placements
//!
//! The planner only covers the container's bounding box; deciding which
//! cells actually fit the outline is the classifier's job.

use serde::{Deserialize, Serialize};

use crate::error::TileError;
use crate::model::BoundingBox;

/// Relative slack when rounding cell counts up, so 400 / 50 stays 8.
const COUNT_EPSILON: f64 = 1e-9;

/// Largest grid the planner will materialise, whatever limit the caller
/// applies on top.
pub const MAX_PLAN_CELLS: u64 = 10_000_000;

/// Tiling parameters in document points, as forwarded by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Horizontal gap between neighbouring tiles
    pub gap_x: f64,
    /// Vertical gap between neighbouring rows
    pub gap_y: f64,
    /// Clearance kept between each tile and the container outline;
    /// negative values allow tiles to overhang
    pub margin: f64,
    /// Uniform tile scale in percent
    pub scale_pct: f64,
    /// Offset odd rows by half a horizontal step
    pub brick_mode: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            gap_x: 0.0,
            gap_y: 0.0,
            margin: 0.0,
            scale_pct: 100.0,
            brick_mode: false,
        }
    }
}

impl GridParams {
    /// Create new grid parameters
    pub fn new(gap_x: f64, gap_y: f64, margin: f64, scale_pct: f64, brick_mode: bool) -> Self {
        debug_assert!(gap_x.is_finite(), "gap_x must be finite, got {gap_x}");
        debug_assert!(gap_y.is_finite(), "gap_y must be finite, got {gap_y}");
        Self {
            gap_x,
            gap_y,
            margin,
            scale_pct,
            brick_mode,
        }
    }

    pub fn with_gap(mut self, gap_x: f64, gap_y: f64) -> Self {
        self.gap_x = gap_x;
        self.gap_y = gap_y;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_scale(mut self, scale_pct: f64) -> Self {
        self.scale_pct = scale_pct;
        self
    }

    pub fn with_brick(mut self, brick_mode: bool) -> Self {
        self.brick_mode = brick_mode;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<(), TileError> {
        if !self.gap_x.is_finite() || !self.gap_y.is_finite() {
            return Err(TileError::InvalidInput(format!(
                "gaps must be finite: gap_x={}, gap_y={}",
                self.gap_x, self.gap_y
            )));
        }
        if !self.margin.is_finite() {
            return Err(TileError::InvalidInput(format!(
                "margin must be finite, got {}",
                self.margin
            )));
        }
        if !self.scale_pct.is_finite() || self.scale_pct <= 0.0 {
            return Err(TileError::InvalidInput(format!(
                "scale must be a positive percentage, got {}",
                self.scale_pct
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Fully resolved grid: parameters plus the unscaled tile size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub tile_width: f64,
    pub tile_height: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub margin: f64,
    pub scale_pct: f64,
    pub brick_mode: bool,
}

impl GridSpec {
    /// Resolves `params` against the tile's bounding box.
    pub fn new(tile_bounds: &BoundingBox, params: &GridParams) -> Result<Self, TileError> {
        params.validate()?;

        let (tile_width, tile_height) = (tile_bounds.width(), tile_bounds.height());
        if !tile_width.is_finite() || !tile_height.is_finite() || tile_width <= 0.0 || tile_height <= 0.0 {
            return Err(TileError::InvalidInput(format!(
                "tile must have positive finite size, got {}x{}",
                tile_width, tile_height
            )));
        }

        let spec = Self {
            tile_width,
            tile_height,
            gap_x: params.gap_x,
            gap_y: params.gap_y,
            margin: params.margin,
            scale_pct: params.scale_pct,
            brick_mode: params.brick_mode,
        };

        let (step_x, step_y) = spec.step();
        if !(step_x.is_finite() && step_y.is_finite() && step_x > 0.0 && step_y > 0.0) {
            return Err(TileError::InvalidInput(format!(
                "grid step collapses: step_x={}, step_y={}",
                step_x, step_y
            )));
        }

        Ok(spec)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_pct / 100.0
    }

    /// Tile size after scaling
    pub fn effective_tile_size(&self) -> (f64, f64) {
        let s = self.scale_factor();
        (self.tile_width * s, self.tile_height * s)
    }

    /// Distance between the origins of neighbouring cells
    pub fn step(&self) -> (f64, f64) {
        let (w, h) = self.effective_tile_size();
        (w + self.gap_x, h + self.gap_y)
    }

    /// Limits a negative margin to half the smaller scaled tile side, the
    /// most a tile can shrink before its probe collapses.
    pub fn clamp_margin(mut self) -> Self {
        let (w, h) = self.effective_tile_size();
        let limit = -(w.min(h) / 2.0);
        if self.margin < limit {
            self.margin = limit;
        }
        self
    }
}

/// Candidate top-left position for one tile copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementCell {
    pub row: u32,
    pub col: u32,
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Grid dimensions covering a container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub step_x: f64,
    pub step_y: f64,
}

impl GridLayout {
    /// Get total number of cells
    pub fn total_cells(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

fn cell_count(extent: f64, step: f64) -> u32 {
    let raw = extent / step;
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    let count = if (raw - rounded).abs() <= COUNT_EPSILON * raw.max(1.0) {
        rounded
    } else {
        raw.ceil()
    };
    count.min(f64::from(u32::MAX)) as u32
}

/// Generator for placement cells
pub struct GridPlanner;

impl GridPlanner {
    /// Rows and columns needed to cover `container`. `None` when the step
    /// is not positive.
    pub fn layout(container: &BoundingBox, spec: &GridSpec) -> Option<GridLayout> {
        let (step_x, step_y) = spec.step();
        if !(step_x.is_finite() && step_y.is_finite() && step_x > 0.0 && step_y > 0.0) {
            return None;
        }
        if !container.is_finite() {
            return None;
        }

        let stagger = if spec.brick_mode { step_x / 2.0 } else { 0.0 };
        Some(GridLayout {
            columns: cell_count(container.width() + stagger, step_x),
            rows: cell_count(container.height(), step_y),
            step_x,
            step_y,
        })
    }

    /// Cells for a resolved spec, row-major from the container's top-left.
    ///
    /// A spec that cannot form a grid gives an empty plan; a grid larger
    /// than [`MAX_PLAN_CELLS`] is an error.
    pub fn plan_spec(
        container: &BoundingBox,
        spec: &GridSpec,
    ) -> Result<Vec<PlacementCell>, TileError> {
        let Some(layout) = Self::layout(container, spec) else {
            return Ok(Vec::new());
        };
        if layout.total_cells() > MAX_PLAN_CELLS {
            return Err(TileError::InvalidInput(format!(
                "grid of {}x{} cells exceeds the planner ceiling of {}",
                layout.columns, layout.rows, MAX_PLAN_CELLS
            )));
        }

        let mut cells = Vec::with_capacity(layout.total_cells() as usize);
        for row in 0..layout.rows {
            let offset = if spec.brick_mode && row % 2 == 1 {
                layout.step_x / 2.0
            } else {
                0.0
            };
            let origin_y = container.top + f64::from(row) * layout.step_y;
            for col in 0..layout.columns {
                cells.push(PlacementCell {
                    row,
                    col,
                    origin_x: container.left + f64::from(col) * layout.step_x + offset,
                    origin_y,
                });
            }
        }
        Ok(cells)
    }

    /// Cells for the given container and tile bounds. Inputs that cannot
    /// form a grid give an empty plan.
    pub fn plan(
        container: &BoundingBox,
        tile: &BoundingBox,
        params: &GridParams,
    ) -> Result<Vec<PlacementCell>, TileError> {
        match GridSpec::new(tile, params) {
            Ok(spec) => Self::plan_spec(container, &spec),
            Err(_) => Ok(Vec::new()),
        }
    }
}
