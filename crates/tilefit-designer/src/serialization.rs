//! Serialization for scene and layout files.
//!
//! A *scene* file describes the container and tile shapes a headless run
//! starts from. A *layout* file records the outcome of one generation:
//! the parameters used, the report and every retained placement.
//! Both are JSON.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canvas::Canvas;
use crate::document::ShapeId;
use crate::instantiator::{GenerationReport, PreviewSession};
use crate::model::{BoundingBox, Contour, PathGeometry, Point};
use crate::planner::GridParams;

/// Layout file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Layout metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
}

/// One retained tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub shape: ShapeId,
    pub row: u32,
    pub col: u32,
    pub bounds: BoundingBox,
}

/// Complete layout file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    pub metadata: LayoutMetadata,
    pub params: GridParams,
    pub report: GenerationReport,
    #[serde(default)]
    pub group: Option<ShapeId>,
    #[serde(default)]
    pub placements: Vec<PlacementRecord>,
}

impl LayoutFile {
    /// Snapshot a live session
    pub fn from_session(
        name: impl Into<String>,
        params: &GridParams,
        session: &PreviewSession,
    ) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: Utc::now(),
            },
            params: params.clone(),
            report: *session.report(),
            group: session.group(),
            placements: session
                .instances()
                .iter()
                .map(|i| PlacementRecord {
                    shape: i.shape,
                    row: i.cell.row,
                    col: i.cell.col,
                    bounds: i.bounds,
                })
                .collect(),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout")
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_string()?;
        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;
        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;
        let layout: LayoutFile =
            serde_json::from_str(&content).context("Failed to parse layout file")?;
        if layout.version != FILE_FORMAT_VERSION {
            bail!("Unsupported layout file version {}", layout.version);
        }
        Ok(layout)
    }
}

/// Shape description inside a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneShape {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    RoundedRectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    /// Several outlines combined under the even-odd rule
    Compound {
        parts: Vec<SceneShape>,
    },
    /// Raw contours with explicit handles
    Path {
        contours: Vec<Contour>,
    },
}

impl SceneShape {
    fn name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "Rectangle",
            Self::RoundedRectangle { .. } => "Rounded Rectangle",
            Self::Ellipse { .. } => "Ellipse",
            Self::Polygon { .. } => "Polygon",
            Self::Compound { .. } => "Compound Path",
            Self::Path { .. } => "Path",
        }
    }

    /// Build the outline this description stands for
    pub fn to_path_geometry(&self) -> Result<PathGeometry> {
        let path = match self {
            Self::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                ensure_positive("rectangle", *width, *height)?;
                PathGeometry::rectangle(&BoundingBox::from_origin_size(*x, *y, *width, *height))
            }
            Self::RoundedRectangle {
                x,
                y,
                width,
                height,
                radius,
            } => {
                ensure_positive("rounded rectangle", *width, *height)?;
                PathGeometry::rounded_rectangle(
                    &BoundingBox::from_origin_size(*x, *y, *width, *height),
                    *radius,
                )
            }
            Self::Ellipse { cx, cy, rx, ry } => {
                ensure_positive("ellipse", *rx, *ry)?;
                PathGeometry::ellipse(Point::new(*cx, *cy), *rx, *ry)
            }
            Self::Polygon { points } => {
                if points.len() < 3 {
                    bail!("Polygon needs at least 3 points, got {}", points.len());
                }
                let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
                PathGeometry::polygon(&points)
            }
            Self::Compound { parts } => {
                if parts.is_empty() {
                    bail!("Compound shape has no parts");
                }
                let parts = parts
                    .iter()
                    .map(SceneShape::to_path_geometry)
                    .collect::<Result<Vec<_>>>()?;
                PathGeometry::compound(parts)
            }
            Self::Path { contours } => PathGeometry::new(contours.clone()),
        };

        match path.bounds() {
            Some(bb) if bb.is_finite() => Ok(path),
            _ => bail!("{} has no finite extent", self.name()),
        }
    }
}

fn ensure_positive(what: &str, a: f64, b: f64) -> Result<()> {
    if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
        bail!("{} dimensions must be positive, got {} x {}", what, a, b);
    }
    Ok(())
}

/// Container and tile for a headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub name: String,
    pub container: SceneShape,
    pub tile: SceneShape,
}

impl SceneFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene file")
    }

    /// Load scene from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// Add both shapes to `canvas`, returning `(container, tile)`.
    pub fn build(&self, canvas: &mut Canvas) -> Result<(ShapeId, ShapeId)> {
        let container = self
            .container
            .to_path_geometry()
            .context("Invalid container shape")?;
        let tile = self.tile.to_path_geometry().context("Invalid tile shape")?;

        let container = canvas.add_path(format!("{} (container)", self.container.name()), container);
        let tile = canvas.add_path(format!("{} (tile)", self.tile.name()), tile);
        Ok((container, tile))
    }
}
