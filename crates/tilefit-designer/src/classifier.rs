//! # Container Classifier
//!
//! Inspects a container outline once per generation and picks the
//! cheapest correct containment test for it:
//!
//! | Kind | Recognised as | Test |
//! |---|---|---|
//! | `Rectangle` | one contour, 4 sharp corners, axis-aligned edges | bbox comparison |
//! | `Ellipse` | one contour, 4 smooth symmetric anchors on the bounds' side midpoints, axis-aligned kappa handles | `(dx/rx)² + (dy/ry)² <= 1` |
//! | `Path` | any other single contour | flattened polygon |
//! | `CompoundPath` | more than one contour | flattened polygons, even-odd |
//!
//! Rotated rectangles and ellipses fall through to `Path`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::TileError;
use crate::geometry::{self, Polygon, DEFAULT_FLATTEN_STEPS};
use crate::model::{BoundingBox, Contour, PathGeometry, Point, COORD_EPSILON, KAPPA};

/// Slack allowed by the analytic tests for accumulated rounding.
const ANALYTIC_EPSILON: f64 = 1e-9;

/// Relative tolerance when matching anchors and handles to an ellipse.
const ELLIPSE_TOLERANCE: f64 = 1e-3;

/// Tag describing which containment test a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    Rectangle,
    Ellipse,
    Path,
    CompoundPath,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Ellipse => write!(f, "ellipse"),
            Self::Path => write!(f, "path"),
            Self::CompoundPath => write!(f, "compound path"),
        }
    }
}

/// A classified container carrying the data its containment test needs.
#[derive(Debug, Clone)]
pub enum ContainerShape {
    Rectangle(BoundingBox),
    Ellipse { center: Point, rx: f64, ry: f64 },
    Path { polygons: Vec<Polygon>, bounds: BoundingBox },
    CompoundPath { polygons: Vec<Polygon>, bounds: BoundingBox },
}

impl ContainerShape {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Rectangle(_) => ContainerKind::Rectangle,
            Self::Ellipse { .. } => ContainerKind::Ellipse,
            Self::Path { .. } => ContainerKind::Path,
            Self::CompoundPath { .. } => ContainerKind::CompoundPath,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Rectangle(bb) => *bb,
            Self::Ellipse { center, rx, ry } => {
                BoundingBox::new(center.x - rx, center.y - ry, center.x + rx, center.y + ry)
            }
            Self::Path { bounds, .. } | Self::CompoundPath { bounds, .. } => *bounds,
        }
    }

    /// True when `rect` grown by `margin` lies fully inside the container.
    pub fn contains_rect(&self, rect: &BoundingBox, margin: f64) -> bool {
        let probe = rect.inset(-margin);
        if !probe.is_finite() || probe.is_degenerate() {
            return false;
        }

        match self {
            Self::Rectangle(bb) => bb.contains_box(&probe, ANALYTIC_EPSILON),
            Self::Ellipse { center, rx, ry } => probe
                .corners()
                .iter()
                .all(|c| ellipse_contains(*center, *rx, *ry, *c)),
            Self::Path { polygons, bounds } | Self::CompoundPath { polygons, bounds } => {
                bounds.contains_box(&probe, ANALYTIC_EPSILON)
                    && geometry::rect_fully_inside(rect, polygons, margin)
            }
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Self::Rectangle(bb) => {
                p.x >= bb.left && p.x <= bb.right && p.y >= bb.top && p.y <= bb.bottom
            }
            Self::Ellipse { center, rx, ry } => ellipse_contains(*center, *rx, *ry, p),
            Self::Path { polygons, .. } | Self::CompoundPath { polygons, .. } => {
                geometry::point_in_polygon_set(p, polygons)
            }
        }
    }
}

fn ellipse_contains(center: Point, rx: f64, ry: f64, p: Point) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (p.x - center.x) / rx;
    let ny = (p.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0 + ANALYTIC_EPSILON
}

/// Classifies container outlines.
#[derive(Debug, Clone, Copy)]
pub struct ContainerClassifier {
    flatten_steps: usize,
}

impl Default for ContainerClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FLATTEN_STEPS)
    }
}

impl ContainerClassifier {
    /// `flatten_steps` is clamped to at least one.
    pub fn new(flatten_steps: usize) -> Self {
        Self {
            flatten_steps: flatten_steps.max(1),
        }
    }

    pub fn flatten_steps(&self) -> usize {
        self.flatten_steps
    }

    pub fn classify(&self, path: &PathGeometry) -> Result<ContainerShape, TileError> {
        if path.contours.is_empty() {
            return Err(TileError::UnsupportedShape(
                "container has no contours".to_string(),
            ));
        }

        let bounds = path
            .bounds()
            .filter(|bb| bb.is_finite() && !bb.is_degenerate())
            .ok_or_else(|| {
                TileError::UnsupportedShape("container has no measurable area".to_string())
            })?;

        let shape = if path.contours.len() == 1 {
            let contour = &path.contours[0];
            if is_axis_aligned_rectangle(contour) {
                ContainerShape::Rectangle(bounds)
            } else if is_axis_aligned_ellipse(contour) {
                let anchors = anchor_bounds(contour);
                ContainerShape::Ellipse {
                    center: anchors.center(),
                    rx: anchors.width() / 2.0,
                    ry: anchors.height() / 2.0,
                }
            } else {
                ContainerShape::Path {
                    polygons: self.flatten(path)?,
                    bounds,
                }
            }
        } else {
            ContainerShape::CompoundPath {
                polygons: self.flatten(path)?,
                bounds,
            }
        };

        debug!(
            "Classified container as {} ({} contour(s))",
            shape.kind(),
            path.contour_count()
        );
        Ok(shape)
    }

    fn flatten(&self, path: &PathGeometry) -> Result<Vec<Polygon>, TileError> {
        let polygons = geometry::flatten_path(path, self.flatten_steps);
        if polygons.is_empty() {
            return Err(TileError::UnsupportedShape(
                "container outline could not be flattened".to_string(),
            ));
        }
        Ok(polygons)
    }
}

fn is_axis_aligned_rectangle(contour: &Contour) -> bool {
    if contour.len() != 4 || !contour.anchors.iter().all(|a| a.is_corner()) {
        return false;
    }
    let pts: Vec<Point> = contour.anchors.iter().map(|a| a.point).collect();
    let horizontal = |a: Point, b: Point| (a.y - b.y).abs() <= COORD_EPSILON;
    let vertical = |a: Point, b: Point| (a.x - b.x).abs() <= COORD_EPSILON;
    let edge = |i: usize| (pts[i], pts[(i + 1) % 4]);

    let h_first = (0..4).all(|i| {
        let (a, b) = edge(i);
        if i % 2 == 0 {
            horizontal(a, b)
        } else {
            vertical(a, b)
        }
    });
    let v_first = (0..4).all(|i| {
        let (a, b) = edge(i);
        if i % 2 == 0 {
            vertical(a, b)
        } else {
            horizontal(a, b)
        }
    });
    h_first || v_first
}

/// An ellipse drawn the way `PathGeometry::ellipse` draws one: an anchor at
/// the middle of each side of the anchor bounds, handles of `KAPPA` times
/// the radius along that side, each pointing at its neighbour.
fn is_axis_aligned_ellipse(contour: &Contour) -> bool {
    if contour.len() != 4
        || !contour
            .anchors
            .iter()
            .all(|a| a.is_smooth_symmetric() && a.has_axis_aligned_handles())
    {
        return false;
    }

    let bounds = anchor_bounds(contour);
    if bounds.is_degenerate() {
        return false;
    }
    let center = bounds.center();
    let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
    let close = |a: f64, b: f64, scale: f64| (a - b).abs() <= ELLIPSE_TOLERANCE * scale;

    let n = contour.len();
    (0..n).all(|i| {
        let a = &contour.anchors[i];
        let prev = contour.anchors[(i + n - 1) % n].point;
        let next = contour.anchors[(i + 1) % n].point;
        let (dx, dy) = (a.out_handle.x - a.point.x, a.out_handle.y - a.point.y);

        let on_side = (close(a.point.x, bounds.left, rx) || close(a.point.x, bounds.right, rx))
            && close(a.point.y, center.y, ry);
        let on_cap = (close(a.point.y, bounds.top, ry) || close(a.point.y, bounds.bottom, ry))
            && close(a.point.x, center.x, rx);
        let handle_fits = if on_side {
            close(dx, 0.0, rx) && close(dy.abs(), KAPPA * ry, ry)
        } else if on_cap {
            close(dy, 0.0, ry) && close(dx.abs(), KAPPA * rx, rx)
        } else {
            false
        };

        let towards_next = dx * (next.x - a.point.x) + dy * (next.y - a.point.y) > 0.0;
        let away_from_prev = dx * (prev.x - a.point.x) + dy * (prev.y - a.point.y) < 0.0;
        handle_fits && towards_next && away_from_prev
    })
}

fn anchor_bounds(contour: &Contour) -> BoundingBox {
    let points: Vec<Point> = contour.anchors.iter().map(|a| a.point).collect();
    geometry::polygon_bounds(&points).unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
}
