//! # Geometry Kernel
//!
//! Pure polygon routines used to test whether a tile fits inside an
//! arbitrary container outline:
//! - flattening of closed cubic contours into polylines
//! - ray-casting point-in-polygon and the even-odd rule over polygon sets
//! - segment intersection with collinear and touching cases
//! - "rectangle fully inside" with a clearance margin
//!
//! Nothing here panics or errors on degenerate input. Empty or collapsed
//! geometry simply yields `false` or an empty polygon.
//!
//! ## Boundary rule
//!
//! [`point_in_polygon`] uses the half-open crossing rule: an edge counts
//! when it spans the point's y in `(min, max]` and lies strictly to the
//! right of the point. For an axis-aligned polygon that makes points on a
//! minimum-x or minimum-y edge inside and points on a maximum-x or
//! maximum-y edge outside, independent of floating-point noise.

use crate::model::{BoundingBox, Contour, PathGeometry, Point};

/// A closed polyline; the last point connects back to the first.
pub type Polygon = Vec<Point>;

/// Default number of line segments per cubic segment.
pub const DEFAULT_FLATTEN_STEPS: usize = tilefit_core::limits::DEFAULT_FLATTEN_STEPS as usize;

const ORIENTATION_EPSILON: f64 = 1e-9;

/// Samples every cubic segment of `contour` (including the closing one)
/// into `steps` line segments.
///
/// Returns an empty polygon for fewer than two anchors or zero steps.
pub fn flatten(contour: &Contour, steps: usize) -> Polygon {
    if contour.len() < 2 || steps == 0 {
        return Vec::new();
    }

    let mut polygon = Vec::with_capacity(contour.len() * steps);
    for segment in contour.segments() {
        // The end point of each segment is the start of the next one.
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            let p = segment.sample(t);
            polygon.push(Point::new(p.x, p.y));
        }
    }
    polygon
}

/// Flattens every contour of a path, dropping contours that collapse to
/// fewer than three points.
pub fn flatten_path(path: &PathGeometry, steps: usize) -> Vec<Polygon> {
    path.contours
        .iter()
        .map(|c| flatten(c, steps))
        .filter(|p| p.len() >= 3)
        .collect()
}

/// Ray-casting parity test. Polygons with fewer than three points contain
/// nothing.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Even-odd rule: inside iff an odd number of polygons contain the point.
pub fn point_in_polygon_set(p: Point, polygons: &[Polygon]) -> bool {
    polygons
        .iter()
        .filter(|polygon| point_in_polygon(p, polygon))
        .count()
        % 2
        == 1
}

fn orientation(a: Point, b: Point, c: Point) -> i8 {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross > ORIENTATION_EPSILON {
        1
    } else if cross < -ORIENTATION_EPSILON {
        -1
    } else {
        0
    }
}

/// `p` is collinear with `a`-`b`; checks that it lies within their extent.
fn within_extent(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - ORIENTATION_EPSILON
        && p.x <= a.x.max(b.x) + ORIENTATION_EPSILON
        && p.y >= a.y.min(b.y) - ORIENTATION_EPSILON
        && p.y <= a.y.max(b.y) + ORIENTATION_EPSILON
}

/// Closed-segment intersection test. Touching endpoints and collinear
/// overlaps count as intersecting.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }

    (d1 == 0 && within_extent(b1, b2, a1))
        || (d2 == 0 && within_extent(b1, b2, a2))
        || (d3 == 0 && within_extent(a1, a2, b1))
        || (d4 == 0 && within_extent(a1, a2, b2))
}

/// Axis-aligned bounds of a polyline.
pub fn polygon_bounds(polygon: &[Point]) -> Option<BoundingBox> {
    let first = polygon.first()?;
    let init = BoundingBox::new(first.x, first.y, first.x, first.y);
    Some(polygon.iter().skip(1).fold(init, |acc, p| {
        BoundingBox::new(
            acc.left.min(p.x),
            acc.top.min(p.y),
            acc.right.max(p.x),
            acc.bottom.max(p.y),
        )
    }))
}

/// True when `rect`, grown by `margin` on every side, lies inside the
/// polygon set under the even-odd rule.
///
/// A negative margin shrinks the probe instead; if that collapses it the
/// test fails immediately. Beyond the four corners, the probe's edges must
/// not cross any polygon edge (a concave spike can reach between corners)
/// and no polygon vertex may sit strictly inside the probe (a hole can be
/// swallowed whole).
pub fn rect_fully_inside(rect: &BoundingBox, polygons: &[Polygon], margin: f64) -> bool {
    let probe = rect.inset(-margin);
    if !probe.is_finite() || probe.is_degenerate() || polygons.is_empty() {
        return false;
    }

    if !probe
        .corners()
        .iter()
        .all(|&c| point_in_polygon_set(c, polygons))
    {
        return false;
    }

    let probe_edges = probe.edges();
    for polygon in polygons {
        match polygon_bounds(polygon) {
            Some(bounds) if bounds.touches(&probe) => {}
            _ => continue,
        }

        let n = polygon.len();
        for i in 0..n {
            let (p, q) = (polygon[i], polygon[(i + 1) % n]);
            if probe.contains_point_strict(&p) {
                return false;
            }
            if probe_edges
                .iter()
                .any(|&(a, b)| segments_intersect(a, b, p, q))
            {
                return false;
            }
        }
    }

    true
}
