use lyon::geom::{point, CubicBezierSegment};
use serde::{Deserialize, Serialize};

use super::{Point, COORD_EPSILON};

/// Relative tolerance for handle symmetry checks.
const HANDLE_TOLERANCE: f64 = 1e-6;

/// One anchor of a cubic path with its incoming and outgoing handles.
///
/// A handle that coincides with its anchor is retracted; an anchor with
/// both handles retracted is a sharp corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub point: Point,
    pub in_handle: Point,
    pub out_handle: Point,
}

impl Anchor {
    pub fn new(point: Point, in_handle: Point, out_handle: Point) -> Self {
        Self {
            point,
            in_handle,
            out_handle,
        }
    }

    /// Sharp corner with both handles retracted.
    pub fn corner(point: Point) -> Self {
        Self::new(point, point, point)
    }

    pub fn is_corner(&self) -> bool {
        self.in_handle.approx_eq(&self.point, COORD_EPSILON)
            && self.out_handle.approx_eq(&self.point, COORD_EPSILON)
    }

    /// Both handles extended, equal length and pointing in opposite
    /// directions through the anchor.
    pub fn is_smooth_symmetric(&self) -> bool {
        let (ix, iy) = (self.in_handle.x - self.point.x, self.in_handle.y - self.point.y);
        let (ox, oy) = (self.out_handle.x - self.point.x, self.out_handle.y - self.point.y);
        let len = (ox * ox + oy * oy).sqrt();
        if len <= COORD_EPSILON {
            return false;
        }
        let tolerance = HANDLE_TOLERANCE * len.max(1.0);
        (ix + ox).abs() <= tolerance && (iy + oy).abs() <= tolerance
    }

    /// The outgoing handle runs horizontally or vertically.
    pub fn has_axis_aligned_handles(&self) -> bool {
        let dx = self.out_handle.x - self.point.x;
        let dy = self.out_handle.y - self.point.y;
        let tolerance = HANDLE_TOLERANCE * dx.abs().max(dy.abs()).max(1.0);
        dx.abs() <= tolerance || dy.abs() <= tolerance
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(f(self.point), f(self.in_handle), f(self.out_handle))
    }
}

/// A closed sequence of anchors joined by cubic segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    pub anchors: Vec<Anchor>,
}

impl Contour {
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    /// Polygonal contour made of sharp corners.
    pub fn from_points(points: &[Point]) -> Self {
        Self::new(points.iter().copied().map(Anchor::corner).collect())
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Cubic segments in order, including the closing segment back to the
    /// first anchor. Contours with fewer than two anchors have none.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezierSegment<f64>> + '_ {
        let n = if self.anchors.len() < 2 {
            0
        } else {
            self.anchors.len()
        };
        (0..n).map(move |i| {
            let a = &self.anchors[i];
            let b = &self.anchors[(i + 1) % n];
            CubicBezierSegment {
                from: point(a.point.x, a.point.y),
                ctrl1: point(a.out_handle.x, a.out_handle.y),
                ctrl2: point(b.in_handle.x, b.in_handle.y),
                to: point(b.point.x, b.point.y),
            }
        })
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for anchor in &mut self.anchors {
            *anchor = anchor.map(|p| p.translated(dx, dy));
        }
    }

    pub fn scale_about(&mut self, origin: Point, factor: f64) {
        for anchor in &mut self.anchors {
            *anchor = anchor.map(|p| p.scaled_about(origin, factor));
        }
    }
}
