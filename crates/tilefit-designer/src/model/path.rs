use serde::{Deserialize, Serialize};

use super::{Anchor, BoundingBox, Contour, Point};

/// Cubic handle length that best approximates a quarter circle.
pub(crate) const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Vector geometry of a drawable: one contour for a simple path, several
/// for a compound path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathGeometry {
    pub contours: Vec<Contour>,
}

impl PathGeometry {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn rectangle(bounds: &BoundingBox) -> Self {
        Self::new(vec![Contour::from_points(&bounds.corners())])
    }

    /// Rectangle with circular corners. The radius is clamped to half the
    /// shorter side; a non-positive radius gives a plain rectangle.
    pub fn rounded_rectangle(bounds: &BoundingBox, radius: f64) -> Self {
        let r = radius.min(bounds.width() / 2.0).min(bounds.height() / 2.0);
        if r.is_nan() || r <= 0.0 {
            return Self::rectangle(bounds);
        }
        let k = KAPPA * r;
        let (l, t, rt, b) = (bounds.left, bounds.top, bounds.right, bounds.bottom);
        let p = Point::new;
        let anchors = vec![
            Anchor::new(p(l + r, t), p(l + r - k, t), p(l + r, t)),
            Anchor::new(p(rt - r, t), p(rt - r, t), p(rt - r + k, t)),
            Anchor::new(p(rt, t + r), p(rt, t + r - k), p(rt, t + r)),
            Anchor::new(p(rt, b - r), p(rt, b - r), p(rt, b - r + k)),
            Anchor::new(p(rt - r, b), p(rt - r + k, b), p(rt - r, b)),
            Anchor::new(p(l + r, b), p(l + r, b), p(l + r - k, b)),
            Anchor::new(p(l, b - r), p(l, b - r + k), p(l, b - r)),
            Anchor::new(p(l, t + r), p(l, t + r), p(l, t + r - k)),
        ];
        Self::new(vec![Contour::new(anchors)])
    }

    /// Four-anchor cubic ellipse, anchors at the extreme points.
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        let (cx, cy) = (center.x, center.y);
        let (kx, ky) = (KAPPA * rx, KAPPA * ry);
        let p = Point::new;
        let anchors = vec![
            Anchor::new(p(cx + rx, cy), p(cx + rx, cy - ky), p(cx + rx, cy + ky)),
            Anchor::new(p(cx, cy + ry), p(cx + kx, cy + ry), p(cx - kx, cy + ry)),
            Anchor::new(p(cx - rx, cy), p(cx - rx, cy + ky), p(cx - rx, cy - ky)),
            Anchor::new(p(cx, cy - ry), p(cx - kx, cy - ry), p(cx + kx, cy - ry)),
        ];
        Self::new(vec![Contour::new(anchors)])
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::ellipse(center, radius, radius)
    }

    pub fn polygon(points: &[Point]) -> Self {
        Self::new(vec![Contour::from_points(points)])
    }

    /// Merges the contours of several paths into one compound path.
    pub fn compound(parts: impl IntoIterator<Item = PathGeometry>) -> Self {
        Self::new(parts.into_iter().flat_map(|p| p.contours).collect())
    }

    /// Outline with `hole` cut out under the even-odd rule.
    pub fn with_hole(outer: PathGeometry, hole: PathGeometry) -> Self {
        Self::compound([outer, hole])
    }

    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    pub fn is_compound(&self) -> bool {
        self.contours.len() > 1
    }

    /// Exact bounds of the curves, not of the control polygon. `None` for
    /// a path without anchors.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut result: Option<BoundingBox> = None;
        let mut extend = |bb: BoundingBox| {
            result = Some(match result {
                Some(acc) => acc.union(&bb),
                None => bb,
            });
        };

        for contour in &self.contours {
            if contour.len() == 1 {
                let p = contour.anchors[0].point;
                extend(BoundingBox::new(p.x, p.y, p.x, p.y));
                continue;
            }
            for segment in contour.segments() {
                // Straight segments are measured from their endpoints so
                // axis-aligned edges keep exact coordinates.
                if segment.ctrl1 == segment.from && segment.ctrl2 == segment.to {
                    let (a, b) = (segment.from, segment.to);
                    extend(BoundingBox::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y)));
                } else {
                    let bb = segment.bounding_box();
                    extend(BoundingBox::new(bb.min.x, bb.min.y, bb.max.x, bb.max.y));
                }
            }
        }

        result
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for contour in &mut self.contours {
            contour.translate(dx, dy);
        }
    }

    pub fn scale_about(&mut self, origin: Point, factor: f64) {
        for contour in &mut self.contours {
            contour.scale_about(origin, factor);
        }
    }
}
