use tilefit_designer::geometry::{flatten_path, rect_fully_inside};
use tilefit_designer::{
    Anchor, BoundingBox, Canvas, ContainerClassifier, ContainerKind, Contour, GridParams,
    PathGeometry, Point, TileError, TileInstantiator, DEFAULT_FLATTEN_STEPS,
};

const KAPPA_APPROX: f64 = 0.552_284_749_830_793_4;

fn classify(path: &PathGeometry) -> ContainerKind {
    ContainerClassifier::default().classify(path).unwrap().kind()
}

#[test]
fn test_kinds() {
    let bb = BoundingBox::from_origin_size(0.0, 0.0, 200.0, 100.0);
    assert_eq!(classify(&PathGeometry::rectangle(&bb)), ContainerKind::Rectangle);
    assert_eq!(
        classify(&PathGeometry::circle(Point::new(50.0, 50.0), 50.0)),
        ContainerKind::Ellipse
    );
    assert_eq!(
        classify(&PathGeometry::rounded_rectangle(&bb, 12.0)),
        ContainerKind::Path
    );
    let ring = PathGeometry::with_hole(
        PathGeometry::rectangle(&bb),
        PathGeometry::rectangle(&bb.inset(20.0)),
    );
    assert_eq!(classify(&ring), ContainerKind::CompoundPath);
}

#[test]
fn test_rotated_ellipse_is_path() {
    // Handles at 45 degrees: same shape family, but no longer axis-aligned.
    let c = 50.0;
    let r = 40.0;
    let k = 0.5523 * r / std::f64::consts::SQRT_2;
    let d = r / std::f64::consts::SQRT_2;
    let p = Point::new;
    let anchors = vec![
        Anchor::new(p(c + d, c + d), p(c + d + k, c + d - k), p(c + d - k, c + d + k)),
        Anchor::new(p(c - d, c + d), p(c - d + k, c + d + k), p(c - d - k, c + d - k)),
        Anchor::new(p(c - d, c - d), p(c - d - k, c - d + k), p(c - d + k, c - d - k)),
        Anchor::new(p(c + d, c - d), p(c + d - k, c - d - k), p(c + d + k, c - d + k)),
    ];
    let path = PathGeometry::new(vec![Contour::new(anchors)]);
    assert_eq!(classify(&path), ContainerKind::Path);
}

/// Diamond with 1pt axis-aligned handles at each vertex.
fn short_handle_diamond() -> PathGeometry {
    let p = Point::new;
    let anchors = vec![
        Anchor::new(p(50.0, 0.0), p(49.0, 0.0), p(51.0, 0.0)),
        Anchor::new(p(100.0, 50.0), p(100.0, 49.0), p(100.0, 51.0)),
        Anchor::new(p(50.0, 100.0), p(51.0, 100.0), p(49.0, 100.0)),
        Anchor::new(p(0.0, 50.0), p(0.0, 51.0), p(0.0, 49.0)),
    ];
    PathGeometry::new(vec![Contour::new(anchors)])
}

#[test]
fn test_short_handles_are_not_an_ellipse() {
    assert_eq!(classify(&short_handle_diamond()), ContainerKind::Path);

    // Kappa handles drawn from the top anchor, clockwise, still qualify.
    let k = KAPPA_APPROX * 50.0;
    let p = Point::new;
    let anchors = vec![
        Anchor::new(p(50.0, 0.0), p(50.0 - k, 0.0), p(50.0 + k, 0.0)),
        Anchor::new(p(100.0, 50.0), p(100.0, 50.0 - k), p(100.0, 50.0 + k)),
        Anchor::new(p(50.0, 100.0), p(50.0 + k, 100.0), p(50.0 - k, 100.0)),
        Anchor::new(p(0.0, 50.0), p(0.0, 50.0 + k), p(0.0, 50.0 - k)),
    ];
    let circle = PathGeometry::new(vec![Contour::new(anchors.clone())]);
    assert_eq!(classify(&circle), ContainerKind::Ellipse);

    // Same anchors with one handle pair flipped is not a convex ellipse.
    let mut flipped = anchors;
    flipped[1] = Anchor::new(p(100.0, 50.0), p(100.0, 50.0 + k), p(100.0, 50.0 - k));
    let flipped = PathGeometry::new(vec![Contour::new(flipped)]);
    assert_eq!(classify(&flipped), ContainerKind::Path);
}

#[test]
fn test_short_handle_diamond_keeps_tiles_inside_outline() {
    let diamond = short_handle_diamond();
    let outline = flatten_path(&diamond, DEFAULT_FLATTEN_STEPS);

    let mut canvas = Canvas::new();
    let container = canvas.add_path("Diamond", diamond);
    let tile = canvas.add_rectangle(0.0, 0.0, 10.0, 10.0);
    let session = TileInstantiator::new()
        .generate(&mut canvas, container, tile, &GridParams::default())
        .unwrap();

    assert_eq!(session.report().container_kind, ContainerKind::Path);
    assert!(!session.is_empty());
    for instance in session.instances() {
        assert!(
            rect_fully_inside(&instance.bounds, &outline, 0.0),
            "{:?} lies outside the outline",
            instance.bounds
        );
    }
    // Corner region that an analytic circle test would accept.
    assert!(!session
        .instances()
        .iter()
        .any(|i| i.bounds == BoundingBox::new(20.0, 10.0, 30.0, 20.0)));
    session.discard(&mut canvas);
}

#[test]
fn test_rectangle_contains_rect_is_inclusive() {
    let bb = BoundingBox::from_origin_size(0.0, 0.0, 100.0, 100.0);
    let shape = ContainerClassifier::default()
        .classify(&PathGeometry::rectangle(&bb))
        .unwrap();
    assert!(shape.contains_rect(&BoundingBox::new(0.0, 0.0, 100.0, 100.0), 0.0));
    assert!(!shape.contains_rect(&BoundingBox::new(0.0, 0.0, 100.0, 100.0), 1.0));
    assert!(shape.contains_rect(&BoundingBox::new(1.0, 1.0, 99.0, 99.0), 1.0));
}

#[test]
fn test_ellipse_rejects_bbox_corner() {
    let shape = ContainerClassifier::default()
        .classify(&PathGeometry::circle(Point::new(100.0, 100.0), 100.0))
        .unwrap();
    // Inside the bounding box but past the curve near the corner.
    assert!(!shape.contains_rect(&BoundingBox::from_origin_size(5.0, 5.0, 20.0, 20.0), 0.0));
    assert!(shape.contains_rect(&BoundingBox::from_origin_size(90.0, 90.0, 20.0, 20.0), 0.0));
    assert!(shape.contains_point(Point::new(100.0, 1.0)));
    assert!(!shape.contains_point(Point::new(1.0, 1.0)));
}

#[test]
fn test_compound_respects_hole() {
    let outer = BoundingBox::from_origin_size(0.0, 0.0, 100.0, 100.0);
    let shape = ContainerClassifier::default()
        .classify(&PathGeometry::with_hole(
            PathGeometry::rectangle(&outer),
            PathGeometry::rectangle(&outer.inset(30.0)),
        ))
        .unwrap();
    assert!(shape.contains_rect(&BoundingBox::from_origin_size(5.0, 5.0, 20.0, 20.0), 0.0));
    assert!(!shape.contains_rect(&BoundingBox::from_origin_size(40.0, 40.0, 20.0, 20.0), 0.0));
    assert!(!shape.contains_rect(&BoundingBox::from_origin_size(20.0, 20.0, 20.0, 20.0), 0.0));
}

#[test]
fn test_single_anchor_contour_unsupported() {
    let path = PathGeometry::new(vec![Contour::from_points(&[Point::new(1.0, 1.0)])]);
    let err = ContainerClassifier::default().classify(&path).unwrap_err();
    assert!(matches!(err, TileError::UnsupportedShape(_)));
}

#[test]
fn test_flatten_steps_clamped() {
    assert_eq!(ContainerClassifier::new(0).flatten_steps(), 1);
    assert_eq!(ContainerClassifier::default().flatten_steps(), 16);
}
