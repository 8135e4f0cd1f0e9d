use proptest::prelude::*;
use tilefit_designer::{
    BoundingBox, Canvas, ContainerKind, GridParams, HostDocument, PathGeometry, Point,
    PreviewSession, ShapeId, TileInstantiator,
};

fn rect_scene(w: f64, h: f64, tile: f64) -> (Canvas, ShapeId, ShapeId) {
    let mut canvas = Canvas::new();
    let container = canvas.add_rectangle(0.0, 0.0, w, h);
    // The tile source sits away from the container on purpose.
    let tile = canvas.add_rectangle(1000.0, 1000.0, tile, tile);
    (canvas, container, tile)
}

fn generate(
    canvas: &mut Canvas,
    container: ShapeId,
    tile: ShapeId,
    params: &GridParams,
) -> PreviewSession {
    TileInstantiator::new()
        .generate(canvas, container, tile, params)
        .unwrap()
}

#[test]
fn test_scenario_a_rectangle_fill() {
    let (mut canvas, container, tile) = rect_scene(400.0, 300.0, 50.0);
    let session = generate(&mut canvas, container, tile, &GridParams::default());

    let report = session.report();
    assert_eq!(report.container_kind, ContainerKind::Rectangle);
    assert_eq!((report.columns, report.rows), (8, 6));
    assert_eq!(report.candidates, 48);
    assert_eq!(report.retained, 48);
    assert_eq!(report.rejected, 0);
    assert_eq!(session.len(), 48);

    let first = &session.instances()[0];
    assert_eq!(first.bounds, BoundingBox::from_origin_size(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn test_scenario_b_brick_drops_row_ends() {
    let (mut canvas, container, tile) = rect_scene(400.0, 300.0, 50.0);
    let params = GridParams::default().with_brick(true);
    let session = generate(&mut canvas, container, tile, &params);

    assert!(session.len() < 48);
    assert_eq!(session.len(), 3 * 8 + 3 * 7);
    for instance in session.instances() {
        if instance.cell.row % 2 == 1 {
            assert_eq!(instance.bounds.left, f64::from(instance.cell.col) * 50.0 + 25.0);
            assert!(instance.cell.col < 7);
        }
    }
}

#[test]
fn test_scenario_c_circle() {
    let mut canvas = Canvas::new();
    let container = canvas.add_circle(Point::new(100.0, 100.0), 100.0);
    let tile = canvas.add_rectangle(0.0, 0.0, 20.0, 20.0);
    let params = GridParams::default().with_gap(5.0, 5.0);
    let session = generate(&mut canvas, container, tile, &params);

    let report = session.report();
    assert_eq!(report.container_kind, ContainerKind::Ellipse);
    assert_eq!(report.candidates, 64);
    assert!(report.retained < 64);
    assert!(report.retained > 0);

    for instance in session.instances() {
        for c in instance.bounds.corners() {
            let d = c.distance_to(&Point::new(100.0, 100.0));
            assert!(d <= 100.0 + 1e-6, "corner {:?} outside circle", c);
        }
    }
}

#[test]
fn test_scenario_d_margin_excludes_band() {
    let (mut canvas, container, tile) = rect_scene(400.0, 300.0, 50.0);
    let plain = generate(&mut canvas, container, tile, &GridParams::default());
    let with_margin = generate(
        &mut canvas,
        container,
        tile,
        &GridParams::default().with_margin(10.0),
    );

    assert!(with_margin.len() < plain.len());
    assert_eq!(with_margin.len(), 6 * 4);

    let band = BoundingBox::from_origin_size(0.0, 0.0, 400.0, 300.0).inset(10.0);
    for instance in plain.instances() {
        let in_band = !band.contains_box(&instance.bounds, 0.0);
        let kept = with_margin
            .instances()
            .iter()
            .any(|i| i.cell == instance.cell);
        assert_eq!(kept, !in_band, "cell {:?}", instance.cell);
    }
}

#[test]
fn test_compound_container_with_hole() {
    let mut canvas = Canvas::new();
    let outer = BoundingBox::from_origin_size(0.0, 0.0, 200.0, 200.0);
    let hole = BoundingBox::new(50.0, 50.0, 150.0, 150.0);
    let container = canvas.add_path(
        "Frame",
        PathGeometry::with_hole(PathGeometry::rectangle(&outer), PathGeometry::rectangle(&hole)),
    );
    let tile = canvas.add_rectangle(0.0, 0.0, 20.0, 20.0);
    let session = generate(&mut canvas, container, tile, &GridParams::default());

    assert_eq!(session.report().container_kind, ContainerKind::CompoundPath);
    // Tiles touching the outline are rejected, as are tiles over the hole.
    assert_eq!(session.len(), 8 * 8 - 6 * 6);
    for instance in session.instances() {
        let (w, h) = instance.bounds.overlap(&hole);
        assert!(w * h == 0.0);
    }
}

#[test]
fn test_scaled_tiles() {
    let (mut canvas, container, tile) = rect_scene(400.0, 300.0, 100.0);
    let params = GridParams::default().with_scale(50.0);
    let session = generate(&mut canvas, container, tile, &params);
    assert_eq!(session.len(), 48);
    assert_eq!(
        session.instances()[1].bounds,
        BoundingBox::from_origin_size(50.0, 0.0, 50.0, 50.0)
    );
    // The source keeps its size.
    assert_eq!(
        canvas.bounding_box(tile).unwrap(),
        BoundingBox::from_origin_size(1000.0, 1000.0, 100.0, 100.0)
    );
}

#[test]
fn test_zero_survivors_is_not_an_error() {
    let (mut canvas, container, tile) = rect_scene(10.0, 10.0, 50.0);
    let session = generate(&mut canvas, container, tile, &GridParams::default());

    assert!(session.is_empty());
    assert_eq!(session.group(), None);
    assert_eq!(session.report().rejected, 1);
    assert_eq!(canvas.shape_count(), 2);
}

#[test]
fn test_sources_untouched() {
    let (mut canvas, container, tile) = rect_scene(400.0, 300.0, 50.0);
    let before = (
        canvas.geometry(container).unwrap(),
        canvas.geometry(tile).unwrap(),
    );
    let session = generate(&mut canvas, container, tile, &GridParams::default());
    session.discard(&mut canvas);
    let after = (
        canvas.geometry(container).unwrap(),
        canvas.geometry(tile).unwrap(),
    );
    assert_eq!(before, after);
    assert_eq!(canvas.shape_count(), 2);
}

#[test]
fn test_idempotent_generation() {
    let mut canvas = Canvas::new();
    let container = canvas.add_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(300.0, 40.0),
        Point::new(260.0, 280.0),
        Point::new(20.0, 200.0),
    ]);
    let tile = canvas.add_ellipse(Point::new(0.0, 0.0), 12.0, 8.0);
    let params = GridParams::default().with_gap(3.0, 2.0).with_brick(true);

    let first = generate(&mut canvas, container, tile, &params);
    let placements = |s: &PreviewSession| {
        s.instances()
            .iter()
            .map(|i| (i.cell, i.bounds))
            .collect::<Vec<_>>()
    };
    let a = (*first.report(), placements(&first));
    first.discard(&mut canvas);

    let second = generate(&mut canvas, container, tile, &params);
    let b = (*second.report(), placements(&second));
    assert_eq!(a, b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn convex_fill_close_to_area_ratio(
        w in 60.0f64..400.0,
        h in 60.0f64..400.0,
        t in 10.0f64..40.0,
    ) {
        let (mut canvas, container, tile) = rect_scene(w, h, t);
        let session = generate(&mut canvas, container, tile, &GridParams::default());

        let ideal = ((w * h) / (t * t)).floor() as usize;
        let report = session.report();
        prop_assert!(report.retained <= ideal);
        let tolerance = (report.columns + report.rows) as usize;
        prop_assert!(report.retained + tolerance >= ideal);

        let boxes: Vec<BoundingBox> = session.instances().iter().map(|i| i.bounds).collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                let (ow, oh) = a.overlap(b);
                prop_assert!(ow * oh < 1e-6);
            }
        }
    }
}
