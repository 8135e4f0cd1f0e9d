use proptest::prelude::*;
use tilefit_designer::{BoundingBox, GridParams, GridPlanner, GridSpec, TileError, MAX_PLAN_CELLS};

fn tile(w: f64, h: f64) -> BoundingBox {
    BoundingBox::from_origin_size(0.0, 0.0, w, h)
}

#[test]
fn test_plan_starts_at_container_top_left() {
    let container = BoundingBox::from_origin_size(100.0, 50.0, 100.0, 60.0);
    let cells = GridPlanner::plan(&container, &tile(20.0, 20.0), &GridParams::default()).unwrap();

    assert_eq!(cells.len(), 5 * 3);
    assert_eq!((cells[0].origin_x, cells[0].origin_y), (100.0, 50.0));
    let last = cells.last().unwrap();
    assert_eq!((last.row, last.col), (2, 4));
    assert_eq!((last.origin_x, last.origin_y), (180.0, 90.0));
}

#[test]
fn test_row_major_order() {
    let container = tile(100.0, 100.0);
    let cells = GridPlanner::plan(&container, &tile(30.0, 30.0), &GridParams::default()).unwrap();
    let order: Vec<(u32, u32)> = cells.iter().map(|c| (c.row, c.col)).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(cells.len(), 16);
}

#[test]
fn test_gap_and_scale() {
    let container = tile(400.0, 300.0);
    let params = GridParams::default().with_gap(10.0, 5.0).with_scale(50.0);
    let spec = GridSpec::new(&tile(40.0, 40.0), &params).unwrap();
    assert_eq!(spec.effective_tile_size(), (20.0, 20.0));
    assert_eq!(spec.step(), (30.0, 25.0));

    let layout = GridPlanner::layout(&container, &spec).unwrap();
    assert_eq!(layout.columns, 14);
    assert_eq!(layout.rows, 12);
}

#[test]
fn test_brick_offsets_odd_rows() {
    let container = tile(400.0, 300.0);
    let params = GridParams::default().with_brick(true);
    let cells = GridPlanner::plan(&container, &tile(50.0, 50.0), &params).unwrap();

    assert_eq!(cells.len(), 9 * 6);
    for cell in &cells {
        let expected = f64::from(cell.col) * 50.0 + if cell.row % 2 == 1 { 25.0 } else { 0.0 };
        assert_eq!(cell.origin_x, expected);
    }
}

#[test]
fn test_collapsed_step_is_invalid() {
    let params = GridParams::default().with_gap(-50.0, 0.0);
    let err = GridSpec::new(&tile(50.0, 50.0), &params).unwrap_err();
    assert!(matches!(err, TileError::InvalidInput(_)));
    assert!(GridPlanner::plan(&tile(100.0, 100.0), &tile(50.0, 50.0), &params)
        .unwrap()
        .is_empty());
}

#[test]
fn test_huge_grid_is_refused() {
    let container = tile(1e9, 1e9);
    let err = GridPlanner::plan(&container, &tile(1.0, 1.0), &GridParams::default()).unwrap_err();
    assert!(matches!(err, TileError::InvalidInput(_)));

    // A million cells is well under the ceiling.
    let spec = GridSpec::new(&tile(1.0, 1.0), &GridParams::default()).unwrap();
    let layout = GridPlanner::layout(&container, &spec).unwrap();
    assert!(layout.total_cells() > MAX_PLAN_CELLS);
    let cells = GridPlanner::plan(&tile(1000.0, 1000.0), &tile(1.0, 1.0), &GridParams::default())
        .unwrap();
    assert_eq!(cells.len() as u64, 1_000_000);
}

#[test]
fn test_negative_gap_overlaps_tiles() {
    let params = GridParams::default().with_gap(-10.0, -10.0);
    let spec = GridSpec::new(&tile(50.0, 50.0), &params).unwrap();
    assert_eq!(spec.step(), (40.0, 40.0));
}

#[test]
fn test_invalid_params() {
    for params in [
        GridParams::default().with_scale(0.0),
        GridParams::default().with_scale(f64::NAN),
        GridParams::default().with_margin(f64::INFINITY),
        GridParams::default().with_gap(f64::NAN, 0.0),
    ] {
        assert!(!params.is_valid());
    }
    let err = GridSpec::new(&tile(0.0, 10.0), &GridParams::default()).unwrap_err();
    assert!(matches!(err, TileError::InvalidInput(_)));
}

proptest! {
    #[test]
    fn plan_is_deterministic(
        w in 10.0f64..500.0,
        h in 10.0f64..500.0,
        t in 5.0f64..60.0,
        gap in 0.0f64..10.0,
        brick in any::<bool>(),
    ) {
        let container = tile(w, h);
        let params = GridParams::default().with_gap(gap, gap).with_brick(brick);
        let a = GridPlanner::plan(&container, &tile(t, t), &params).unwrap();
        let b = GridPlanner::plan(&container, &tile(t, t), &params).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn grid_covers_container(
        w in 10.0f64..500.0,
        h in 10.0f64..500.0,
        t in 5.0f64..60.0,
        brick in any::<bool>(),
    ) {
        let container = tile(w, h);
        let params = GridParams::default().with_brick(brick);
        let spec = GridSpec::new(&tile(t, t), &params).unwrap();
        let layout = GridPlanner::layout(&container, &spec).unwrap();

        // Every column and row starts inside the container.
        prop_assert!(f64::from(layout.columns - 1) * layout.step_x < w + layout.step_x / 2.0);
        prop_assert!(f64::from(layout.rows - 1) * layout.step_y < h);
        // ... and together they reach its far edges.
        prop_assert!(f64::from(layout.columns) * layout.step_x >= w - 1e-6);
        prop_assert!(f64::from(layout.rows) * layout.step_y >= h - 1e-6);
    }
}
