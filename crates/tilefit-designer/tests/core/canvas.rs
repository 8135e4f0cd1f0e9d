use tilefit_designer::{BoundingBox, Canvas, HostDocument, HostError, Point, ShapeId};

#[test]
fn test_canvas_creation() {
    let canvas = Canvas::new();
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_duplicate_path() {
    let mut canvas = Canvas::new();
    let rect = canvas.add_rectangle(10.0, 10.0, 30.0, 20.0);
    let copy = canvas.duplicate(rect).unwrap();

    assert_ne!(rect, copy);
    assert_eq!(canvas.shape_count(), 2);
    assert_eq!(canvas.get_shape(copy).unwrap().name, "Rectangle copy");
    assert_eq!(canvas.geometry(rect).unwrap(), canvas.geometry(copy).unwrap());
}

#[test]
fn test_set_position_moves_top_left() {
    let mut canvas = Canvas::new();
    let ellipse = canvas.add_ellipse(Point::new(0.0, 0.0), 20.0, 10.0);
    canvas.set_position(ellipse, 100.0, 50.0).unwrap();

    let bb = canvas.bounding_box(ellipse).unwrap();
    assert!((bb.left - 100.0).abs() < 1e-9);
    assert!((bb.top - 50.0).abs() < 1e-9);
    assert!((bb.width() - 40.0).abs() < 1e-9);
}

#[test]
fn test_uniform_scale_keeps_top_left() {
    let mut canvas = Canvas::new();
    let rect = canvas.add_rectangle(10.0, 20.0, 40.0, 40.0);
    canvas.set_uniform_scale(rect, 50.0).unwrap();
    assert_eq!(
        canvas.bounding_box(rect).unwrap(),
        BoundingBox::from_origin_size(10.0, 20.0, 20.0, 20.0)
    );

    let err = canvas.set_uniform_scale(rect, 0.0).unwrap_err();
    assert!(matches!(err, HostError::Rejected(_)));
}

#[test]
fn test_group_bounds_and_geometry() {
    let mut canvas = Canvas::new();
    let a = canvas.add_rectangle(0.0, 0.0, 10.0, 10.0);
    let b = canvas.add_rectangle(30.0, 40.0, 10.0, 10.0);
    let group = canvas.group(&[a, b]).unwrap();

    assert_eq!(
        canvas.bounding_box(group).unwrap(),
        BoundingBox::new(0.0, 0.0, 40.0, 50.0)
    );
    assert_eq!(canvas.get_shape(a).unwrap().group_id, Some(group));
    assert_eq!(canvas.geometry(group), Err(HostError::NotAPath(group)));
}

#[test]
fn test_group_moves_as_one() {
    let mut canvas = Canvas::new();
    let a = canvas.add_rectangle(0.0, 0.0, 10.0, 10.0);
    let b = canvas.add_rectangle(20.0, 0.0, 10.0, 10.0);
    let group = canvas.group(&[a, b]).unwrap();

    canvas.set_position(group, 100.0, 100.0).unwrap();
    assert_eq!(
        canvas.bounding_box(b).unwrap(),
        BoundingBox::from_origin_size(120.0, 100.0, 10.0, 10.0)
    );
}

#[test]
fn test_duplicate_group_is_deep() {
    let mut canvas = Canvas::new();
    let a = canvas.add_rectangle(0.0, 0.0, 10.0, 10.0);
    let b = canvas.add_rectangle(20.0, 0.0, 10.0, 10.0);
    let group = canvas.group(&[a, b]).unwrap();

    let copy = canvas.duplicate(group).unwrap();
    assert_eq!(canvas.shape_count(), 6);
    let members = canvas.get_shape(copy).unwrap().members().to_vec();
    assert_eq!(members.len(), 2);
    assert!(!members.contains(&a) && !members.contains(&b));
}

#[test]
fn test_unknown_shape() {
    let mut canvas = Canvas::new();
    let ghost = ShapeId(42);
    assert_eq!(canvas.remove(ghost), Err(HostError::UnknownShape(ghost)));
    assert_eq!(canvas.duplicate(ghost), Err(HostError::UnknownShape(ghost)));
    assert!(canvas.group(&[]).is_err());
    assert!(!canvas.remove_shape(ghost));
}
