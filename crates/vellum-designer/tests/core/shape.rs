use vellum_core::GeometryError;
use vellum_designer::model::{Path, Point, ShapeKind};
use vellum_designer::{Shape, ShapeOptions};
use vellum_settings::{DimensionPolicy, HitTestMode, RebuildPolicy};

fn corners(shape: &Shape) -> Vec<(f32, f32)> {
    shape.meshes()[0]
        .vertices()
        .chunks_exact(2)
        .map(|xy| (xy[0], xy[1]))
        .collect()
}

#[test]
fn test_fresh_rectangle_is_unit_square() {
    let shape = Shape::rectangle();
    assert_eq!(shape.meshes().len(), 1);
    assert_eq!(
        shape.meshes()[0].vertices(),
        &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]
    );
    assert_eq!(shape.meshes()[0].index_count(), 6);
    assert_eq!(shape.meshes()[0].indices().len() % 4, 0);
}

#[test]
fn test_set_width_scales_about_position() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 100.0, Point::new(0.0, 0.0)).unwrap();
    shape.set_width(50.0).unwrap();

    assert_eq!(
        corners(&shape),
        vec![(0.0, 0.0), (50.0, 0.0), (50.0, 100.0), (0.0, 100.0)]
    );
    assert_eq!(shape.bounds().size(), (50.0, 100.0));
}

#[test]
fn test_set_width_keeps_position() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 100.0, Point::new(200.0, 200.0)).unwrap();
    shape.set_width(40.0).unwrap();

    assert_eq!(shape.position(), Point::new(200.0, 200.0));
    assert_eq!(shape.bounds().min(), Point::new(200.0, 200.0));
    assert_eq!(shape.bounds().max(), Point::new(240.0, 300.0));
}

#[test]
fn test_move_by_translates_bounds() {
    let mut shape = Shape::rectangle();
    shape.re_transform(10.0, 10.0, Point::new(0.0, 0.0)).unwrap();
    shape.move_by(Point::new(5.0, -5.0)).unwrap();
    assert_eq!(shape.bounds().min(), Point::new(5.0, -5.0));
    assert_eq!(shape.bounds().max(), Point::new(15.0, 5.0));
}

#[test]
fn test_repeated_resize_is_bit_identical() {
    let mut shape = Shape::regular_polygon(7).unwrap();
    shape.re_transform(123.456, 78.9, Point::new(-3.3, 17.1)).unwrap();
    let first: Vec<Vec<f32>> = shape.meshes().iter().map(|m| m.vertices().to_vec()).collect();

    for _ in 0..10 {
        shape.set_width(123.456).unwrap();
        shape.set_height(78.9).unwrap();
        shape.set_position(Point::new(-3.3, 17.1)).unwrap();
    }
    let again: Vec<Vec<f32>> = shape.meshes().iter().map(|m| m.vertices().to_vec()).collect();
    assert_eq!(first, again);
}

#[test]
fn test_round_trip_after_path_edit() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 50.0, Point::new(10.0, 10.0)).unwrap();
    shape.add_point(Point::new(60.0, 80.0));

    shape.set_width(200.0).unwrap();
    let first = shape.meshes()[0].vertices().to_vec();
    shape.set_width(200.0).unwrap();
    assert_eq!(shape.meshes()[0].vertices(), first.as_slice());
}

#[test]
fn test_zero_dimension_rejected_by_default() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 100.0, Point::ORIGIN).unwrap();
    let before = shape.meshes()[0].vertices().to_vec();
    let generation = shape.generation();

    assert_eq!(
        shape.set_width(0.0),
        Err(GeometryError::DegenerateTransform {
            width: 0.0,
            height: 100.0
        })
    );
    assert!(shape.set_height(-5.0).is_err());
    assert_eq!(shape.width(), 100.0);
    assert_eq!(shape.meshes()[0].vertices(), before.as_slice());
    assert_eq!(shape.generation(), generation);

    // Still recoverable afterwards.
    shape.set_width(25.0).unwrap();
    assert_eq!(shape.bounds().size(), (25.0, 100.0));
}

#[test]
fn test_zero_dimension_clamped_when_configured() {
    let options = ShapeOptions {
        dimension_policy: DimensionPolicy::Clamp,
        min_dimension: 0.5,
        ..ShapeOptions::default()
    };
    let mut shape = Shape::rectangle().with_options(options);
    shape.re_transform(0.0, -1.0, Point::ORIGIN).unwrap();
    assert_eq!(shape.width(), 0.5);
    assert_eq!(shape.height(), 0.5);

    // Clamped shapes still scale back up cleanly.
    shape.re_transform(10.0, 10.0, Point::ORIGIN).unwrap();
    assert_eq!(shape.bounds().size(), (10.0, 10.0));
}

#[test]
fn test_hit_test_boundaries() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 100.0, Point::new(20.0, 30.0)).unwrap();

    let min = shape.bounds().min();
    let max = shape.bounds().max();
    assert!(shape.is_point_colliding(min));
    assert!(shape.is_point_colliding(max));
    assert!(!shape.is_point_colliding(Point::new(max.x + 1e-6, max.y)));
    assert!(!shape.is_point_colliding(Point::new(min.x, min.y - 1e-6)));
}

#[test]
fn test_polygon_hit_test_mode() {
    let options = ShapeOptions {
        hit_test: HitTestMode::Polygon,
        ..ShapeOptions::default()
    };
    let mut shape = Shape::triangle().with_options(options);
    shape.re_transform(100.0, 100.0, Point::ORIGIN).unwrap();

    // Inside the bounding box but outside the triangle.
    assert!(!shape.is_point_colliding(Point::new(5.0, 5.0)));
    assert!(shape.is_point_colliding(Point::new(50.0, 80.0)));

    let mut loose = Shape::triangle();
    loose.re_transform(100.0, 100.0, Point::ORIGIN).unwrap();
    assert!(loose.is_point_colliding(Point::new(5.0, 5.0)));
}

#[test]
fn test_deferred_rebuild_waits_for_flush() {
    let options = ShapeOptions {
        rebuild: RebuildPolicy::Deferred,
        ..ShapeOptions::default()
    };
    let mut shape = Shape::rectangle().with_options(options);
    let generation = shape.generation();

    shape.set_width(10.0).unwrap();
    assert!(shape.is_dirty());
    assert_eq!(shape.generation(), generation);
    assert_eq!(shape.bounds().size(), (1.0, 1.0));

    assert!(shape.rebuild_if_dirty());
    assert!(!shape.is_dirty());
    assert_eq!(shape.bounds().size(), (10.0, 1.0));
    assert!(!shape.rebuild_if_dirty());
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut shape = Shape::regular_polygon(5).unwrap();
    shape.re_transform(40.0, 40.0, Point::new(1.0, 2.0)).unwrap();
    let meshes = shape.meshes().to_vec();
    let bounds = *shape.bounds();

    shape.rebuild();
    assert_eq!(shape.meshes(), meshes.as_slice());
    assert_eq!(*shape.bounds(), bounds);
}

#[test]
fn test_degenerate_path_gives_empty_mesh() {
    let mut path = Path::new();
    path.move_to(Point::new(1.0, 1.0));
    path.line_to(Point::new(2.0, 2.0));
    path.close();

    let shape = Shape::from_path(ShapeKind::Pen, path);
    assert!(shape.meshes().iter().all(|m| m.is_empty()));
    // Two points are not enough for a box.
    assert!(shape.bounds().is_empty());
}

#[test]
fn test_multi_contour_path_meshes() {
    let mut path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
    ]);
    path.move_to(Point::new(5.0, 5.0));
    path.line_to(Point::new(6.0, 5.0));
    path.line_to(Point::new(6.0, 6.0));
    path.close();

    let shape = Shape::from_path(ShapeKind::Rectangle, path);
    assert_eq!(shape.meshes().len(), 2);
    assert_eq!(shape.bounds().min(), Point::new(0.0, 0.0));
    assert_eq!(shape.bounds().max(), Point::new(6.0, 6.0));
}

#[test]
fn test_curved_path_is_flattened_into_mesh() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(1.0, 0.0));
    path.cubic_to(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    );
    path.close();

    let shape = Shape::from_path(ShapeKind::Pen, path);
    let vertices: usize = shape.meshes().iter().map(|m| m.vertex_count()).sum();
    assert!(vertices > 3);
    assert!(shape.meshes().iter().any(|m| m.index_count() > 0));
}

fn filled_area(shape: &Shape) -> f64 {
    shape.meshes().iter().map(|m| m.area()).sum()
}

#[test]
fn test_small_shape_far_from_origin_is_filled() {
    let mut shape = Shape::rectangle();
    shape.re_transform(1.0, 1.0, Point::new(1e6, 1e6)).unwrap();
    assert_eq!(shape.meshes()[0].index_count(), 6);
    assert!((filled_area(&shape) - 1.0).abs() < 1e-6);

    shape.re_transform(5.0, 5.0, Point::new(5e6, 0.0)).unwrap();
    assert_eq!(shape.meshes()[0].index_count(), 6);
    assert!((filled_area(&shape) - 25.0).abs() < 1e-6);
}

#[test]
fn test_polygon_hit_test_inside_pen_overlap() {
    let mut path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ]);
    path.move_to(Point::new(1.0, 1.0));
    path.line_to(Point::new(3.0, 1.0));
    path.line_to(Point::new(3.0, 3.0));
    path.line_to(Point::new(1.0, 3.0));
    path.close();

    let options = ShapeOptions {
        hit_test: HitTestMode::Polygon,
        ..ShapeOptions::default()
    };
    let shape = Shape::from_path(ShapeKind::Pen, path).with_options(options);

    // The overlap is drawn, so it must also be hit.
    assert!(shape.is_point_colliding(Point::new(1.5, 1.5)));
    assert!(shape.is_point_colliding(Point::new(0.5, 0.5)));
    assert!(shape.is_point_colliding(Point::new(2.5, 2.5)));
    // Inside the bounds, outside both squares.
    assert!(!shape.is_point_colliding(Point::new(2.5, 0.5)));
    assert!((filled_area(&shape) - 7.0).abs() < 1e-3);
}

#[test]
fn test_polygon_hit_test_misses_hole() {
    let mut path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]);
    // Clockwise inner contour
    path.move_to(Point::new(3.0, 3.0));
    path.line_to(Point::new(3.0, 7.0));
    path.line_to(Point::new(7.0, 7.0));
    path.line_to(Point::new(7.0, 3.0));
    path.close();

    let options = ShapeOptions {
        hit_test: HitTestMode::Polygon,
        ..ShapeOptions::default()
    };
    let shape = Shape::from_path(ShapeKind::Rectangle, path).with_options(options);
    assert!(!shape.is_point_colliding(Point::new(5.0, 5.0)));
    assert!(shape.is_point_colliding(Point::new(1.0, 5.0)));
}

#[test]
fn test_self_intersecting_pen_shape_fills_both_lobes() {
    // Unit bow tie: two triangles meeting at (0.5, 0.5).
    let path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    let shape = Shape::from_path(ShapeKind::Pen, path);

    assert!(shape.meshes().iter().any(|m| !m.is_empty()));
    assert!((filled_area(&shape) - 0.5).abs() < 1e-3);
    let (w, h) = shape.bounds().size();
    assert!((w - 1.0).abs() < 1e-3 && (h - 1.0).abs() < 1e-3);
}

#[test]
fn test_rotation_leaves_hit_test_unchanged() {
    let options = ShapeOptions {
        hit_test: HitTestMode::Polygon,
        ..ShapeOptions::default()
    };
    let mut shape = Shape::rectangle().with_options(options);
    shape.re_transform(10.0, 10.0, Point::new(20.0, 0.0)).unwrap();
    let bounds = *shape.bounds();

    shape.set_rotation(std::f64::consts::FRAC_PI_2).unwrap();
    assert_eq!(*shape.bounds(), bounds);
    assert!(shape.is_point_colliding(Point::new(25.0, 5.0)));
    // Where a quarter turn about the origin would place the square.
    assert!(!shape.is_point_colliding(Point::new(-5.0, 25.0)));
}
