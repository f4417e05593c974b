use vellum_designer::model::{Path, PathCommand, Point};

#[test]
fn test_commands_keep_insertion_order() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(1.0, 0.0));
    path.cubic_to(
        Point::new(1.0, 1.0),
        Point::new(1.5, 0.25),
        Point::new(1.5, 0.75),
    );
    path.close();

    assert_eq!(path.len(), 4);
    assert!(matches!(path.commands()[2], PathCommand::CubicTo { .. }));
    assert_eq!(path.commands()[3], PathCommand::Close);
}

#[test]
fn test_clear_empties_path() {
    let mut path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    assert!(!path.is_empty());
    path.clear();
    assert!(path.is_empty());
    assert!(path.contours(0.1).is_empty());
}

#[test]
fn test_empty_and_single_point_paths() {
    assert!(Path::new().contours(0.1).is_empty());

    let mut path = Path::new();
    path.move_to(Point::new(3.0, 4.0));
    // Never closed and never followed by another move.
    assert!(path.contours(0.1).is_empty());
}

#[test]
fn test_close_then_move_gives_separate_rings() {
    let mut path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    path.move_to(Point::new(5.0, 5.0));
    path.line_to(Point::new(6.0, 5.0));
    path.line_to(Point::new(5.0, 6.0));
    path.close();

    let rings = path.contours(0.1);
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].len(), 3);
    assert_eq!(rings[1].len(), 3);
}

#[test]
fn test_transformed_leaves_original() {
    let path = Path::from_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ]);
    let moved = path.transformed(&glam::DMat4::from_translation(glam::DVec3::new(5.0, 0.0, 0.0)));
    assert_eq!(path.points().next(), Some(Point::new(0.0, 0.0)));
    assert_eq!(moved.points().next(), Some(Point::new(5.0, 0.0)));
}

#[test]
fn test_flattened_curve_points_lie_on_curve() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.quadratic_to(Point::new(2.0, 0.0), Point::new(1.0, 2.0));
    path.close();

    // B(t) = (2t, 4t(1-t)), so y = 4 * (x/2) * (1 - x/2).
    for p in &path.contours(0.01)[0] {
        let t = p.x / 2.0;
        assert!((p.y - 4.0 * t * (1.0 - t)).abs() < 1e-9);
    }
}
