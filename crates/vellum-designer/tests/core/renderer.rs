use glam::{Mat4, Vec3};
use vellum_designer::model::{Path, Point, ShapeKind};
use vellum_designer::renderer::BufferKind;
use vellum_designer::{Camera, Canvas, FixedCamera, RecordingTarget, Shape, ShapeRenderer};

#[test]
fn test_draw_submits_real_index_count() {
    let mut shape = Shape::rectangle();
    shape.re_transform(100.0, 100.0, Point::ORIGIN).unwrap();

    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();
    renderer.draw(&shape, &FixedCamera::default(), &mut target);

    assert_eq!(target.draws().len(), 1);
    let call = target.draws()[0];
    assert_eq!(call.index_count, 6);

    // The uploaded index buffer is padded to a multiple of four.
    let indices = target.buffer(call.indices).unwrap();
    assert_eq!(indices.kind, BufferKind::Index);
    assert_eq!(indices.data.len(), 8 * std::mem::size_of::<u16>());
}

#[test]
fn test_uniform_holds_camera_times_model() {
    let mut shape = Shape::rectangle();
    shape.set_rotation(std::f64::consts::FRAC_PI_2).unwrap();
    let camera = FixedCamera::new(
        Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)),
        Mat4::IDENTITY,
    );

    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();
    renderer.draw(&shape, &camera, &mut target);

    let uniform = target.uniform_matrix(target.draws()[0].uniform).unwrap();
    let expected = camera.view_projection_matrix() * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2);
    assert!(uniform.abs_diff_eq(expected, 1e-6));
}

#[test]
fn test_buffers_reused_until_generation_changes() {
    let mut shape = Shape::rectangle();
    let camera = FixedCamera::default();
    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();

    renderer.draw(&shape, &camera, &mut target);
    renderer.draw(&shape, &camera, &mut target);
    assert_eq!(renderer.upload_count(), 1);
    let buffers = target.buffers().len();

    // Rotation does not change geometry.
    shape.set_rotation(0.5).unwrap();
    renderer.draw(&shape, &camera, &mut target);
    assert_eq!(renderer.upload_count(), 1);

    shape.set_width(3.0).unwrap();
    renderer.draw(&shape, &camera, &mut target);
    assert_eq!(renderer.upload_count(), 2);
    // New vertex and index buffers; the uniform is kept.
    assert_eq!(target.buffers().len(), buffers + 2);
}

#[test]
fn test_empty_meshes_are_still_submitted() {
    let mut path = Path::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(1.0, 1.0));
    path.close();
    let shape = Shape::from_path(ShapeKind::Rectangle, path);
    assert_eq!(shape.meshes().len(), 1);

    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();
    renderer.draw(&shape, &FixedCamera::default(), &mut target);

    assert!(target.draws().is_empty());
    assert_eq!(target.empty_draws(), 1);
}

#[test]
fn test_evict_and_retain() {
    let mut canvas = Canvas::default();
    let a = canvas.add_rectangle(Point::ORIGIN, 10.0, 10.0).unwrap();
    let b = canvas.add_rectangle(Point::new(20.0, 0.0), 10.0, 10.0).unwrap();

    let camera = FixedCamera::default();
    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();
    canvas.draw(&camera, &mut renderer, &mut target);
    assert_eq!(renderer.cached_len(), 2);
    assert_eq!(target.triangle_count(), 4);

    canvas.remove(a);
    target.clear_draws();
    canvas.draw(&camera, &mut renderer, &mut target);
    assert!(!renderer.is_cached(a));
    assert!(renderer.is_cached(b));
    assert_eq!(target.triangle_count(), 2);

    assert!(renderer.evict(b));
    assert!(!renderer.evict(b));
    assert_eq!(renderer.cached_len(), 0);
}
