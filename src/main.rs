use std::f64::consts::FRAC_PI_4;

use vellum::{
    init_logging, Canvas, EngineSettings, FixedCamera, PenTool, Point, RecordingTarget,
    ShapeKind, ShapeRenderer, BUILD_DATE, VERSION,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, built = BUILD_DATE, "Starting Vellum demo");

    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::load_from_file(std::path::Path::new(&path))?,
        None => EngineSettings::default_path()
            .map(|path| EngineSettings::load_or_default(&path))
            .unwrap_or_default(),
    };

    let mut canvas = Canvas::new(&settings);
    let rect = canvas.add_default(ShapeKind::Rectangle, Point::new(200.0, 200.0))?;
    canvas.add_regular_polygon(6, Point::new(260.0, 240.0), 80.0)?;
    canvas.add_default(ShapeKind::Triangle, Point::new(420.0, 120.0))?;

    // Two overlapping strokes closed into one pen shape.
    let mut pen = PenTool::new();
    for (x, y) in [(40.0, 40.0), (160.0, 40.0), (100.0, 140.0), (40.0, 140.0)] {
        pen.add_point(Point::new(x, y));
    }
    if let Some(shape) = pen.close(canvas.options()) {
        canvas.add_shape(shape);
    }

    if let Some(shape) = canvas.get_mut(rect) {
        shape.set_width(150.0)?;
        shape.set_rotation(FRAC_PI_4)?;
    }

    let camera = FixedCamera::orthographic(800.0, 600.0);
    let mut renderer = ShapeRenderer::new();
    let mut target = RecordingTarget::new();
    canvas.draw(&camera, &mut renderer, &mut target);

    for shape in canvas.iter() {
        let (width, height) = shape.bounds().size();
        tracing::info!(
            id = %shape.id(),
            kind = shape.kind().name(),
            width,
            height,
            triangles = shape.meshes().iter().map(|m| m.triangle_count()).sum::<usize>(),
            "Shape"
        );
    }

    let cursor = Point::new(250.0, 250.0);
    match canvas.hit_test(cursor) {
        Some(id) => tracing::info!(x = cursor.x, y = cursor.y, shape = %id, "Hit"),
        None => tracing::info!(x = cursor.x, y = cursor.y, "Miss"),
    }

    tracing::info!(
        draws = target.draws().len(),
        triangles = target.triangle_count(),
        buffers = target.buffers().len(),
        "Rendered canvas"
    );
    Ok(())
}
