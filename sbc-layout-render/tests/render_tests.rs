//! Integration tests for sbc-layout-render.

use sbc_layout_render::transform::DataTransform;
use sbc_layout_render::{
    Canvas, Color, DiagramRenderer, HorizontalAlign, Label, Point, RenderError, RenderSettings,
    Shape, Stroke, VerticalAlign,
};

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn board_canvas() -> Canvas {
    Canvas::new(0.0, 4.0, 0.0, 3.0)
        .with_aspect_locked(true)
        .with_axes_visible(false)
}

fn outline() -> Shape {
    Shape::rectangle(0.0, 0.0, 4.0, 3.0).with_stroke(Stroke::new(2.0, Color::BLACK))
}

/// Pixel color of the uncropped figure at a data-space point.
fn pixel_at(
    png: &[u8],
    settings: &RenderSettings,
    canvas: &Canvas,
    dpi: u32,
    p: Point,
) -> [u8; 4] {
    let image = image::load_from_memory(png).unwrap().to_rgba8();
    let (x, y) = DataTransform::new(canvas, settings, dpi).to_pixel(p);
    image.get_pixel(x as u32, y as u32).0
}

#[test]
fn test_render_is_deterministic() {
    let renderer = DiagramRenderer::default();
    let shapes = [
        outline(),
        Shape::rectangle(1.5, 1.0, 1.0, 1.0)
            .with_fill(BLUE)
            .with_opacity(0.5),
        Shape::arrow(2.0, 1.0, 0.8, 0.2, 0.3)
            .with_fill(Color::rgb(0, 255, 255))
            .with_opacity(0.7)
            .with_stroke(Stroke::new(2.0, Color::BLACK)),
    ];
    let labels = [Label::new("1024-bit Bus", 2.4, 1.3).with_font_size(8.0)];

    let (first_png, first) = renderer
        .render_png_bytes(&shapes, &labels, &board_canvas(), 100)
        .unwrap();
    let (second_png, second) = renderer
        .render_png_bytes(&shapes, &labels, &board_canvas(), 100)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first_png, second_png);
}

#[test]
fn test_four_by_three_outline_keeps_aspect() {
    let renderer = DiagramRenderer::default();
    let (_, output) = renderer
        .render_png_bytes(&[outline()], &[], &board_canvas(), 100)
        .unwrap();
    let ratio = f64::from(output.width) / f64::from(output.height);
    assert!(
        (ratio - 4.0 / 3.0).abs() < 0.03,
        "expected ~4:3, got {}x{} ({ratio:.3})",
        output.width,
        output.height
    );
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");

    let err = DiagramRenderer::default()
        .render(&[outline()], &[], &board_canvas(), &path, 72)
        .unwrap_err();

    assert!(err.is_io(), "expected Io error, got {err}");
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(!path.exists());
}

#[test]
fn test_read_only_file_survives_failed_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, b"user data").unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(&path, perms).unwrap();

    let err = DiagramRenderer::default()
        .render(&[outline()], &[], &board_canvas(), &path, 72)
        .unwrap_err();

    assert!(err.is_io(), "expected Io error, got {err}");
    assert_eq!(std::fs::read(&path).unwrap(), b"user data");
    // No temporary files are left next to the target.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    std::fs::set_permissions(&path, perms).unwrap();
}

#[test]
fn test_negative_width_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let shapes = [outline(), Shape::rectangle(1.0, 1.0, -0.5, 1.0).with_fill(RED)];

    let err = DiagramRenderer::default()
        .render(&shapes, &[], &board_canvas(), &path, 72)
        .unwrap_err();

    match err {
        RenderError::InvalidGeometry { element, reason } => {
            assert_eq!(element, "shape #1 (rectangle)");
            assert!(reason.contains("non-negative"));
        }
        other => panic!("expected InvalidGeometry, got {other}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_invalid_label_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let labels = [Label::new("GPIO", f64::NAN, 1.4)];

    let err = DiagramRenderer::default()
        .render(&[], &labels, &board_canvas(), &path, 72)
        .unwrap_err();

    assert!(matches!(err, RenderError::InvalidGeometry { .. }));
    assert!(!path.exists());
}

#[test]
fn test_later_shape_wins_overlap() {
    let settings = RenderSettings::new().with_tight_crop(false);
    let renderer = DiagramRenderer::new(settings.clone());
    let canvas = board_canvas();
    let a = Shape::rectangle(0.5, 0.5, 2.0, 1.5).with_fill(RED);
    let b = Shape::rectangle(1.0, 1.0, 2.0, 1.5).with_fill(BLUE);
    let overlap = Point::new(1.75, 1.5);
    let only_a = Point::new(0.75, 0.75);

    let (png, _) = renderer
        .render_png_bytes(&[a.clone(), b.clone()], &[], &canvas, 72)
        .unwrap();
    assert_eq!(pixel_at(&png, &settings, &canvas, 72, overlap), [0, 0, 255, 255]);
    assert_eq!(pixel_at(&png, &settings, &canvas, 72, only_a), [255, 0, 0, 255]);

    let (png, _) = renderer
        .render_png_bytes(&[b, a], &[], &canvas, 72)
        .unwrap();
    assert_eq!(pixel_at(&png, &settings, &canvas, 72, overlap), [255, 0, 0, 255]);
}

#[test]
fn test_opacity_blends_with_background() {
    let settings = RenderSettings::new().with_tight_crop(false);
    let renderer = DiagramRenderer::new(settings.clone());
    let canvas = board_canvas();
    let shape = Shape::rectangle(1.0, 1.0, 1.0, 1.0)
        .with_fill(BLUE)
        .with_opacity(0.5);

    let (png, _) = renderer.render_png_bytes(&[shape], &[], &canvas, 72).unwrap();
    let [r, g, b, a] = pixel_at(&png, &settings, &canvas, 72, Point::new(1.5, 1.5));

    assert_eq!(b, 255);
    assert_eq!(a, 255);
    assert!((i32::from(r) - 128).abs() <= 2, "red channel {r}");
    assert!((i32::from(g) - 128).abs() <= 2, "green channel {g}");
}

#[test]
fn test_canvas_outline_draws_under_shapes() {
    let settings = RenderSettings::new().with_tight_crop(false);
    let renderer = DiagramRenderer::new(settings.clone());
    let canvas = board_canvas().with_outline(Stroke::new(4.0, Color::BLACK));
    // Covers the inner half of the outline's left edge.
    let cover = Shape::rectangle(0.0, 1.0, 0.2, 1.0).with_fill(RED);
    let edge_y = |y| Point::new(0.01, y);

    let (png, _) = renderer.render_png_bytes(&[cover], &[], &canvas, 72).unwrap();
    assert_eq!(
        pixel_at(&png, &settings, &canvas, 72, edge_y(1.5)),
        [255, 0, 0, 255]
    );
    assert_eq!(
        pixel_at(&png, &settings, &canvas, 72, edge_y(2.5))[..3],
        [0, 0, 0]
    );
}

#[test]
fn test_shapes_outside_bounds_are_clipped() {
    let settings = RenderSettings::new().with_tight_crop(false);
    let renderer = DiagramRenderer::new(settings.clone());
    let canvas = board_canvas();
    let off_board = Shape::rectangle(-1.0, 1.0, 0.5, 1.0).with_fill(RED);

    let (png, _) = renderer
        .render_png_bytes(&[off_board], &[], &canvas, 72)
        .unwrap();
    assert_eq!(
        pixel_at(&png, &settings, &canvas, 72, Point::new(-0.75, 1.5)),
        [255, 255, 255, 255]
    );
}

#[test]
fn test_clipped_scene_crops_to_nothing_drawn() {
    let renderer = DiagramRenderer::default();
    let off_board = Shape::rectangle(-1.0, 1.0, 0.5, 1.0).with_fill(RED);
    let (_, output) = renderer
        .render_png_bytes(&[off_board], &[], &board_canvas(), 72)
        .unwrap();
    // Nothing visible remains, so the whole figure is exported.
    assert_eq!(
        (output.width, output.height),
        (output.figure_width, output.figure_height)
    );
}

#[test]
fn test_outline_is_clipped_to_half_width() {
    let settings = RenderSettings::new().with_tight_crop(false);
    let renderer = DiagramRenderer::new(settings.clone());
    let canvas = board_canvas().with_outline(Stroke::new(8.0, Color::BLACK));
    let (left, y) = DataTransform::new(&canvas, &settings, 72).to_pixel(Point::new(0.0, 1.5));

    let (png, _) = renderer.render_png_bytes(&[], &[], &canvas, 72).unwrap();
    let image = image::load_from_memory(&png).unwrap().to_rgba8();
    // 8pt at 72 dpi is 8px; only the inner 4px survive the clip.
    let outside = image.get_pixel(left as u32 - 3, y as u32).0;
    let inside = image.get_pixel(left as u32 + 2, y as u32).0;
    assert_eq!(outside, [255, 255, 255, 255]);
    assert_eq!(inside[..3], [0, 0, 0]);
}

#[test]
fn test_end_to_end_board_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let shapes = [
        outline(),
        Shape::rectangle(1.5, 1.0, 1.0, 1.0)
            .with_fill(BLUE)
            .with_opacity(0.5),
    ];
    let labels = [Label::new("Zynq-7020\n(Apollo 68080)", 2.0, 1.5)
        .with_align(HorizontalAlign::Center, VerticalAlign::Center)
        .with_color(Color::WHITE)];

    let output = DiagramRenderer::default()
        .render(&shapes, &labels, &board_canvas(), &path, 300)
        .unwrap();

    assert!(path.is_file());
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (output.width, output.height));
    assert_eq!((output.figure_width, output.figure_height), (2400, 1800));
    assert!(output.width < output.figure_width);
    let ratio = f64::from(output.width) / f64::from(output.height);
    assert!((ratio - 4.0 / 3.0).abs() < 0.03, "ratio {ratio:.3}");
}

#[test]
fn test_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, b"stale").unwrap();

    DiagramRenderer::default()
        .render(&[outline()], &[], &board_canvas(), &path, 72)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
