//! Composition of a scene into an SVG document in figure pixel space.
//!
//! The document is sized to the full figure so the rasterizer can draw it
//! with an identity transform. Element order in the document is the paint
//! order: board outline, shapes, axes, labels, title. The outline and shapes
//! are clipped to the plot box; axes and text are not.

use std::fmt::Write as _;

use sbc_layout_config::{Color, RenderSettings};

use crate::scene::{Canvas, HorizontalAlign, Label, Point, Shape, VerticalAlign};
use crate::ticks;
use crate::transform::{DataTransform, PixelBox, points_to_px};

/// Line height as a multiple of the font size.
const LINE_SPACING: f64 = 1.2;
/// Font ascent and descent as fractions of the font size.
const ASCENT: f64 = 0.76;
const DESCENT: f64 = 0.24;

/// Id of the clip path covering the plot box.
const PLOT_CLIP_ID: &str = "plot-area";

/// Axes frame and tick styling, in points.
const AXES_LINE_WIDTH_PT: f64 = 0.8;
const TICK_LENGTH_PT: f64 = 3.5;
const TICK_PAD_PT: f64 = 3.5;
const TICK_FONT_SIZE_PT: f64 = 10.0;

/// Incrementally built SVG document.
pub struct SvgDocument {
    width: u32,
    height: u32,
    font_family: String,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32, font_family: &str) -> Self {
        Self {
            width,
            height,
            // Generic fallback for systems without the configured family.
            font_family: format!("{font_family}, sans-serif"),
            body: String::new(),
        }
    }

    /// Append a closed polygon. `stroke` is `(width_px, color)`.
    pub fn polygon(
        &mut self,
        points: &[(f64, f64)],
        fill: Option<Color>,
        opacity: f64,
        stroke: Option<(f64, Color)>,
    ) {
        let mut coords = String::with_capacity(points.len() * 20);
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                coords.push(' ');
            }
            let _ = write!(coords, "{x:.3},{y:.3}");
        }
        let _ = write!(
            self.body,
            r#"<polygon points="{coords}" {}/>"#,
            paint_attrs(fill, opacity, stroke)
        );
        self.body.push('\n');
    }

    /// Open a group clipped to `area`. Close it with [`Self::end_group`].
    pub fn begin_clip(&mut self, id: &str, area: &PixelBox) {
        let _ = writeln!(
            self.body,
            r#"<defs><clipPath id="{id}"><rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}"/></clipPath></defs>"#,
            area.left, area.top, area.width, area.height
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#{id})">"#);
    }

    pub fn end_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    /// Append a straight line segment.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), width_px: f64, color: Color) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="{width_px:.3}"/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            color.to_hex()
        );
    }

    /// Append one or more lines of text anchored at `(x, y)` in pixels.
    pub fn text(
        &mut self,
        lines: &[&str],
        anchor: (f64, f64),
        h_align: HorizontalAlign,
        v_align: VerticalAlign,
        font_px: f64,
        color: Color,
    ) {
        if lines.is_empty() {
            return;
        }
        let text_anchor = match h_align {
            HorizontalAlign::Left => "start",
            HorizontalAlign::Center => "middle",
            HorizontalAlign::Right => "end",
        };
        let (x, y) = anchor;
        let first_baseline = first_baseline(y, lines.len(), v_align, font_px);
        let line_height = LINE_SPACING * font_px;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = first_baseline + i as f64 * line_height;
            let _ = writeln!(
                self.body,
                r#"<text x="{x:.3}" y="{baseline:.3}" font-family="{}" font-size="{font_px:.3}" fill="{}" text-anchor="{text_anchor}" xml:space="preserve">{}</text>"#,
                escape(&self.font_family),
                color.to_hex(),
                escape(line)
            );
        }
    }

    /// Close the document.
    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
{body}</svg>
"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Baseline of the first line of a text block anchored at pixel row `y`.
fn first_baseline(y: f64, line_count: usize, v_align: VerticalAlign, font_px: f64) -> f64 {
    let extra_lines = line_count.saturating_sub(1) as f64 * LINE_SPACING * font_px;
    match v_align {
        VerticalAlign::Top => y + ASCENT * font_px,
        VerticalAlign::Center => y - (extra_lines + font_px) / 2.0 + ASCENT * font_px,
        // Baseline and bottom alignment refer to the last line.
        VerticalAlign::Baseline => y - extra_lines,
        VerticalAlign::Bottom => y - DESCENT * font_px - extra_lines,
    }
}

fn paint_attrs(fill: Option<Color>, opacity: f64, stroke: Option<(f64, Color)>) -> String {
    let mut attrs = match fill {
        Some(c) => format!(r#"fill="{}" fill-opacity="{opacity:.3}""#, c.to_hex()),
        None => r#"fill="none""#.to_string(),
    };
    match stroke {
        Some((width, c)) if width > 0.0 => {
            let _ = write!(
                attrs,
                r#" stroke="{}" stroke-opacity="{opacity:.3}" stroke-width="{width:.3}" stroke-linejoin="miter""#,
                c.to_hex()
            );
        }
        _ => attrs.push_str(r#" stroke="none""#),
    }
    attrs
}

/// Escape text for use in SVG character data and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn to_pixels(transform: &DataTransform, points: &[Point]) -> Vec<(f64, f64)> {
    points.iter().map(|p| transform.to_pixel(*p)).collect()
}

/// Compose a full scene into an SVG document of `width` x `height` pixels.
pub fn compose_scene(
    shapes: &[Shape],
    labels: &[Label],
    canvas: &Canvas,
    transform: &DataTransform,
    settings: &RenderSettings,
    dpi: u32,
    (width, height): (u32, u32),
) -> String {
    let mut doc = SvgDocument::new(width, height, &settings.font_family);

    doc.begin_clip(PLOT_CLIP_ID, &transform.plot_box());
    if let Some(outline) = canvas.outline {
        let corners = [
            Point::new(canvas.x_min, canvas.y_min),
            Point::new(canvas.x_max, canvas.y_min),
            Point::new(canvas.x_max, canvas.y_max),
            Point::new(canvas.x_min, canvas.y_max),
        ];
        doc.polygon(
            &to_pixels(transform, &corners),
            None,
            1.0,
            Some((points_to_px(outline.width, dpi), outline.color)),
        );
    }

    for shape in shapes {
        let stroke = shape
            .stroke
            .map(|s| (points_to_px(s.width, dpi), s.color));
        doc.polygon(
            &to_pixels(transform, &shape.polygon()),
            shape.fill,
            shape.opacity,
            stroke,
        );
    }
    doc.end_group();

    if canvas.axes_visible {
        draw_axes(&mut doc, canvas, transform, dpi);
    }

    for label in labels {
        let lines: Vec<&str> = label.lines().collect();
        doc.text(
            &lines,
            transform.to_pixel(label.position),
            label.h_align,
            label.v_align,
            points_to_px(label.font_size, dpi),
            label.color,
        );
    }

    if !canvas.title.is_empty() {
        let plot = transform.plot_box();
        let lines: Vec<&str> = canvas.title.split('\n').collect();
        doc.text(
            &lines,
            (plot.center_x(), plot.top - points_to_px(settings.title_pad_pt, dpi)),
            HorizontalAlign::Center,
            VerticalAlign::Baseline,
            points_to_px(canvas.title_font_size, dpi),
            Color::BLACK,
        );
    }

    doc.finish()
}

/// Frame around the plot box plus outward ticks and tick labels on the
/// bottom and left edges.
fn draw_axes(doc: &mut SvgDocument, canvas: &Canvas, transform: &DataTransform, dpi: u32) {
    let plot: PixelBox = transform.plot_box();
    let line_px = points_to_px(AXES_LINE_WIDTH_PT, dpi);
    let tick_px = points_to_px(TICK_LENGTH_PT, dpi);
    let pad_px = points_to_px(TICK_PAD_PT, dpi);
    let font_px = points_to_px(TICK_FONT_SIZE_PT, dpi);

    let frame = [
        (plot.left, plot.top),
        (plot.right(), plot.top),
        (plot.right(), plot.bottom()),
        (plot.left, plot.bottom()),
    ];
    doc.polygon(&frame, None, 1.0, Some((line_px, Color::BLACK)));

    let x_step = ticks::nice_step(canvas.width());
    for value in ticks::ticks(canvas.x_min, canvas.x_max) {
        let (x, _) = transform.to_pixel(Point::new(value, canvas.y_min));
        let y = plot.bottom();
        doc.line((x, y), (x, y + tick_px), line_px, Color::BLACK);
        let label = ticks::format_tick(value, x_step);
        doc.text(
            &[label.as_str()],
            (x, y + tick_px + pad_px),
            HorizontalAlign::Center,
            VerticalAlign::Top,
            font_px,
            Color::BLACK,
        );
    }

    let y_step = ticks::nice_step(canvas.height());
    for value in ticks::ticks(canvas.y_min, canvas.y_max) {
        let (_, y) = transform.to_pixel(Point::new(canvas.x_min, value));
        let x = plot.left;
        doc.line((x, y), (x - tick_px, y), line_px, Color::BLACK);
        let label = ticks::format_tick(value, y_step);
        doc.text(
            &[label.as_str()],
            (x - tick_px - pad_px, y),
            HorizontalAlign::Right,
            VerticalAlign::Center,
            font_px,
            Color::BLACK,
        );
    }
}
