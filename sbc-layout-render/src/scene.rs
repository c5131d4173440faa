//! Scene model: shapes, labels and the canvas they are composed onto.
//!
//! All coordinates are in data units of the canvas (y grows upward); sizes
//! of strokes and fonts are in typographic points (1/72 inch).

use sbc_layout_config::Color;

use crate::error::RenderError;

/// A position in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An edge drawn around a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in points.
    pub width: f64,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }
}

/// Geometry of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle anchored at its lower-left corner.
    Rectangle { origin: Point, width: f64, height: f64 },
    /// Block arrow from `tail` to `tail + (dx, dy)`.
    ///
    /// `width` is the full width of the arrow head; the shaft is a third of it.
    Arrow {
        tail: Point,
        dx: f64,
        dy: f64,
        width: f64,
    },
}

/// A filled and/or stroked figure drawn in sequence order.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Fill color; `None` draws an unfilled shape.
    pub fill: Option<Color>,
    /// Opacity applied to both fill and stroke, in `[0, 1]`.
    pub opacity: f64,
    pub stroke: Option<Stroke>,
}

impl Shape {
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind: ShapeKind::Rectangle {
                origin: Point::new(x, y),
                width,
                height,
            },
            fill: None,
            opacity: 1.0,
            stroke: None,
        }
    }

    pub fn arrow(x: f64, y: f64, dx: f64, dy: f64, width: f64) -> Self {
        Self {
            kind: ShapeKind::Arrow {
                tail: Point::new(x, y),
                dx,
                dy,
                width,
            },
            fill: None,
            opacity: 1.0,
            stroke: None,
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Arrow { .. } => "arrow",
        }
    }

    /// Outline of the shape as a closed polygon in data space.
    pub fn polygon(&self) -> Vec<Point> {
        match self.kind {
            ShapeKind::Rectangle {
                origin,
                width,
                height,
            } => vec![
                origin,
                Point::new(origin.x + width, origin.y),
                Point::new(origin.x + width, origin.y + height),
                Point::new(origin.x, origin.y + height),
            ],
            ShapeKind::Arrow {
                tail,
                dx,
                dy,
                width,
            } => arrow_polygon(tail, dx, dy, width),
        }
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> (Point, Point) {
        let points = self.polygon();
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), RenderError> {
        let element = || format!("shape #{index} ({})", self.kind_name());
        match self.kind {
            ShapeKind::Rectangle {
                origin,
                width,
                height,
            } => {
                if !origin.is_finite() || !width.is_finite() || !height.is_finite() {
                    return Err(RenderError::geometry(element(), "coordinates must be finite"));
                }
                if width < 0.0 || height < 0.0 {
                    return Err(RenderError::geometry(
                        element(),
                        format!("size must be non-negative, got {width}x{height}"),
                    ));
                }
            }
            ShapeKind::Arrow {
                tail,
                dx,
                dy,
                width,
            } => {
                if !tail.is_finite() || !dx.is_finite() || !dy.is_finite() || !width.is_finite() {
                    return Err(RenderError::geometry(element(), "coordinates must be finite"));
                }
                if width < 0.0 {
                    return Err(RenderError::geometry(
                        element(),
                        format!("width must be non-negative, got {width}"),
                    ));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(RenderError::geometry(
                element(),
                format!("opacity must be within [0, 1], got {}", self.opacity),
            ));
        }
        if let Some(stroke) = self.stroke
            && !(stroke.width.is_finite() && stroke.width >= 0.0)
        {
            return Err(RenderError::geometry(
                element(),
                format!("stroke width must be non-negative, got {}", stroke.width),
            ));
        }
        Ok(())
    }
}

/// Block arrow polygon: a shaft of a third of the head width, and a head
/// covering the last fifth of the length.
fn arrow_polygon(tail: Point, dx: f64, dy: f64, width: f64) -> Vec<Point> {
    const UNIT: [(f64, f64); 7] = [
        (0.0, 0.1),
        (0.0, -0.1),
        (0.8, -0.1),
        (0.8, -0.3),
        (1.0, 0.0),
        (0.8, 0.3),
        (0.8, 0.1),
    ];
    let length = dx.hypot(dy);
    let (cos, sin) = if length > 0.0 {
        (dx / length, dy / length)
    } else {
        (1.0, 0.0)
    };
    UNIT.iter()
        .map(|&(u, v)| {
            let along = u * length;
            let across = v * width;
            Point::new(
                tail.x + along * cos - across * sin,
                tail.y + along * sin + across * cos,
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    Center,
    #[default]
    Baseline,
    Bottom,
}

/// A positioned text annotation drawn after all shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text; `'\n'` starts a new line.
    pub text: String,
    pub position: Point,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    /// Font size in points.
    pub font_size: f64,
    pub color: Color,
}

impl Label {
    pub const DEFAULT_FONT_SIZE: f64 = 10.0;

    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            position: Point::new(x, y),
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
            font_size: Self::DEFAULT_FONT_SIZE,
            color: Color::BLACK,
        }
    }

    pub fn with_align(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn with_h_align(mut self, h_align: HorizontalAlign) -> Self {
        self.h_align = h_align;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), RenderError> {
        let element = || format!("label #{index} ({:?})", self.text);
        if !self.position.is_finite() {
            return Err(RenderError::geometry(element(), "position must be finite"));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(RenderError::geometry(
                element(),
                format!("font size must be positive, got {}", self.font_size),
            ));
        }
        Ok(())
    }
}

/// Coordinate bounds and presentation of the drawing area.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Keep one data unit the same pixel length on both axes.
    pub aspect_locked: bool,
    /// Draw the axes frame, ticks and tick labels.
    pub axes_visible: bool,
    /// Empty titles are not drawn.
    pub title: String,
    pub title_font_size: f64,
    /// Unfilled rectangle spanning the full bounds, drawn beneath all shapes.
    pub outline: Option<Stroke>,
}

impl Canvas {
    pub const DEFAULT_TITLE_FONT_SIZE: f64 = 12.0;

    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            aspect_locked: false,
            axes_visible: true,
            title: String::new(),
            title_font_size: Self::DEFAULT_TITLE_FONT_SIZE,
            outline: None,
        }
    }

    pub fn with_aspect_locked(mut self, locked: bool) -> Self {
        self.aspect_locked = locked;
        self
    }

    pub fn with_axes_visible(mut self, visible: bool) -> Self {
        self.axes_visible = visible;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_title_font_size(mut self, size: f64) -> Self {
        self.title_font_size = size;
        self
    }

    pub fn with_outline(mut self, stroke: Stroke) -> Self {
        self.outline = Some(stroke);
        self
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// True when `p` lies inside the bounds (edges included).
    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        let all_finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(RenderError::InvalidCanvas("bounds must be finite".into()));
        }
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(RenderError::InvalidCanvas(format!(
                "bounds must satisfy x_min < x_max and y_min < y_max, got x [{}, {}] y [{}, {}]",
                self.x_min, self.x_max, self.y_min, self.y_max
            )));
        }
        if !(self.title_font_size.is_finite() && self.title_font_size > 0.0) {
            return Err(RenderError::InvalidCanvas(format!(
                "title font size must be positive, got {}",
                self.title_font_size
            )));
        }
        if let Some(outline) = self.outline
            && !(outline.width.is_finite() && outline.width >= 0.0)
        {
            return Err(RenderError::InvalidCanvas(format!(
                "outline width must be non-negative, got {}",
                outline.width
            )));
        }
        Ok(())
    }
}
