//! Mapping from canvas data coordinates to figure pixels.
//!
//! Pixel space has its origin at the top-left of the figure with y growing
//! downward; data space has y growing upward.

use sbc_layout_config::RenderSettings;

use crate::scene::{Canvas, Point};

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Convert a length in points to pixels at `dpi`.
#[inline]
pub fn points_to_px(points: f64, dpi: u32) -> f64 {
    points * f64::from(dpi) / POINTS_PER_INCH
}

/// An axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Data-to-pixel transform for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataTransform {
    x_min: f64,
    y_max: f64,
    scale_x: f64,
    scale_y: f64,
    plot: PixelBox,
}

impl DataTransform {
    /// Fit the canvas bounds into the subplot area of the figure.
    ///
    /// With an aspect lock the plot box shrinks along one axis so that both
    /// axes share a scale, and is centered in the subplot area.
    pub fn new(canvas: &Canvas, settings: &RenderSettings, dpi: u32) -> Self {
        let dpi = f64::from(dpi);
        let fig_w = settings.figure_width_in * dpi;
        let fig_h = settings.figure_height_in * dpi;
        let m = &settings.margins;

        let area = PixelBox {
            left: m.left * fig_w,
            top: (1.0 - m.top) * fig_h,
            width: (m.right - m.left) * fig_w,
            height: (m.top - m.bottom) * fig_h,
        };

        let (scale_x, scale_y, plot) = if canvas.aspect_locked {
            let scale = (area.width / canvas.width()).min(area.height / canvas.height());
            let width = canvas.width() * scale;
            let height = canvas.height() * scale;
            let plot = PixelBox {
                left: area.left + (area.width - width) / 2.0,
                top: area.top + (area.height - height) / 2.0,
                width,
                height,
            };
            (scale, scale, plot)
        } else {
            (
                area.width / canvas.width(),
                area.height / canvas.height(),
                area,
            )
        };

        Self {
            x_min: canvas.x_min,
            y_max: canvas.y_max,
            scale_x,
            scale_y,
            plot,
        }
    }

    /// Map a data point to pixel coordinates.
    #[inline]
    pub fn to_pixel(&self, p: Point) -> (f64, f64) {
        (
            self.plot.left + (p.x - self.x_min) * self.scale_x,
            self.plot.top + (self.y_max - p.y) * self.scale_y,
        )
    }

    /// The pixel box covered by the canvas bounds.
    pub fn plot_box(&self) -> PixelBox {
        self.plot
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }
}
