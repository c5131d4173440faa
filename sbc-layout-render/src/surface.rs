//! Raster drawing surface: rasterization, auto-crop and PNG encoding.

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use resvg::tiny_skia;
use resvg::usvg;

use sbc_layout_config::Color;

use crate::error::RenderError;
use crate::fonts::FONTDB;

/// A rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Grow by `pad` pixels on every side, clamped to a `width` x `height` image.
    pub fn padded(self, pad: u32, width: u32, height: u32) -> Self {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let right = (self.x + self.width).saturating_add(pad).min(width);
        let bottom = (self.y + self.height).saturating_add(pad).min(height);
        Self {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// The pixmap a single render draws onto.
///
/// Owned by exactly one render call and released when dropped, whether the
/// render finished or bailed out with an error.
pub struct DrawingSurface {
    pixmap: tiny_skia::Pixmap,
    background: Color,
}

impl DrawingSurface {
    /// Allocate a surface filled with `background`.
    pub fn new(
        width: u32,
        height: u32,
        background: Color,
        max_dimension: u32,
    ) -> Result<Self, RenderError> {
        if width > max_dimension || height > max_dimension {
            return Err(RenderError::SurfaceTooLarge {
                width,
                height,
                max: max_dimension,
            });
        }
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::SurfaceAllocation { width, height })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            255,
        ));
        log::debug!("Acquired drawing surface {width}x{height}");
        Ok(Self { pixmap, background })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Rasterize an SVG document on top of the current contents.
    pub fn draw_svg(&mut self, svg: &str) -> Result<(), RenderError> {
        let opts = usvg::Options {
            fontdb: FONTDB.clone(),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(svg, &opts).map_err(|e| RenderError::SvgParse(e.to_string()))?;
        resvg::render(
            &tree,
            tiny_skia::Transform::default(),
            &mut self.pixmap.as_mut(),
        );
        Ok(())
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the surface.
    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// Bounding box of every pixel that differs from the background, or
    /// `None` when nothing has been drawn.
    pub fn content_bounds(&self) -> Option<PixelRect> {
        let width = self.width() as usize;
        let bg = [self.background.r, self.background.g, self.background.b, 255];
        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut found = false;

        // The surface starts opaque, so premultiplied and straight RGBA agree.
        for (row, pixels) in self.pixmap.data().chunks_exact(width * 4).enumerate() {
            for (col, px) in pixels.chunks_exact(4).enumerate() {
                if px != &bg[..] {
                    found = true;
                    min_x = min_x.min(col);
                    max_x = max_x.max(col);
                    min_y = min_y.min(row);
                    max_y = max_y.max(row);
                }
            }
        }

        found.then(|| PixelRect {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// Encode the surface, or the `crop` region of it, as PNG.
    pub fn encode_png(&self, crop: Option<PixelRect>) -> Result<Vec<u8>, RenderError> {
        let (width, height) = (self.width(), self.height());
        let full = RgbaImage::from_raw(width, height, self.pixmap.data().to_vec())
            .ok_or(RenderError::SurfaceAllocation { width, height })?;
        let image = match crop {
            Some(r) => image::imageops::crop_imm(&full, r.x, r.y, r.width, r.height).to_image(),
            None => full,
        };

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        log::debug!(
            "Encoded {}x{} PNG, {} bytes",
            image.width(),
            image.height(),
            png.len()
        );
        Ok(png)
    }
}

impl Drop for DrawingSurface {
    fn drop(&mut self) {
        log::debug!(
            "Released drawing surface {}x{}",
            self.pixmap.width(),
            self.pixmap.height()
        );
    }
}
