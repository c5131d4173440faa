//! DiagramRenderer: validates a scene, draws it and exports a PNG.

use std::io::{self, Write};
use std::path::Path;

use sbc_layout_config::RenderSettings;
use tempfile::NamedTempFile;

use crate::error::RenderError;
use crate::scene::{Canvas, Label, Shape};
use crate::surface::{DrawingSurface, PixelRect};
use crate::svg::compose_scene;
use crate::transform::DataTransform;

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOutput {
    /// Size of the exported image in pixels.
    pub width: u32,
    pub height: u32,
    /// Full figure size before cropping.
    pub figure_width: u32,
    pub figure_height: u32,
    /// Region of the figure that was exported.
    pub crop: PixelRect,
}

/// Renders shapes and labels on a canvas to a raster image.
///
/// Shapes are painted in sequence order, so a later shape covers an earlier
/// one where they overlap; labels and the title are painted after all
/// shapes.
pub struct DiagramRenderer {
    settings: RenderSettings,
}

impl Default for DiagramRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl DiagramRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Render the scene and write it as a PNG to `output_path`.
    ///
    /// The image is fully encoded, then written to a temporary file next to
    /// `output_path` and moved into place. Nothing at `output_path` changes
    /// unless the whole write succeeds.
    pub fn render(
        &self,
        shapes: &[Shape],
        labels: &[Label],
        canvas: &Canvas,
        output_path: impl AsRef<Path>,
        dpi: u32,
    ) -> Result<RenderOutput, RenderError> {
        let path = output_path.as_ref();
        let (png, output) = self.render_png_bytes(shapes, labels, canvas, dpi)?;

        write_atomically(path, &png).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "Wrote {} ({}x{} px at {} dpi)",
            path.display(),
            output.width,
            output.height,
            dpi
        );
        Ok(output)
    }

    /// Render to the output path and resolution named in the settings.
    pub fn render_to_configured_output(
        &self,
        shapes: &[Shape],
        labels: &[Label],
        canvas: &Canvas,
    ) -> Result<RenderOutput, RenderError> {
        self.render(
            shapes,
            labels,
            canvas,
            &self.settings.output_path,
            self.settings.dpi,
        )
    }

    /// Render the scene to PNG bytes without touching the filesystem.
    pub fn render_png_bytes(
        &self,
        shapes: &[Shape],
        labels: &[Label],
        canvas: &Canvas,
        dpi: u32,
    ) -> Result<(Vec<u8>, RenderOutput), RenderError> {
        self.validate(shapes, labels, canvas, dpi)?;

        let (figure_width, figure_height) = self.settings.figure_size_px(dpi);
        let mut surface = DrawingSurface::new(
            figure_width,
            figure_height,
            self.settings.background,
            self.settings.max_dimension_px,
        )?;

        let transform = DataTransform::new(canvas, &self.settings, dpi);
        let svg = compose_scene(
            shapes,
            labels,
            canvas,
            &transform,
            &self.settings,
            dpi,
            (figure_width, figure_height),
        );
        log::trace!("Composed scene document ({} bytes)", svg.len());
        surface.draw_svg(&svg)?;

        let crop = self.crop_rect(&surface, dpi);
        let png = surface.encode_png(Some(crop))?;

        log::debug!(
            "Rendered {} shapes and {} labels; figure {}x{}, crop {:?}",
            shapes.len(),
            labels.len(),
            figure_width,
            figure_height,
            crop
        );
        Ok((
            png,
            RenderOutput {
                width: crop.width,
                height: crop.height,
                figure_width,
                figure_height,
                crop,
            },
        ))
    }

    /// Reject unusable input before any surface is allocated.
    fn validate(
        &self,
        shapes: &[Shape],
        labels: &[Label],
        canvas: &Canvas,
        dpi: u32,
    ) -> Result<(), RenderError> {
        self.settings.validate()?;
        if dpi == 0 {
            return Err(RenderError::InvalidCanvas(
                "dpi must be greater than 0".into(),
            ));
        }
        canvas.validate()?;
        for (i, shape) in shapes.iter().enumerate() {
            shape.validate(i)?;
            let (min, max) = shape.bounds();
            if !canvas.contains(min) || !canvas.contains(max) {
                log::debug!(
                    "shape #{i} ({}) extends past the canvas bounds and is clipped",
                    shape.kind_name()
                );
            }
        }
        for (i, label) in labels.iter().enumerate() {
            label.validate(i)?;
        }
        Ok(())
    }

    /// Region to export: the full figure, or the drawn content plus padding.
    fn crop_rect(&self, surface: &DrawingSurface, dpi: u32) -> PixelRect {
        let full = PixelRect {
            x: 0,
            y: 0,
            width: surface.width(),
            height: surface.height(),
        };
        if !self.settings.tight_crop {
            return full;
        }
        match surface.content_bounds() {
            Some(bounds) => {
                let pad = (self.settings.pad_inches * f64::from(dpi)).round() as u32;
                bounds.padded(pad, surface.width(), surface.height())
            }
            None => {
                log::warn!("Nothing drawn; exporting the full figure");
                full
            }
        }
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// A read-only file at `path` is left alone and reported as a permission
/// error rather than being replaced by the rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Ok(meta) = std::fs::metadata(path)
        && meta.permissions().readonly()
    {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "output file is read-only",
        ));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    // On failure the temporary file is dropped and removed.
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Stroke;
    use sbc_layout_config::Color;

    fn renderer() -> DiagramRenderer {
        DiagramRenderer::new(RenderSettings::default())
    }

    fn canvas() -> Canvas {
        Canvas::new(0.0, 4.0, 0.0, 3.0)
            .with_aspect_locked(true)
            .with_axes_visible(false)
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let err = renderer().render_png_bytes(&[], &[], &canvas(), 0).unwrap_err();
        assert!(matches!(err, RenderError::InvalidCanvas(_)));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let renderer = DiagramRenderer::new(RenderSettings::new().with_figure_size(-1.0, 6.0));
        let err = renderer.render_png_bytes(&[], &[], &canvas(), 72).unwrap_err();
        assert!(matches!(err, RenderError::InvalidCanvas(_)));
    }

    #[test]
    fn test_oversized_figure_rejected() {
        let mut settings = RenderSettings::default();
        settings.max_dimension_px = 500;
        let err = DiagramRenderer::new(settings)
            .render_png_bytes(&[], &[], &canvas(), 100)
            .unwrap_err();
        assert!(matches!(err, RenderError::SurfaceTooLarge { .. }));
    }

    #[test]
    fn test_empty_scene_exports_full_figure() {
        let (_, output) = renderer()
            .render_png_bytes(&[], &[], &canvas(), 50)
            .unwrap();
        assert_eq!((output.width, output.height), (400, 300));
        assert_eq!(output.crop.x, 0);
    }

    #[test]
    fn test_without_tight_crop_exports_full_figure() {
        let renderer = DiagramRenderer::new(RenderSettings::new().with_tight_crop(false));
        let outline = canvas().with_outline(Stroke::new(2.0, Color::BLACK));
        let (_, output) = renderer.render_png_bytes(&[], &[], &outline, 50).unwrap();
        assert_eq!((output.width, output.height), (400, 300));
    }

    #[test]
    fn test_tight_crop_shrinks_to_content() {
        let outline = canvas().with_outline(Stroke::new(2.0, Color::BLACK));
        let (_, output) = renderer().render_png_bytes(&[], &[], &outline, 50).unwrap();
        assert!(output.width < output.figure_width);
        assert!(output.height < output.figure_height);
    }

    #[test]
    fn test_configured_output_uses_settings_path_and_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configured.png");
        let settings = RenderSettings::new()
            .with_output_path(path.to_string_lossy())
            .with_dpi(50)
            .with_tight_crop(false);
        let output = DiagramRenderer::new(settings)
            .render_to_configured_output(&[], &[], &canvas())
            .unwrap();
        assert!(path.is_file());
        assert_eq!((output.width, output.height), (400, 300));
    }
}
