//! Typed error types for sbc-layout-render.
//!
//! Callers can tell an unwritable output path (`Io`) apart from invalid
//! drawing parameters (`InvalidGeometry`, `InvalidCanvas`) and internal
//! rasterization failures.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for a diagram render.
#[derive(Debug, Error)]
pub enum RenderError {
    // -----------------------------------------------------------------------
    // Input validation
    // -----------------------------------------------------------------------
    /// A shape or label carries geometry that cannot be drawn.
    #[error("Invalid geometry for {element}: {reason}")]
    InvalidGeometry {
        /// Which element failed, e.g. `shape #2 (rectangle)` or `label "DDR3"`.
        element: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The canvas, resolution or render settings are unusable.
    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    // -----------------------------------------------------------------------
    // Drawing surface
    // -----------------------------------------------------------------------
    /// The requested surface exceeds the configured maximum dimension.
    #[error("Drawing surface {width}x{height} exceeds the {max}px limit")]
    SurfaceTooLarge {
        width: u32,
        height: u32,
        max: u32,
    },

    /// The pixmap backing the drawing surface could not be allocated.
    #[error("Drawing surface allocation failed for {width}x{height}")]
    SurfaceAllocation { width: u32, height: u32 },

    /// The composed scene document was rejected by the SVG parser.
    #[error("Scene document parse failed: {0}")]
    SvgParse(String),

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    /// The raster image could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The output file could not be written.
    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        /// Path the image was to be written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub(crate) fn geometry(element: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::InvalidGeometry {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by the output location rather than the scene.
    pub fn is_io(&self) -> bool {
        matches!(self, RenderError::Io { .. })
    }
}

impl From<sbc_layout_config::ConfigError> for RenderError {
    fn from(e: sbc_layout_config::ConfigError) -> Self {
        RenderError::InvalidCanvas(e.to_string())
    }
}
