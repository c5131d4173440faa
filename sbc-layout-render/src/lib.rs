//! Deterministic diagram renderer for the sbc-layout board schematic.
//!
//! This crate turns an ordered list of shapes and labels on a bounded
//! canvas into a cropped PNG image:
//!
//! - [`scene`]: the `Shape` / `Label` / `Canvas` model and its validation
//! - [`transform`]: data-space to pixel-space mapping with aspect lock
//! - [`svg`]: composition of the scene into an SVG document
//! - [`surface`]: the raster drawing surface, auto-crop and PNG encoding
//! - [`renderer`]: `DiagramRenderer`, the entry point tying it together

pub mod error;
mod fonts;
pub mod renderer;
pub mod scene;
pub mod surface;
pub mod svg;
mod ticks;
pub mod transform;

// Re-export main public types
pub use error::RenderError;
pub use renderer::{DiagramRenderer, RenderOutput};
pub use scene::{Canvas, HorizontalAlign, Label, Point, Shape, ShapeKind, Stroke, VerticalAlign};
pub use surface::PixelRect;

// Re-export shared types from dependencies for convenience
pub use sbc_layout_config::{Color, RenderSettings};
