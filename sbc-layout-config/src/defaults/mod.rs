//! Default value functions for render settings.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `RenderSettings` field.

mod figure;
mod output;

// ── Figure geometry & text ────────────────────────────────────────────────
pub use figure::{
    background, figure_height_in, figure_width_in, font_family, margin_bottom, margin_left,
    margin_right, margin_top, title_pad_pt,
};

// ── Export ────────────────────────────────────────────────────────────────
pub use output::{dpi, max_dimension_px, output_path, pad_inches, tight_crop};
