//! sbc-layout: renders the PYNQ-Z2 68000 single-board computer schematic.
//!
//! The board description lives in [`board`]; drawing and PNG export are
//! done by the `sbc-layout-render` crate.

pub mod board;
pub mod debug;

use anyhow::{Context, Result};
use sbc_layout_render::{DiagramRenderer, RenderOutput, RenderSettings};

pub use board::{BoardLayout, sbc_board_layout};

/// Render the board layout with `settings` to its configured output path.
pub fn render_board(settings: RenderSettings) -> Result<RenderOutput> {
    let layout = sbc_board_layout();
    let output_path = settings.output_path.clone();
    let dpi = settings.dpi;
    crate::debug_info!(
        "BOARD",
        "Rendering {} shapes and {} labels to {} at {} dpi",
        layout.shapes.len(),
        layout.labels.len(),
        output_path,
        dpi
    );

    crate::debug_log!(
        "BOARD",
        "Canvas x {}..{} y {}..{}, aspect locked: {}",
        layout.canvas.x_min,
        layout.canvas.x_max,
        layout.canvas.y_min,
        layout.canvas.y_max,
        layout.canvas.aspect_locked
    );
    for (i, shape) in layout.shapes.iter().enumerate() {
        crate::debug_trace!(
            "BOARD",
            "shape #{i} {} fill={:?} opacity={}",
            shape.kind_name(),
            shape.fill,
            shape.opacity
        );
    }

    let renderer = DiagramRenderer::new(settings);
    let output = renderer
        .render_to_configured_output(&layout.shapes, &layout.labels, &layout.canvas)
        .with_context(|| format!("failed to render board layout to '{output_path}'"))?;

    crate::debug_info!(
        "BOARD",
        "Rendered {}x{} px (figure {}x{})",
        output.width,
        output.height,
        output.figure_width,
        output.figure_height
    );
    Ok(output)
}
