//! Layout of the PYNQ-Z2 68000 single-board computer schematic.
//!
//! Board units are inches: the board is roughly 4" x 3" and every block is
//! positioned by its lower-left corner.

use sbc_layout_render::{Canvas, Color, HorizontalAlign, Label, Shape, Stroke, VerticalAlign};

/// Title drawn above the board.
pub const BOARD_TITLE: &str = "PYNQ-Z2 68000 SBC (~4\"x3\")";

/// Font size for component labels, in points.
const COMPONENT_LABEL_SIZE: f64 = 8.0;

/// Opacity of component blocks.
const BLOCK_OPACITY: f64 = 0.5;

/// A complete diagram description: what to draw and where.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub canvas: Canvas,
    pub shapes: Vec<Shape>,
    pub labels: Vec<Label>,
}

/// Block colors, matching the palette's values for each name.
const BLUE: Color = Color::rgb(0, 0, 255);
const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 128, 0);
const YELLOW: Color = Color::rgb(255, 255, 0);
const PURPLE: Color = Color::rgb(128, 0, 128);
const GRAY: Color = Color::rgb(128, 128, 128);
const CYAN: Color = Color::rgb(0, 255, 255);

fn block(x: f64, y: f64, width: f64, height: f64, color: Color) -> Shape {
    Shape::rectangle(x, y, width, height)
        .with_fill(color)
        .with_opacity(BLOCK_OPACITY)
}

fn component_label(text: &str, x: f64, y: f64) -> Label {
    Label::new(text, x, y)
        .with_h_align(HorizontalAlign::Center)
        .with_font_size(COMPONENT_LABEL_SIZE)
}

/// The PYNQ-Z2 board: FPGA in the middle, I/O along the edges, and the wide
/// bus from the FPGA to DDR3.
///
/// Shape order is paint order; the bus arrow comes last so it sits on top of
/// the FPGA and DDR3 blocks it connects.
pub fn sbc_board_layout() -> BoardLayout {
    let canvas = Canvas::new(0.0, 4.0, 0.0, 3.0)
        .with_aspect_locked(true)
        .with_axes_visible(false)
        .with_outline(Stroke::new(2.0, Color::BLACK))
        .with_title(BOARD_TITLE)
        .with_title_font_size(12.0);

    let shapes = vec![
        // FPGA (center)
        block(1.5, 1.0, 1.0, 1.0, BLUE),
        // HDMI (left)
        block(0.1, 2.5, 0.4, 0.4, RED),
        // M.2 (top-right)
        block(3.2, 2.2, 0.7, 0.3, GREEN),
        // 2.5GbE PMOD (bottom-right)
        block(3.2, 0.2, 0.5, 0.3, YELLOW),
        // DDR3 (near FPGA)
        block(2.8, 1.2, 0.6, 0.3, PURPLE),
        // GPIO header (right edge)
        block(3.8, 0.8, 0.15, 1.2, GRAY),
        // Wide bus
        Shape::arrow(2.0, 1.0, 0.8, 0.2, 0.3)
            .with_fill(CYAN)
            .with_opacity(0.7)
            .with_stroke(Stroke::new(2.0, Color::BLACK)),
    ];

    let labels = vec![
        Label::new("Zynq-7020\n(Apollo 68080)", 2.0, 1.5)
            .with_align(HorizontalAlign::Center, VerticalAlign::Center)
            .with_color(Color::WHITE),
        component_label("HDMI TX/RX", 0.3, 2.7),
        component_label("M.2 (PCIe x2)", 3.55, 2.35),
        component_label("2.5GbE PMOD", 3.45, 0.35),
        component_label("DDR3", 3.1, 1.35),
        component_label("GPIO", 3.9, 1.4),
        Label::new("1024-bit Bus", 2.4, 1.3).with_font_size(COMPONENT_LABEL_SIZE),
    ];

    BoardLayout {
        canvas,
        shapes,
        labels,
    }
}
