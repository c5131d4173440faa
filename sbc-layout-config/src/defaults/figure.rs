//! Default values for figure geometry and text.

use crate::Color;

pub fn figure_width_in() -> f64 {
    8.0
}

pub fn figure_height_in() -> f64 {
    6.0
}

pub fn background() -> Color {
    Color::WHITE
}

pub fn font_family() -> String {
    "DejaVu Sans".to_string()
}

// Subplot box as fractions of the figure, measured from the left/bottom edge.
pub fn margin_left() -> f64 {
    0.125
}

pub fn margin_right() -> f64 {
    0.9
}

pub fn margin_bottom() -> f64 {
    0.11
}

pub fn margin_top() -> f64 {
    0.88
}

pub fn title_pad_pt() -> f64 {
    6.0
}
