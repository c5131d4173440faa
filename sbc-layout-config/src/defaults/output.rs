//! Default values for raster export.

pub fn dpi() -> u32 {
    300
}

pub fn output_path() -> String {
    "sbc_board_layout.png".to_string()
}

pub fn tight_crop() -> bool {
    true
}

pub fn pad_inches() -> f64 {
    0.1
}

pub fn max_dimension_px() -> u32 {
    16_384
}
