//! Value types shared between settings and the scene model.

mod color;

pub use color::Color;
