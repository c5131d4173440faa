//! Configuration for the sbc-layout diagram renderer.
//!
//! This crate provides the render settings, their default values and the
//! color type shared with the rendering crate:
//!
//! - [`RenderSettings`]: figure geometry, resolution, crop and output options
//! - [`Color`]: named / hex RGB colors
//! - [`defaults`]: `default_*` functions backing the serde field defaults

pub mod defaults;
mod error;
mod settings;
mod types;

pub use error::ConfigError;
pub use settings::{RenderSettings, SubplotMargins};
pub use types::Color;
