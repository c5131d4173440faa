//! Render settings: figure geometry, export resolution and crop behavior.

use serde::{Deserialize, Serialize};

use crate::{Color, ConfigError};

/// Placement of the subplot box inside the figure.
///
/// Each value is a fraction of the figure size measured from the left
/// (`left`, `right`) or bottom (`bottom`, `top`) edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotMargins {
    #[serde(default = "crate::defaults::margin_left")]
    pub left: f64,
    #[serde(default = "crate::defaults::margin_right")]
    pub right: f64,
    #[serde(default = "crate::defaults::margin_bottom")]
    pub bottom: f64,
    #[serde(default = "crate::defaults::margin_top")]
    pub top: f64,
}

impl Default for SubplotMargins {
    fn default() -> Self {
        Self {
            left: crate::defaults::margin_left(),
            right: crate::defaults::margin_right(),
            bottom: crate::defaults::margin_bottom(),
            top: crate::defaults::margin_top(),
        }
    }
}

/// Settings consumed by the diagram renderer.
///
/// The binary renders with [`RenderSettings::default`]; library callers may
/// build their own with the `with_*` methods or parse YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Figure width in inches.
    #[serde(default = "crate::defaults::figure_width_in")]
    pub figure_width_in: f64,

    /// Figure height in inches.
    #[serde(default = "crate::defaults::figure_height_in")]
    pub figure_height_in: f64,

    /// Export resolution in dots per inch.
    #[serde(default = "crate::defaults::dpi")]
    pub dpi: u32,

    /// Output file path, relative to the working directory.
    #[serde(default = "crate::defaults::output_path")]
    pub output_path: String,

    /// Crop the exported image to the drawn content plus `pad_inches`.
    #[serde(default = "crate::defaults::tight_crop")]
    pub tight_crop: bool,

    #[serde(default = "crate::defaults::pad_inches")]
    pub pad_inches: f64,

    /// Figure background color.
    #[serde(default = "crate::defaults::background")]
    pub background: Color,

    /// Font family used for labels, tick labels and the title.
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    #[serde(default)]
    pub margins: SubplotMargins,

    /// Gap between the top of the plot box and the title baseline, in points.
    #[serde(default = "crate::defaults::title_pad_pt")]
    pub title_pad_pt: f64,

    /// Largest allowed surface width or height in pixels.
    #[serde(default = "crate::defaults::max_dimension_px")]
    pub max_dimension_px: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            figure_width_in: crate::defaults::figure_width_in(),
            figure_height_in: crate::defaults::figure_height_in(),
            dpi: crate::defaults::dpi(),
            output_path: crate::defaults::output_path(),
            tight_crop: crate::defaults::tight_crop(),
            pad_inches: crate::defaults::pad_inches(),
            background: crate::defaults::background(),
            font_family: crate::defaults::font_family(),
            margins: SubplotMargins::default(),
            title_pad_pt: crate::defaults::title_pad_pt(),
            max_dimension_px: crate::defaults::max_dimension_px(),
        }
    }
}

impl RenderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a YAML document; missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings: RenderSettings = serde_yaml_ng::from_str(yaml)?;
        settings.validate()?;
        log::debug!("Parsed render settings: {settings:?}");
        Ok(settings)
    }

    pub fn with_figure_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.figure_width_in = width_in;
        self.figure_height_in = height_in;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_tight_crop(mut self, tight_crop: bool) -> Self {
        self.tight_crop = tight_crop;
        self
    }

    pub fn with_pad_inches(mut self, pad_inches: f64) -> Self {
        self.pad_inches = pad_inches;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Figure size in pixels at `dpi`, rounded to the nearest pixel.
    pub fn figure_size_px(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.figure_width_in * dpi).round() as u32,
            (self.figure_height_in * dpi).round() as u32,
        )
    }

    /// Check that every field is usable for rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!(
                    "{name} must be a positive number, got {v}"
                )))
            }
        };
        positive("figure_width_in", self.figure_width_in)?;
        positive("figure_height_in", self.figure_height_in)?;

        if self.dpi == 0 {
            return Err(ConfigError::Validation("dpi must be greater than 0".into()));
        }
        if !self.pad_inches.is_finite() || self.pad_inches < 0.0 {
            return Err(ConfigError::Validation(format!(
                "pad_inches must be >= 0, got {}",
                self.pad_inches
            )));
        }
        if !self.title_pad_pt.is_finite() || self.title_pad_pt < 0.0 {
            return Err(ConfigError::Validation(format!(
                "title_pad_pt must be >= 0, got {}",
                self.title_pad_pt
            )));
        }
        if self.output_path.trim().is_empty() {
            return Err(ConfigError::Validation("output_path must not be empty".into()));
        }
        if self.max_dimension_px == 0 {
            return Err(ConfigError::Validation(
                "max_dimension_px must be greater than 0".into(),
            ));
        }

        let m = &self.margins;
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !(in_unit(m.left) && in_unit(m.right) && in_unit(m.bottom) && in_unit(m.top)) {
            return Err(ConfigError::Validation(format!(
                "subplot margins must lie in [0, 1], got {m:?}"
            )));
        }
        if m.left >= m.right || m.bottom >= m.top {
            return Err(ConfigError::Validation(format!(
                "subplot margins must satisfy left < right and bottom < top, got {m:?}"
            )));
        }
        Ok(())
    }
}
