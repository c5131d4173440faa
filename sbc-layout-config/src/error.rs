//! Typed error variants for the sbc-layout-config crate.
//!
//! Library consumers who parse settings from YAML can match on these
//! instead of opaque strings.

use std::fmt;

/// Errors that can occur when parsing or validating render settings.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings document contained invalid YAML.
    Parse(serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    Validation(String),

    /// A color string was neither a known color name nor `#RRGGBB`.
    InvalidColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "YAML parse error in render settings: {e}"),
            ConfigError::Validation(msg) => write!(f, "Render settings validation error: {msg}"),
            ConfigError::InvalidColor(s) => write!(f, "Unknown color '{s}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) | ConfigError::InvalidColor(_) => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(e)
    }
}
