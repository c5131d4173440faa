//! Integration tests for sbc-layout-config.

use sbc_layout_config::{Color, ConfigError, RenderSettings};

#[test]
fn test_settings_defaults() {
    let settings = RenderSettings::default();
    assert_eq!(settings.figure_width_in, 8.0);
    assert_eq!(settings.figure_height_in, 6.0);
    assert_eq!(settings.dpi, 300);
    assert_eq!(settings.output_path, "sbc_board_layout.png");
    assert!(settings.tight_crop);
    assert_eq!(settings.pad_inches, 0.1);
    assert_eq!(settings.background, Color::WHITE);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_figure_size_px() {
    let settings = RenderSettings::new();
    assert_eq!(settings.figure_size_px(300), (2400, 1800));
    assert_eq!(settings.figure_size_px(100), (800, 600));
}

#[test]
fn test_builder_methods() {
    let settings = RenderSettings::new()
        .with_figure_size(4.0, 3.0)
        .with_dpi(72)
        .with_output_path("board.png")
        .with_tight_crop(false)
        .with_background(Color::BLACK)
        .with_font_family("Liberation Sans");
    assert_eq!(settings.figure_size_px(settings.dpi), (288, 216));
    assert_eq!(settings.output_path, "board.png");
    assert!(!settings.tight_crop);
    assert_eq!(settings.background, Color::BLACK);
    assert_eq!(settings.font_family, "Liberation Sans");
}

#[test]
fn test_yaml_partial_document_fills_defaults() {
    let yaml = r##"
dpi: 150
background: "#F0F0F0"
margins:
  left: 0.05
"##;
    let settings = RenderSettings::from_yaml_str(yaml).unwrap();
    assert_eq!(settings.dpi, 150);
    assert_eq!(settings.background, Color::rgb(0xF0, 0xF0, 0xF0));
    assert_eq!(settings.margins.left, 0.05);
    assert_eq!(settings.margins.right, 0.9);
    assert_eq!(settings.figure_width_in, 8.0);
}

#[test]
fn test_yaml_named_color() {
    let settings = RenderSettings::from_yaml_str("background: yellow").unwrap();
    assert_eq!(settings.background, Color::rgb(255, 255, 0));
}

#[test]
fn test_yaml_rejects_unknown_color() {
    let err = RenderSettings::from_yaml_str("background: not-a-color").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_validate_rejects_zero_dpi() {
    let err = RenderSettings::new().with_dpi(0).validate().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_validate_rejects_non_positive_figure() {
    assert!(RenderSettings::new().with_figure_size(0.0, 3.0).validate().is_err());
    assert!(RenderSettings::new().with_figure_size(4.0, f64::NAN).validate().is_err());
}

#[test]
fn test_validate_rejects_inverted_margins() {
    let mut settings = RenderSettings::new();
    settings.margins.left = 0.95;
    let err = settings.validate().unwrap_err();
    assert!(err.to_string().contains("left < right"));
}

#[test]
fn test_validate_rejects_negative_pad() {
    assert!(RenderSettings::new().with_pad_inches(-0.5).validate().is_err());
}
