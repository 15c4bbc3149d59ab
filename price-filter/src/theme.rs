//! Visual constants for the price filter.
//!
//! ## Usage
//!
//! Build a [`Theme`] once (or load it from a TOML file) and share it with every
//! filter through an `Arc`. Components only ever read it.

use std::{path::Path, sync::Arc};

use serde::Deserialize;

use crate::error::{Error, Result};

/// A color in sRGB space with an alpha component.
///
/// Values are stored as `f32`s in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new `Color` from four `u8` values (red, green, blue, alpha).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba_u8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

/// Palette shared by the rail, thumbs and labels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Colours {
    /// Thumbs and the selected part of the rail.
    pub primary: Color,
    /// Grip lines drawn on the thumbs.
    pub secondary: Color,
    /// Unselected rail and the high thumb's overlap border.
    pub shadow: Color,
}

impl Default for Colours {
    fn default() -> Self {
        Self {
            primary: Color::BLACK,
            secondary: Color::WHITE,
            shadow: Color::from_rgba_u8(0xba, 0xbb, 0xbb, 0xff),
        }
    }
}

/// Rail line metrics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineTheme {
    /// Rail thickness.
    pub height: f32,
}

impl Default for LineTheme {
    fn default() -> Self {
        Self { height: 2.0 }
    }
}

/// Resting size of a thumb.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThumbTheme {
    /// Diameter when the thumb is not pressed.
    pub diameter: f32,
}

impl Default for ThumbTheme {
    fn default() -> Self {
        Self { diameter: 32.0 }
    }
}

/// Grip lines drawn in the middle of each thumb.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerticalLinesTheme {
    /// Line height.
    pub height: f32,
    /// Line thickness.
    pub width: f32,
    /// Distance between the outer edges of the two lines.
    pub container_width: f32,
}

impl Default for VerticalLinesTheme {
    fn default() -> Self {
        Self {
            height: 12.0,
            width: 2.0,
            container_width: 8.0,
        }
    }
}

/// Spacing for the caption/value labels above the slider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextInfoTheme {
    /// Gap between the value row and the slider.
    pub margin_bottom: f32,
}

impl Default for TextInfoTheme {
    fn default() -> Self {
        Self {
            margin_bottom: 12.0,
        }
    }
}

/// Slider-specific part of the theme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceSliderTheme {
    /// Fraction of the screen width the filter occupies.
    pub width: f32,
    /// Rail metrics.
    pub line: LineTheme,
    /// Low thumb.
    pub minimum: ThumbTheme,
    /// High thumb.
    pub maximum: ThumbTheme,
    /// Grip lines.
    pub vertical_lines: VerticalLinesTheme,
    /// Label spacing.
    pub text_info: TextInfoTheme,
}

impl Default for PriceSliderTheme {
    fn default() -> Self {
        Self {
            width: 0.7,
            line: LineTheme::default(),
            minimum: ThumbTheme::default(),
            maximum: ThumbTheme::default(),
            vertical_lines: VerticalLinesTheme::default(),
            text_info: TextInfoTheme::default(),
        }
    }
}

/// Read-only visual configuration injected into every filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Palette.
    pub colours: Colours,
    /// Slider metrics.
    pub price_slider: PriceSliderTheme,
}

impl Theme {
    /// Parses a TOML theme document. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::ThemeIo {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded price filter theme");
        Ok(theme)
    }

    /// Wraps the theme in the shared handle components expect.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Color::from_hex("#000000").ok(), Some(Color::BLACK));
        assert_eq!(Color::from_hex("#ffffff").ok(), Some(Color::WHITE));
        let translucent = Color::from_hex("#ff000080").ok();
        assert_eq!(translucent.map(|c| c.r), Some(1.0));
        assert_eq!(translucent.map(|c| c.a), Some(128.0 / 255.0));
    }

    #[test]
    fn rejects_malformed_colours() {
        assert!(matches!(
            Color::from_hex("000000"),
            Err(Error::InvalidColor(_))
        ));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn default_theme_matches_stock_metrics() {
        let theme = Theme::default();
        assert_eq!(theme.price_slider.minimum.diameter, 32.0);
        assert_eq!(theme.price_slider.maximum.diameter, 32.0);
        assert_eq!(theme.price_slider.line.height, 2.0);
        assert_eq!(theme.price_slider.width, 0.7);
    }

    #[test]
    fn toml_overrides_keep_other_defaults() {
        let theme = Theme::from_toml_str(
            r##"
            [colours]
            primary = "#1a73e8"

            [price_slider.maximum]
            diameter = 40.0
            "##,
        );
        assert!(theme.is_ok());
        let theme = theme.unwrap_or_default();
        assert_eq!(
            theme.colours.primary,
            Color::from_rgba_u8(0x1a, 0x73, 0xe8, 0xff)
        );
        assert_eq!(theme.colours.secondary, Color::WHITE);
        assert_eq!(theme.price_slider.maximum.diameter, 40.0);
        assert_eq!(theme.price_slider.minimum.diameter, 32.0);
    }

    #[test]
    fn bad_colour_in_document_is_a_parse_error() {
        let theme = Theme::from_toml_str("[colours]\nshadow = \"grey\"\n");
        assert!(matches!(theme, Err(Error::ThemeParse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Theme::load("/definitely/not/here/theme.toml");
        assert!(matches!(err, Err(Error::ThemeIo { .. })));
    }
}
