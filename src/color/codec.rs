//! Hex codec for the [`Color`] value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("malformed color code: {0:?}. Use hex format like #RRGGBB or #RGB")]
    Malformed(String),
}

/// An RGB color with three 8-bit channels.
///
/// Equality is exact channel equality. The canonical textual form is a
/// lowercase `#rrggbb` code (rendered by `Display`); parsing accepts either
/// case and the 3-digit shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color code.
    ///
    /// Strips one optional leading `#`. Accepts the 6-digit form or the
    /// 3-digit shorthand, where each digit is doubled (`#413` -> `#441133`).
    /// Any other length, or any non-hex digit, fails.
    pub fn parse_hex(code: &str) -> Result<Self, ColorError> {
        let digits = code.strip_prefix('#').unwrap_or(code);
        let malformed = || ColorError::Malformed(code.to_string());

        // u8::from_str_radix tolerates a leading sign, so reject anything
        // that is not a hex digit before converting.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(malformed()),
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| malformed())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Canonical lowercase `#rrggbb` code.
    pub fn hex(&self) -> String {
        self.to_string()
    }

    /// Build a color from real-valued channels.
    ///
    /// Each channel is independently clamped to `[0, 255]` and then
    /// truncated toward zero. The luminance rescale relies on this exact
    /// clamp-then-truncate order; changing it shifts the search results.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        let byte = |x: f64| x.clamp(0.0, 255.0) as u8;
        Self::new(byte(r), byte(g), byte(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit() {
        let c = Color::parse_hex("#f0000d").unwrap();
        assert_eq!(c, Color::new(0xf0, 0x00, 0x0d));
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(
            Color::parse_hex("00ff00").unwrap(),
            Color::new(0, 255, 0)
        );
    }

    #[test]
    fn test_parse_shorthand_expands_digits() {
        assert_eq!(
            Color::parse_hex("#fff").unwrap(),
            Color::parse_hex("#ffffff").unwrap()
        );
        assert_eq!(
            Color::parse_hex("#413").unwrap(),
            Color::new(0x44, 0x11, 0x33)
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Color::parse_hex("#A1B2C3").unwrap(),
            Color::parse_hex("#a1b2c3").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_lengths() {
        for code in ["", "#", "#f", "#ff", "#ffff", "#fffff", "#fffffff"] {
            assert!(Color::parse_hex(code).is_err(), "accepted {code:?}");
        }
    }

    #[test]
    fn test_parse_rejects_non_hex_digits() {
        assert!(Color::parse_hex("#gggggg").is_err());
        assert!(Color::parse_hex("#12345z").is_err());
        assert!(Color::parse_hex("#+12345").is_err());
        assert!(Color::parse_hex("# 12345").is_err());
    }

    #[test]
    fn test_format_is_lowercase() {
        assert_eq!(Color::new(0xAB, 0xCD, 0xEF).hex(), "#abcdef");
    }

    #[test]
    fn test_parse_format_round_trip() {
        for c in [
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(0x41, 0x13, 0x37),
            Color::new(1, 2, 3),
        ] {
            assert_eq!(Color::parse_hex(&c.hex()).unwrap(), c);
        }
    }

    #[test]
    fn test_from_channels_clamps_then_truncates() {
        assert_eq!(Color::from_channels(-4.0, 0.0, 300.0), Color::new(0, 0, 255));
        assert_eq!(
            Color::from_channels(12.9, 200.999, 255.0),
            Color::new(12, 200, 255)
        );
    }
}
