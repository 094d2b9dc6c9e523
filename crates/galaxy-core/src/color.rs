//! Linear RGB colors for galaxy gradients

use std::fmt;

/// RGB color with channels in [0, 1]
///
/// Channels are used as-is (no sRGB decoding), so a color built from
/// `#ff6030` keeps `r == 1.0` and interpolation happens on the raw values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels without any gamma conversion
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.chars().count() != 6 {
            return Err(ColorParseError::Length(digits.chars().count()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(digits.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(digits.to_string()))
        };

        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Nearest 8-bit channels, the inverse of [`Color::from_rgb8`]
    pub fn to_rgb8(&self) -> [u8; 3] {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b)]
    }

    /// Format as `#rrggbb`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Linear interpolation towards `other`, `t` in [0, 1]
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        Color::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Errors from [`Color::from_hex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Expected exactly six hex digits
    Length(usize),
    /// A character outside `[0-9a-fA-F]`
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Length(len) => {
                write!(f, "expected 6 hex digits, found {}", len)
            }
            ColorParseError::InvalidDigit(digits) => {
                write!(f, "invalid hex digit in color '{}'", digits)
            }
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Color::from_hex("#ff6030").unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 96.0 / 255.0);
        assert_eq!(color.b, 48.0 / 255.0);

        assert_eq!(Color::from_hex("1b3984").unwrap(), Color::from_rgb8(0x1b, 0x39, 0x84));
    }

    #[test]
    fn test_from_hex_errors() {
        assert_eq!(Color::from_hex("#fff"), Err(ColorParseError::Length(3)));
        assert!(matches!(
            Color::from_hex("#gg0000"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::from_hex("#1b3984").unwrap().to_hex(), "#1b3984");
    }

    #[test]
    fn test_rgb8_round_trip() {
        let color = Color::from_rgb8(0xff, 0x60, 0x30);
        assert_eq!(color.to_rgb8(), [0xff, 0x60, 0x30]);
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_rgb8(), [255, 0, 128]);
    }

    #[test]
    fn test_lerp_color() {
        let gray = Color::BLACK.lerp(Color::WHITE, 0.5);

        assert_eq!(gray.r, 0.5);
        assert_eq!(gray.g, 0.5);
        assert_eq!(gray.b, 0.5);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
    }
}
