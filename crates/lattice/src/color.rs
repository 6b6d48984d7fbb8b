use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::LatticeError;

/// 8-bit RGB triple. Every rendered color is derived from two of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, `self` at `t = 0` and `other` at `t = 1`.
    ///
    /// `t` is clamped to `[0, 1]` and channels are rounded to the nearest integer.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let mix = |from: u8, to: u8| -> u8 {
            let value = f64::from(from) * (1.0 - t) + f64::from(to) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, LatticeError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(LatticeError::InvalidColor(value.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| LatticeError::InvalidColor(value.to_string()))
        };
        Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

impl FromStr for Color {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
