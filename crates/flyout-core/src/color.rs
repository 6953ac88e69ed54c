//! Color representation with HSV lightening.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// Supports 6-character RGB and 8-character RGBA formats.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| ColorParseError::InvalidHex)
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Linear interpolation between two colors; the endpoints are exact.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        Self::new(
            (other.r - self.r).mul_add(t, self.r),
            (other.g - self.g).mul_add(t, self.g),
            (other.b - self.b).mul_add(t, self.b),
            (other.a - self.a).mul_add(t, self.a),
        )
    }

    /// Hue in degrees [0, 360), saturation and value in [0, 1].
    #[must_use]
    pub fn to_hsv(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == self.r {
            60.0 * ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        (hue, saturation, max)
    }

    /// Build a color from hue (degrees), saturation, value and alpha.
    #[must_use]
    pub fn from_hsv(hue: f32, saturation: f32, value: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new(r + m, g + m, b + m, alpha)
    }

    /// Lighter variant of this color.
    ///
    /// `factor` is a percentage: 150 returns a color with 50% more value.
    /// Value overflowing full brightness is taken out of saturation instead.
    /// Factors below 100 darken; non-positive factors return the color unchanged.
    #[must_use]
    pub fn lighter(&self, factor: u32) -> Self {
        if factor == 0 {
            return *self;
        }
        let (h, mut s, v) = self.to_hsv();
        let mut v = v * factor as f32 / 100.0;
        if v > 1.0 {
            s = (s - (v - 1.0)).max(0.0);
            v = 1.0;
        }
        Self::from_hsv(h, s, v, self.a)
    }

    /// Black color
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    /// White color
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
    /// Invalid string length
    #[error("invalid hex string length {0} (expected 6 or 8)")]
    InvalidLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: &Color, b: &Color) -> bool {
        (a.r - b.r).abs() < 0.01 && (a.g - b.g).abs() < 0.01 && (a.b - b.b).abs() < 0.01
    }

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#4CAF50").unwrap();
        assert_eq!(c, Color::from_rgb8(0x4c, 0xaf, 0x50));
        assert_eq!(Color::from_hex("cccccc").unwrap().to_hex(), "#cccccc");
    }

    #[test]
    fn test_color_from_hex_with_alpha() {
        let c = Color::from_hex("#ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.a - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(Color::from_hex("#gg0000"), Err(ColorParseError::InvalidHex));
        assert_eq!(Color::from_hex("#ff"), Err(ColorParseError::InvalidLength(2)));
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.g - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_hsv_roundtrip_primary() {
        let green = Color::from_rgb8(0x4c, 0xaf, 0x50);
        let (h, s, v) = green.to_hsv();
        assert!(close(&Color::from_hsv(h, s, v, 1.0), &green));
    }

    #[test]
    fn test_lighter_gray_scales_value() {
        // #cccccc has value 0.8; 120% gives 0.96 (#f5f5f5)
        let light = Color::from_rgb8(0xcc, 0xcc, 0xcc).lighter(120);
        assert_eq!(light.to_hex(), "#f5f5f5");
    }

    #[test]
    fn test_lighter_green_stays_saturated() {
        let green = Color::from_rgb8(0x4c, 0xaf, 0x50);
        let light = green.lighter(120);
        let (h0, s0, v0) = green.to_hsv();
        let (h1, s1, v1) = light.to_hsv();
        assert!((h0 - h1).abs() < 0.5);
        assert!((s0 - s1).abs() < 0.01);
        assert!((v1 - v0 * 1.2).abs() < 0.01);
    }

    #[test]
    fn test_lighter_overflow_desaturates() {
        let red = Color::from_rgb8(255, 0, 0);
        let light = red.lighter(150);
        let (_, s, v) = light.to_hsv();
        assert_eq!(v, 1.0);
        assert!((s - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_lighter_zero_factor_is_identity() {
        let c = Color::from_rgb8(10, 20, 30);
        assert_eq!(c.lighter(0), c);
    }

    proptest! {
        #[test]
        fn prop_color_clamps_to_valid_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
            let c = Color::new(r, g, b, a);
            prop_assert!((0.0..=1.0).contains(&c.r));
            prop_assert!((0.0..=1.0).contains(&c.g));
            prop_assert!((0.0..=1.0).contains(&c.b));
            prop_assert!((0.0..=1.0).contains(&c.a));
        }

        #[test]
        fn prop_lighter_never_darkens(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, f in 100u32..300) {
            let c = Color::from_rgb8(r, g, b);
            let (_, _, v0) = c.to_hsv();
            let (_, _, v1) = c.lighter(f).to_hsv();
            prop_assert!(v1 + 0.001 >= v0);
        }

        #[test]
        fn prop_lerp_endpoints(r in 0.0f32..1.0, g in 0.0f32..1.0, b in 0.0f32..1.0) {
            let c1 = Color::rgb(r, g, b);
            let c2 = Color::rgb(1.0 - r, 1.0 - g, 1.0 - b);
            prop_assert_eq!(c1.lerp(&c2, 0.0), c1);
            prop_assert_eq!(c1.lerp(&c2, 1.0), c2);
        }
    }
}
