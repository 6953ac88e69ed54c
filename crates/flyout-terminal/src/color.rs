//! Color mode detection and conversion for terminals.

use crossterm::style::Color as CrosstermColor;
use flyout_core::Color;

/// Terminal color capability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit true color (COLORTERM=truecolor or 24bit).
    #[default]
    TrueColor,
    /// 256 color palette.
    Color256,
    /// 16 ANSI colors.
    Color16,
    /// Monochrome (no color).
    Mono,
}

impl ColorMode {
    /// Auto-detect terminal color capabilities.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    /// Detect color mode from `COLORTERM` and `TERM` values.
    #[must_use]
    pub fn detect_with_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }

        match term {
            Some(t) if t.contains("256color") => Self::Color256,
            Some(t) if t.contains("color") || t.contains("xterm") => Self::Color16,
            Some("dumb") | None => Self::Mono,
            _ => Self::Color16,
        }
    }

    /// Convert a toolkit color to a crossterm color for this mode.
    ///
    /// Fully transparent colors map to `Reset` so unpainted cells keep the
    /// terminal's own background.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_crossterm(self, color: Color) -> CrosstermColor {
        if color.a == 0.0 {
            return CrosstermColor::Reset;
        }

        let r = (color.r * 255.0).round() as u8;
        let g = (color.g * 255.0).round() as u8;
        let b = (color.b * 255.0).round() as u8;

        match self {
            Self::TrueColor => CrosstermColor::Rgb { r, g, b },
            Self::Color256 => CrosstermColor::AnsiValue(Self::rgb_to_256(r, g, b)),
            Self::Color16 => Self::rgb_to_16(r, g, b),
            Self::Mono => {
                if luminance(r, g, b) > 127 {
                    CrosstermColor::White
                } else {
                    CrosstermColor::Black
                }
            }
        }
    }

    fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            // 24-step grayscale ramp
            return 232 + ((r - 8) / 10).min(23);
        }

        // 6x6x6 color cube
        let level = |c: u8| (u16::from(c) * 5 / 255) as u8;
        16 + 36 * level(r) + 6 * level(g) + level(b)
    }

    fn rgb_to_16(r: u8, g: u8, b: u8) -> CrosstermColor {
        let bright = luminance(r, g, b) > 127;
        let threshold = r.max(g).max(b) / 2;

        match (r > threshold, g > threshold, b > threshold, bright) {
            (false, false, false, false) => CrosstermColor::Black,
            (false, false, false, true) => CrosstermColor::DarkGrey,
            (true, false, false, false) => CrosstermColor::DarkRed,
            (true, false, false, true) => CrosstermColor::Red,
            (false, true, false, false) => CrosstermColor::DarkGreen,
            (false, true, false, true) => CrosstermColor::Green,
            (true, true, false, false) => CrosstermColor::DarkYellow,
            (true, true, false, true) => CrosstermColor::Yellow,
            (false, false, true, false) => CrosstermColor::DarkBlue,
            (false, false, true, true) => CrosstermColor::Blue,
            (true, false, true, false) => CrosstermColor::DarkMagenta,
            (true, false, true, true) => CrosstermColor::Magenta,
            (false, true, true, false) => CrosstermColor::DarkCyan,
            (false, true, true, true) => CrosstermColor::Cyan,
            (true, true, true, false) => CrosstermColor::Grey,
            (true, true, true, true) => CrosstermColor::White,
        }
    }
}

fn luminance(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000
}
