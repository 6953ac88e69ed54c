//! Command-line arguments shared by the demo binaries.

use crate::color::ColorMode;
use crate::config::AppConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Color mode choices for `--color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// 24-bit color
    Truecolor,
    /// 256-color palette
    #[value(name = "256")]
    Palette256,
    /// 16 ANSI colors
    #[value(name = "16")]
    Ansi16,
    /// No color
    Mono,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Truecolor => Self::TrueColor,
            ColorChoice::Palette256 => Self::Color256,
            ColorChoice::Ansi16 => Self::Color16,
            ColorChoice::Mono => Self::Mono,
        }
    }
}

/// Terminal host options.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct DemoArgs {
    /// Input poll timeout per frame, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub tick_rate: u64,

    /// Logical pixels per terminal column
    #[arg(long, value_name = "PX")]
    pub cell_width: Option<f32>,

    /// Logical pixels per terminal row
    #[arg(long, value_name = "PX")]
    pub cell_height: Option<f32>,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,

    /// Force a color mode instead of detecting it
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Paint one frame, print its draw commands as JSON, and exit
    #[arg(long)]
    pub dump_frame: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

impl DemoArgs {
    /// Apply the arguments on top of a demo's preset.
    #[must_use]
    pub fn into_config(self, preset: AppConfig) -> AppConfig {
        AppConfig {
            tick_rate_ms: self.tick_rate,
            enable_mouse: !self.no_mouse,
            color_mode: self.color.map(ColorMode::from).or(preset.color_mode),
            cell_width: self
                .cell_width
                .filter(|w| *w > 0.0)
                .unwrap_or(preset.cell_width),
            cell_height: self
                .cell_height
                .filter(|h| *h > 0.0)
                .unwrap_or(preset.cell_height),
            quit_on_q: preset.quit_on_q,
        }
    }
}
