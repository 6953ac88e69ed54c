//! Terminal host for Flyout widget trees.
//!
//! Widgets paint in logical pixels; this crate rasterizes them into terminal
//! cells (two pixels per cell via `▀`) and talks to the terminal through
//! `crossterm`.
//!
//! - [`App`]: the frame loop (render, flush, poll input, tick animations)
//! - [`direct`]: cell buffer, rasterizing canvas, differential renderer
//! - [`InputHandler`]: crossterm events to widget events in pixel coordinates
//! - [`AppConfig`], [`DemoArgs`], [`init_tracing`]: what the binaries set up
//!
//! # Example
//!
//! ```no_run
//! use flyout_terminal::{App, AppConfig};
//! use flyout_widgets::{ToggleSwitch, Window};
//!
//! let window = Window::new("Toggle switch", 200.0, 100.0, ToggleSwitch::new())
//!     .fixed()
//!     .place_content(70.0, 35.0);
//! App::with_config(window, AppConfig::toggle_switch()).run()?;
//! # Ok::<(), flyout_terminal::AppError>(())
//! ```

#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)] // exact transparency checks on alpha

mod app;
pub mod cli;
mod color;
mod config;
pub mod direct;
mod error;
mod input;
mod logging;

pub use app::{App, CrosstermTerminal, FrameMetrics, Terminal};
pub use cli::{ColorChoice, DemoArgs};
pub use color::ColorMode;
pub use config::AppConfig;
pub use error::AppError;
pub use input::InputHandler;
pub use logging::{env_filter, init_tracing};

// Re-export core types for convenience
pub use flyout_core::{Canvas, Color, Event, Point, Rect, Size, Widget};
