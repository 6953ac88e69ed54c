//! Direct terminal backend.
//!
//! ```text
//! Canvas trait → CellCanvas → CellBuffer → DiffRenderer → crossterm
//! ```
//!
//! - Half-block cells give two pixels per character cell
//! - Only cells that changed since the last flush are written
//! - One buffered write per frame

mod cell_buffer;
mod cell_canvas;
mod diff_renderer;

pub use cell_buffer::{Cell, CellBuffer};
pub use cell_canvas::CellCanvas;
pub use diff_renderer::{DiffRenderer, UPPER_HALF_BLOCK};
