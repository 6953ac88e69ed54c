//! Host configuration.

use crate::color::ColorMode;
use flyout_core::Size;

/// Terminal host configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Input poll timeout per frame in milliseconds.
    pub tick_rate_ms: u64,
    /// Capture mouse events.
    pub enable_mouse: bool,
    /// Forced color mode (auto-detect when `None`).
    pub color_mode: Option<ColorMode>,
    /// Logical pixels covered by one terminal column.
    pub cell_width: f32,
    /// Logical pixels covered by one terminal row.
    pub cell_height: f32,
    /// Quit on a plain `q` keypress (Esc and Ctrl-C always quit).
    pub quit_on_q: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            enable_mouse: true,
            color_mode: None,
            cell_width: 8.0,
            cell_height: 16.0,
            quit_on_q: true,
        }
    }
}

impl AppConfig {
    /// Preset for the hover-menu demo.
    ///
    /// Cells match the 12 px label font so captions fit their buttons. The
    /// text area takes typed characters, so `q` does not quit.
    #[must_use]
    pub fn hover_menu() -> Self {
        Self {
            cell_width: 7.0,
            cell_height: 14.0,
            quit_on_q: false,
            ..Self::default()
        }
    }

    /// Preset for the toggle-switch demo: finer cells for the small control.
    #[must_use]
    pub fn toggle_switch() -> Self {
        Self {
            cell_width: 4.0,
            cell_height: 8.0,
            ..Self::default()
        }
    }

    /// Color mode to render with.
    #[must_use]
    pub fn resolved_color_mode(&self) -> ColorMode {
        self.color_mode.unwrap_or_else(ColorMode::detect)
    }

    /// Logical size of one terminal cell.
    #[must_use]
    pub const fn cell_size(&self) -> Size {
        Size::new(self.cell_width, self.cell_height)
    }

    /// Logical size of a terminal of `cols` × `rows` cells.
    #[must_use]
    pub fn viewport(&self, cols: u16, rows: u16) -> Size {
        Size::new(
            f32::from(cols) * self.cell_width,
            f32::from(rows) * self.cell_height,
        )
    }
}
