//! Differential renderer for terminal output.
//!
//! Only dirty cells are written. Cursor moves and color changes are skipped
//! when the terminal is already in the required state, and the whole frame
//! goes out through one buffered writer.

use super::cell_buffer::{Cell, CellBuffer};
use crate::color::ColorMode;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use flyout_core::Color;
use std::io::{self, BufWriter, Write};

/// Glyph showing the upper pixel as foreground over the lower one.
pub const UPPER_HALF_BLOCK: &str = "▀";

#[derive(Clone, Copy, Debug, PartialEq)]
struct StyleState {
    fg: Color,
    bg: Color,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            fg: Color::TRANSPARENT,
            bg: Color::TRANSPARENT,
        }
    }
}

/// Differential renderer that minimizes terminal I/O.
#[derive(Debug)]
pub struct DiffRenderer {
    color_mode: ColorMode,
    /// Last known cursor position (`u16::MAX` = unknown).
    cursor_x: u16,
    cursor_y: u16,
    last_style: StyleState,
    cells_written: usize,
    cursor_moves: usize,
    style_changes: usize,
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::with_color_mode(ColorMode::detect())
    }
}

impl DiffRenderer {
    /// Create a renderer for `color_mode`.
    #[must_use]
    pub const fn with_color_mode(color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            last_style: StyleState {
                fg: Color::TRANSPARENT,
                bg: Color::TRANSPARENT,
            },
            cells_written: 0,
            cursor_moves: 0,
            style_changes: 0,
        }
    }

    /// Color mode in use.
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Forget cursor and style state (after a resize or clear).
    pub fn reset(&mut self) {
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
        self.last_style = StyleState::default();
        self.cells_written = 0;
        self.cursor_moves = 0;
        self.style_changes = 0;
    }

    /// Cells written by the last flush.
    #[must_use]
    pub const fn cells_written(&self) -> usize {
        self.cells_written
    }

    /// Cursor moves issued by the last flush.
    #[must_use]
    pub const fn cursor_moves(&self) -> usize {
        self.cursor_moves
    }

    /// Color changes issued by the last flush.
    #[must_use]
    pub const fn style_changes(&self) -> usize {
        self.style_changes
    }

    /// Write dirty cells to `writer` and clear their dirty flags.
    ///
    /// Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn flush<W: Write>(
        &mut self,
        buffer: &mut CellBuffer,
        writer: &mut W,
    ) -> io::Result<usize> {
        self.cells_written = 0;
        self.cursor_moves = 0;
        self.style_changes = 0;

        let mut out = BufWriter::with_capacity(8192, writer);
        queue!(out, ResetColor)?;
        self.last_style = StyleState::default();

        let width = buffer.width();
        for idx in buffer.iter_dirty() {
            let cell = &buffer.cells()[idx];
            if cell.is_continuation() {
                continue;
            }
            let (x, y) = buffer.coords(idx);

            if self.cursor_x != x || self.cursor_y != y {
                queue!(out, MoveTo(x, y))?;
                self.cursor_x = x;
                self.cursor_y = y;
                self.cursor_moves += 1;
            }

            let (symbol, style) = self.resolve(cell);
            if style != self.last_style {
                self.apply_style(&mut out, style)?;
                self.last_style = style;
                self.style_changes += 1;
            }
            queue!(out, Print(symbol))?;

            self.cursor_x = self.cursor_x.saturating_add(u16::from(cell.width()));
            if self.cursor_x >= width {
                self.cursor_x = u16::MAX;
            }
            self.cells_written += 1;
        }

        queue!(out, ResetColor)?;
        buffer.clear_dirty();
        out.flush()?;
        Ok(self.cells_written)
    }

    /// Redraw every cell.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn flush_full<W: Write>(
        &mut self,
        buffer: &mut CellBuffer,
        writer: &mut W,
    ) -> io::Result<usize> {
        buffer.mark_all_dirty();
        self.reset();
        self.flush(buffer, writer)
    }

    /// Symbol and colors for a cell. Uniform pixel cells print a space so the
    /// foreground color can stay as it was.
    fn resolve<'c>(&self, cell: &'c Cell) -> (&'c str, StyleState) {
        if cell.is_glyph() {
            return (
                cell.symbol.as_str(),
                StyleState {
                    fg: cell.fg,
                    bg: cell.background(),
                },
            );
        }
        if cell.top == cell.bottom {
            return (
                " ",
                StyleState {
                    fg: self.last_style.fg,
                    bg: cell.top,
                },
            );
        }
        (
            UPPER_HALF_BLOCK,
            StyleState {
                fg: cell.top,
                bg: cell.bottom,
            },
        )
    }

    fn apply_style<W: Write>(&self, writer: &mut W, style: StyleState) -> io::Result<()> {
        if style.fg != self.last_style.fg {
            queue!(writer, SetForegroundColor(self.color_mode.to_crossterm(style.fg)))?;
        }
        if style.bg != self.last_style.bg {
            queue!(writer, SetBackgroundColor(self.color_mode.to_crossterm(style.bg)))?;
        }
        Ok(())
    }
}
