//! Cell buffer with half-block pixels and dirty tracking.
//!
//! Every cell holds two vertically stacked pixels (drawn with `▀`, upper
//! pixel as foreground) or a text glyph over the blend of both pixels.

use bitvec::prelude::*;
use compact_str::CompactString;
use flyout_core::Color;
use unicode_width::UnicodeWidthStr;

/// A single terminal cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Upper pixel.
    pub top: Color,
    /// Lower pixel.
    pub bottom: Color,
    /// Text glyph; empty when the cell shows its two pixels.
    pub symbol: CompactString,
    /// Glyph color.
    pub fg: Color,
    /// Display width of the glyph (0 marks a wide-glyph continuation).
    width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            top: Color::TRANSPARENT,
            bottom: Color::TRANSPARENT,
            symbol: CompactString::const_new(""),
            fg: Color::WHITE,
            width: 1,
        }
    }
}

impl Cell {
    /// Set one of the two pixels, dropping any glyph. Returns whether the
    /// cell changed.
    pub fn set_pixel(&mut self, lower: bool, color: Color) -> bool {
        self.paint(lower, color, true)
    }

    /// Set one of the two pixels but keep a glyph drawn over them.
    pub fn tint(&mut self, lower: bool, color: Color) -> bool {
        self.paint(lower, color, false)
    }

    fn paint(&mut self, lower: bool, color: Color, drop_glyph: bool) -> bool {
        let slot = if lower { &mut self.bottom } else { &mut self.top };
        let mut changed = *slot != color;
        *slot = color;
        if drop_glyph && (self.is_glyph() || self.width != 1) {
            self.symbol.clear();
            self.width = 1;
            changed = true;
        }
        changed
    }

    /// Put a glyph in this cell. Returns whether the cell changed.
    pub fn set_glyph(&mut self, symbol: &str, fg: Color) -> bool {
        let width = u8::try_from(UnicodeWidthStr::width(symbol).clamp(1, 2)).unwrap_or(1);
        let changed = self.symbol != symbol || self.fg != fg || self.width != width;
        if changed {
            self.symbol.clear();
            self.symbol.push_str(symbol);
            self.fg = fg;
            self.width = width;
        }
        changed
    }

    /// Mark this cell as covered by the wide glyph to its left.
    pub fn make_continuation(&mut self) -> bool {
        let changed = self.width != 0;
        self.symbol.clear();
        self.width = 0;
        changed
    }

    /// Whether this cell is covered by a wide glyph.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Whether this cell shows a glyph rather than two pixels.
    #[must_use]
    pub fn is_glyph(&self) -> bool {
        !self.symbol.is_empty()
    }

    /// Display width of the cell content.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Background behind a glyph: the mix of both pixels.
    #[must_use]
    pub fn background(&self) -> Color {
        if self.top == self.bottom {
            self.top
        } else {
            self.top.lerp(&self.bottom, 0.5)
        }
    }
}

/// Buffer of terminal cells with dirty tracking.
#[derive(Debug)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    /// One bit per cell, set when the cell changed since the last flush.
    dirty: BitVec,
}

impl CellBuffer {
    /// Create a buffer of `width` × `height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
            dirty: bitvec![0; size],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the buffer has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of cell (`x`, `y`).
    #[must_use]
    pub fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Cell coordinates of linear index `idx`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coords(&self, idx: usize) -> (u16, u16) {
        let width = usize::from(self.width.max(1));
        ((idx % width) as u16, (idx / width) as u16)
    }

    /// Cell at (`x`, `y`).
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// Color of pixel (`x`, `sub_y`), where `sub_y` counts half-rows.
    #[must_use]
    pub fn pixel(&self, x: u16, sub_y: u32) -> Option<Color> {
        let y = u16::try_from(sub_y / 2).ok()?;
        let cell = self.get(x, y)?;
        Some(if sub_y % 2 == 0 { cell.top } else { cell.bottom })
    }

    /// Paint pixel (`x`, `sub_y`), dropping any glyph in its cell.
    pub fn set_pixel(&mut self, x: u16, sub_y: u32, color: Color) {
        self.paint_pixel(x, sub_y, color, true);
    }

    /// Paint pixel (`x`, `sub_y`), keeping any glyph in its cell.
    pub fn tint_pixel(&mut self, x: u16, sub_y: u32, color: Color) {
        self.paint_pixel(x, sub_y, color, false);
    }

    fn paint_pixel(&mut self, x: u16, sub_y: u32, color: Color, drop_glyph: bool) {
        let Ok(y) = u16::try_from(sub_y / 2) else {
            return;
        };
        let lower = sub_y % 2 == 1;
        self.touch(x, y, |cell| {
            if drop_glyph {
                cell.set_pixel(lower, color)
            } else {
                cell.tint(lower, color)
            }
        });
    }

    /// Put a glyph at cell (`x`, `y`); wide glyphs also claim the next cell.
    pub fn set_glyph(&mut self, x: u16, y: u16, symbol: &str, fg: Color) {
        self.touch(x, y, |cell| cell.set_glyph(symbol, fg));
        if UnicodeWidthStr::width(symbol) > 1 && x + 1 < self.width {
            self.touch(x + 1, y, Cell::make_continuation);
        }
    }

    fn touch(&mut self, x: u16, y: u16, apply: impl FnOnce(&mut Cell) -> bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        if let Some(cell) = self.cells.get_mut(idx) {
            if apply(cell) {
                self.dirty.set(idx, true);
            }
        }
    }

    /// Mark every cell for redraw.
    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    /// Clear dirty flags.
    pub fn clear_dirty(&mut self) {
        self.dirty.fill(false);
    }

    /// Number of dirty cells.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.count_ones()
    }

    /// Iterate over dirty cell indices.
    pub fn iter_dirty(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty.iter_ones()
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Resize the buffer, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        let size = usize::from(width) * usize::from(height);
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(size, Cell::default());
        self.dirty = bitvec![1; size];
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.mark_all_dirty();
    }

    /// Text of row `y`: glyphs as-is, pixel cells as spaces.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.is_continuation())
            .map(|cell| {
                if cell.is_glyph() {
                    cell.symbol.as_str()
                } else {
                    " "
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::from_rgb8(255, 0, 0);
    const BLUE: Color = Color::from_rgb8(0, 0, 255);

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = CellBuffer::new(10, 4);
        assert_eq!(buf.len(), 40);
        assert!(!buf.is_empty());
        assert_eq!(buf.dirty_count(), 0);
        assert_eq!(buf.get(9, 3), Some(&Cell::default()));
        assert!(buf.get(10, 0).is_none());
    }

    #[test]
    fn test_index_coords() {
        let buf = CellBuffer::new(10, 4);
        assert_eq!(buf.index(3, 2), 23);
        assert_eq!(buf.coords(23), (3, 2));
    }

    #[test]
    fn test_pixels_share_a_cell() {
        let mut buf = CellBuffer::new(2, 2);
        buf.set_pixel(1, 2, RED);
        buf.set_pixel(1, 3, BLUE);
        let cell = buf.get(1, 1).expect("cell");
        assert_eq!(cell.top, RED);
        assert_eq!(cell.bottom, BLUE);
        assert_eq!(buf.pixel(1, 2), Some(RED));
        assert_eq!(buf.pixel(1, 3), Some(BLUE));
        assert_eq!(buf.dirty_count(), 1);
        assert!(buf.pixel(1, 4).is_none());
    }

    #[test]
    fn test_unchanged_write_stays_clean() {
        let mut buf = CellBuffer::new(2, 1);
        buf.set_pixel(0, 0, RED);
        buf.clear_dirty();
        buf.set_pixel(0, 0, RED);
        assert_eq!(buf.dirty_count(), 0);
        buf.set_glyph(0, 0, "a", BLUE);
        buf.clear_dirty();
        buf.set_glyph(0, 0, "a", BLUE);
        assert_eq!(buf.dirty_count(), 0);
    }

    #[test]
    fn test_pixel_replaces_glyph() {
        let mut buf = CellBuffer::new(2, 1);
        buf.set_glyph(0, 0, "x", RED);
        assert!(buf.get(0, 0).expect("cell").is_glyph());
        buf.set_pixel(0, 1, BLUE);
        let cell = buf.get(0, 0).expect("cell");
        assert!(!cell.is_glyph());
        assert_eq!(cell.bottom, BLUE);
    }

    #[test]
    fn test_tint_keeps_glyph() {
        let mut buf = CellBuffer::new(2, 1);
        buf.set_glyph(0, 0, "x", RED);
        buf.clear_dirty();
        buf.tint_pixel(0, 1, BLUE);
        let cell = buf.get(0, 0).expect("cell");
        assert_eq!(cell.symbol, "x");
        assert_eq!(cell.bottom, BLUE);
        assert_eq!(buf.dirty_count(), 1);
    }

    #[test]
    fn test_wide_glyph_claims_next_cell() {
        let mut buf = CellBuffer::new(3, 1);
        buf.set_glyph(0, 0, "漢", RED);
        assert_eq!(buf.get(0, 0).expect("cell").width(), 2);
        assert!(buf.get(1, 0).expect("cell").is_continuation());
        assert_eq!(buf.row_text(0), "漢 ");
    }

    #[test]
    fn test_glyph_background_blends_pixels() {
        let mut cell = Cell::default();
        cell.set_pixel(false, Color::BLACK);
        cell.set_pixel(true, Color::WHITE);
        let bg = cell.background();
        assert!((bg.r - 0.5).abs() < 1e-6);
        cell.set_pixel(true, Color::BLACK);
        assert_eq!(cell.background(), Color::BLACK);
    }

    #[test]
    fn test_resize_marks_all_dirty() {
        let mut buf = CellBuffer::new(2, 2);
        buf.resize(5, 3);
        assert_eq!(buf.width(), 5);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.dirty_count(), 15);
        buf.clear_dirty();
        buf.clear();
        assert_eq!(buf.dirty_count(), 15);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut buf = CellBuffer::new(2, 2);
        buf.set_pixel(5, 0, RED);
        buf.set_pixel(0, 9, RED);
        buf.set_glyph(2, 0, "a", RED);
        assert_eq!(buf.dirty_count(), 0);
    }

    #[test]
    fn test_row_text() {
        let mut buf = CellBuffer::new(5, 1);
        buf.set_glyph(1, 0, "h", RED);
        buf.set_glyph(2, 0, "i", RED);
        assert_eq!(buf.row_text(0), " hi  ");
    }
}
