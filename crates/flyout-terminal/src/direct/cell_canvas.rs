//! Canvas that rasterizes widget drawing into a [`CellBuffer`].
//!
//! Widgets paint in logical pixels. One terminal cell covers
//! `cell_width` × `cell_height` of them and shows two pixels, so shapes are
//! sampled on a grid of `cell_width` × `cell_height / 2` at each sample's
//! center. Text snaps to whole cells.

use super::cell_buffer::CellBuffer;
use flyout_core::{
    rounded_rect_contains, Canvas, Color, LinearGradient, Point, Rect, Size, TextStyle,
};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Canvas writing half-block pixels and glyphs into a cell buffer.
pub struct CellCanvas<'a> {
    buffer: &'a mut CellBuffer,
    cell: Size,
    clip_stack: Vec<Rect>,
}

impl<'a> CellCanvas<'a> {
    /// Create a canvas over `buffer` where one cell covers `cell` pixels.
    #[must_use]
    pub fn new(buffer: &'a mut CellBuffer, cell: Size) -> Self {
        Self {
            buffer,
            cell,
            clip_stack: Vec::new(),
        }
    }

    /// Logical size of the whole buffer.
    #[must_use]
    pub fn viewport(&self) -> Size {
        Size::new(
            f32::from(self.buffer.width()) * self.cell.width,
            f32::from(self.buffer.height()) * self.cell.height,
        )
    }

    fn clip(&self) -> Rect {
        self.clip_stack
            .last()
            .copied()
            .unwrap_or_else(|| Rect::from_size(self.viewport()))
    }

    fn sample_height(&self) -> f32 {
        self.cell.height / 2.0
    }

    fn columns(&self, start: f32, end: f32) -> Range<u32> {
        span(start, end, self.cell.width, u32::from(self.buffer.width()))
    }

    fn half_rows(&self, start: f32, end: f32) -> Range<u32> {
        span(
            start,
            end,
            self.sample_height(),
            u32::from(self.buffer.height()) * 2,
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample_point(&self, column: u32, half_row: u32) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.cell.width,
            (half_row as f32 + 0.5) * self.sample_height(),
        )
    }

    fn set(&mut self, column: u32, half_row: u32, color: Color, covers_cell: bool) {
        if color.a == 0.0 {
            return;
        }
        let Ok(x) = u16::try_from(column) else {
            return;
        };
        if covers_cell {
            self.buffer.set_pixel(x, half_row, color);
        } else {
            self.buffer.tint_pixel(x, half_row, color);
        }
    }

    /// Paint every sample in `area` (clipped) for which `shade` yields a color.
    ///
    /// A glyph is only erased when the shape covers both pixels of its cell.
    fn shade_area(&mut self, area: Rect, shade: impl Fn(Point) -> Option<Color>) {
        let Some(area) = area.intersection(&self.clip()) else {
            return;
        };
        let columns = self.columns(area.x, area.right());
        for half_row in self.half_rows(area.y, area.bottom()) {
            for column in columns.clone() {
                let Some(color) = shade(self.sample_point(column, half_row)) else {
                    continue;
                };
                let sibling = self.sample_point(column, half_row ^ 1);
                let covers_cell = area.contains_point(&sibling) && shade(sibling).is_some();
                self.set(column, half_row, color, covers_cell);
            }
        }
    }
}

/// Indices whose sample centers fall in `[start, end)` on a grid of `step`,
/// limited to `0..limit`. A non-empty interval that misses every center still
/// gets the sample it starts in.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn span(start: f32, end: f32, step: f32, limit: u32) -> Range<u32> {
    if end <= start || step <= 0.0 {
        return 0..0;
    }
    let to_index = |v: f32| v.max(0.0).min(limit as f32) as u32;
    let first = to_index((start / step - 0.5).ceil());
    let last = to_index((end / step - 0.5).ceil());
    if first < last {
        return first..last;
    }
    let cover = (start / step).floor();
    if cover < 0.0 || cover >= limit as f32 {
        return 0..0;
    }
    let cover = cover as u32;
    cover..cover + 1
}

impl Canvas for CellCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.shade_area(rect, |_| Some(color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.shade_area(rect, |p| {
            rounded_rect_contains(&rect, radius, &p).then_some(color)
        });
    }

    fn fill_gradient(&mut self, rect: Rect, radius: f32, gradient: &LinearGradient) {
        self.shade_area(rect, |p| {
            rounded_rect_contains(&rect, radius, &p).then(|| gradient.color_at(p))
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _width: f32) {
        let columns = self.columns(rect.x, rect.right());
        let half_rows = self.half_rows(rect.y, rect.bottom());
        if columns.is_empty() || half_rows.is_empty() {
            return;
        }
        let clip = self.clip();
        let (left, right) = (columns.start, columns.end - 1);
        let (top, bottom) = (half_rows.start, half_rows.end - 1);
        for half_row in half_rows {
            for column in columns.clone() {
                let edge =
                    column == left || column == right || half_row == top || half_row == bottom;
                if edge && clip.contains_point(&self.sample_point(column, half_row)) {
                    self.set(column, half_row, color, false);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        self.shade_area(bounds, |p| (p.distance(&center) <= radius).then_some(color));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        if style.color.a == 0.0 || self.cell.width <= 0.0 || self.cell.height <= 0.0 {
            return;
        }
        let middle = position.y + style.line_height() / 2.0;
        let row = (middle / self.cell.height).floor();
        if row < 0.0 || row >= f32::from(self.buffer.height()) {
            return;
        }
        let row = row as u16;
        let clip = self.clip();
        let center_y = (f32::from(row) + 0.5) * self.cell.height;

        let mut column = (position.x / self.cell.width).round() as i32;
        for grapheme in text.graphemes(true) {
            let width = UnicodeWidthStr::width(grapheme);
            if width == 0 {
                continue;
            }
            let center_x = (column as f32 + 0.5) * self.cell.width;
            if let Ok(x) = u16::try_from(column) {
                if clip.contains_point(&Point::new(center_x, center_y)) {
                    self.buffer.set_glyph(x, row, grapheme, style.color);
                }
            }
            column += i32::try_from(width).unwrap_or(1);
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = rect
            .intersection(&self.clip())
            .unwrap_or_else(|| Rect::new(rect.x, rect.y, 0.0, 0.0));
        self.clip_stack.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}
