//! Multi-line plain text editor with a placeholder.

use crate::palette;
use flyout_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Key, MouseButton, Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when the text changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChanged {
    /// The new text
    pub value: String,
}

/// Multi-line text area with a fixed height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextArea {
    value: String,
    placeholder: String,
    /// Byte offset of the caret, always on a char boundary
    cursor: usize,
    height: f32,
    padding: f32,
    text_style: TextStyle,
    placeholder_color: Color,
    background: Color,
    border: Color,
    focus_border: Color,
    #[serde(skip)]
    focused: bool,
    #[serde(skip)]
    bounds: Rect,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: String::new(),
            cursor: 0,
            height: 100.0,
            padding: 4.0,
            text_style: TextStyle {
                size: 12.0,
                color: palette::TEXT,
                ..Default::default()
            },
            placeholder_color: palette::PLACEHOLDER,
            background: palette::FIELD,
            border: palette::BUTTON_BORDER,
            focus_border: palette::BUTTON_BORDER_HOVER,
            focused: false,
            bounds: Rect::default(),
        }
    }
}

impl TextArea {
    /// Create an empty text area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text, shown while empty.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the fixed height.
    #[must_use]
    pub fn fixed_height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Set initial text; the caret moves to the end.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.value = text.into();
        self.cursor = self.value.len();
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Placeholder text.
    #[must_use]
    pub fn get_placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Caret position as a byte offset.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text area has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Fixed height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn line_start(&self) -> usize {
        self.value[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.value[self.cursor..]
            .find('\n')
            .map_or(self.value.len(), |i| self.cursor + i)
    }

    fn insert(&mut self, text: &str) {
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Apply an editing key; returns whether the text changed.
    fn apply_key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => {
                self.insert("\n");
                true
            }
            Key::Backspace if self.cursor > 0 => {
                let start = self.prev_boundary();
                self.value.replace_range(start..self.cursor, "");
                self.cursor = start;
                true
            }
            Key::Delete if self.cursor < self.value.len() => {
                let end = self.next_boundary();
                self.value.replace_range(self.cursor..end, "");
                true
            }
            Key::Left => {
                self.cursor = self.prev_boundary();
                false
            }
            Key::Right => {
                self.cursor = self.next_boundary();
                false
            }
            Key::Home => {
                self.cursor = self.line_start();
                false
            }
            Key::End => {
                self.cursor = self.line_end();
                false
            }
            _ => false,
        }
    }

    fn changed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(TextChanged {
            value: self.value.clone(),
        }))
    }

    fn caret_rect(&self) -> Rect {
        let before = &self.value[..self.cursor];
        let row = before.matches('\n').count() as f32;
        let col_text = &before[self.line_start()..];
        let line_height = self.text_style.line_height();
        Rect::new(
            self.bounds.x + self.padding + self.text_style.estimate_width(col_text),
            row.mul_add(line_height, self.bounds.y + self.padding),
            1.0,
            line_height,
        )
    }
}

impl Widget for TextArea {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            200.0
        };
        constraints.constrain(Size::new(width, self.height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.background);
        let border = if self.focused {
            self.focus_border
        } else {
            self.border
        };
        canvas.stroke_rect(self.bounds, border, 1.0);

        canvas.push_clip(self.bounds.inset(1.0));
        let origin = Point::new(self.bounds.x + self.padding, self.bounds.y + self.padding);
        if self.value.is_empty() {
            let style = TextStyle {
                color: self.placeholder_color,
                ..self.text_style.clone()
            };
            canvas.draw_text(&self.placeholder, origin, &style);
        } else {
            let line_height = self.text_style.line_height();
            for (row, line) in self.value.split('\n').enumerate() {
                if line.is_empty() {
                    continue;
                }
                let y = (row as f32).mul_add(line_height, origin.y);
                canvas.draw_text(line, Point::new(origin.x, y), &self.text_style);
            }
        }
        if self.focused {
            canvas.fill_rect(self.caret_rect(), self.text_style.color);
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                let was_focused = self.focused;
                self.focused = self.bounds.contains_point(position);
                if self.focused && !was_focused {
                    self.cursor = self.value.len();
                }
                None
            }
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                None
            }
            Event::TextInput { text } if self.focused && !text.is_empty() => {
                self.insert(text);
                self.changed()
            }
            Event::KeyDown { key } if self.focused => {
                if self.apply_key(*key) {
                    self.changed()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        if self.placeholder.is_empty() {
            None
        } else {
            Some(&self.placeholder)
        }
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::TextInput
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
