//! Push button with a fixed size and hover feedback.

use crate::palette;
use flyout_core::{
    widget::{AccessibleRole, LayoutResult, TextAlign, TextStyle},
    Canvas, Color, Constraints, Event, MouseButton, Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Message emitted when a button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonClicked;

/// Button widget with label and click handling.
///
/// Hover state is driven by [`Event::MouseEnter`] / [`Event::MouseLeave`],
/// which the owning container sends when it tracks the pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    /// Button label
    label: String,
    /// Fixed size
    size: Size,
    /// Background color (normal state)
    background: Color,
    /// Background color (hover state)
    background_hover: Color,
    /// Background color (pressed state)
    background_pressed: Color,
    /// Border color; `None` draws no border
    border: Option<Color>,
    /// Border color while hovered
    border_hover: Option<Color>,
    /// Text color
    text_color: Color,
    /// Horizontal label alignment
    text_align: TextAlign,
    /// Horizontal padding used by left-aligned labels
    padding: f32,
    /// Font size
    font_size: f32,
    /// Test ID
    test_id_value: Option<String>,
    #[serde(skip)]
    hovered: bool,
    #[serde(skip)]
    pressed: bool,
    #[serde(skip)]
    bounds: Rect,
}

impl Button {
    /// Create a new button with the platform push-button look.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            size: Size::new(60.0, 30.0),
            background: palette::BUTTON,
            background_hover: palette::BUTTON_HOVER,
            background_pressed: palette::BUTTON_PRESSED,
            border: Some(palette::BUTTON_BORDER),
            border_hover: Some(palette::BUTTON_BORDER_HOVER),
            text_color: palette::TEXT,
            text_align: TextAlign::Center,
            padding: 0.0,
            font_size: 12.0,
            test_id_value: None,
            hovered: false,
            pressed: false,
            bounds: Rect::default(),
        }
    }

    /// Create a borderless button filled with a single color.
    ///
    /// Hover and press darken the fill slightly.
    #[must_use]
    pub fn flat(label: impl Into<String>, color: Color) -> Self {
        Self::new(label).borderless().background(color)
    }

    /// Set a fixed size.
    #[must_use]
    pub fn fixed_size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set background color; hover and pressed shades derive from it.
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self.background_hover = color.lighter(90);
        self.background_pressed = color.lighter(80);
        self
    }

    /// Remove the border in every state.
    #[must_use]
    pub const fn borderless(mut self) -> Self {
        self.border = None;
        self.border_hover = None;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set label alignment.
    #[must_use]
    pub const fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Set horizontal padding for left-aligned labels.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set font size.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size.max(1.0);
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the fixed size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Get the normal background color.
    #[must_use]
    pub const fn background_color(&self) -> Color {
        self.background
    }

    /// Get label alignment.
    #[must_use]
    pub const fn get_text_align(&self) -> TextAlign {
        self.text_align
    }

    /// Whether the pointer is over this button.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether a press is in progress.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Check if a point is inside the button.
    #[must_use]
    pub fn hit_test(&self, point: &Point) -> bool {
        self.bounds.contains_point(point)
    }

    /// Background for the current state.
    #[must_use]
    pub const fn current_background(&self) -> Color {
        if self.pressed {
            self.background_pressed
        } else if self.hovered {
            self.background_hover
        } else {
            self.background
        }
    }

    fn current_border(&self) -> Option<Color> {
        if self.hovered || self.pressed {
            self.border_hover
        } else {
            self.border
        }
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            size: self.font_size,
            color: self.text_color,
            ..Default::default()
        }
    }

    fn label_position(&self, style: &TextStyle) -> Point {
        let y = self.bounds.y + (self.bounds.height - style.line_height()) / 2.0;
        let x = match self.text_align {
            TextAlign::Left => self.bounds.x + self.padding,
            TextAlign::Center => {
                self.bounds.x + (self.bounds.width - style.estimate_width(&self.label)) / 2.0
            }
        };
        Point::new(x, y)
    }
}

impl Widget for Button {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.current_background());
        if let Some(border) = self.current_border() {
            canvas.stroke_rect(self.bounds, border, 1.0);
        }

        let style = self.text_style();
        canvas.push_clip(self.bounds);
        canvas.draw_text(&self.label, self.label_position(&style), &style);
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseEnter => {
                self.hovered = true;
                None
            }
            Event::MouseLeave => {
                self.hovered = false;
                self.pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    Some(Box::new(ButtonClicked))
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
        Some(&self.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
