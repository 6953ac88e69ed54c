//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle driven by the host:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: position self and children within allocated bounds
//! 3. **Paint**: emit drawing operations onto a [`Canvas`]
//!
//! Between frames the host feeds input through [`Widget::event`] and advances
//! animations with a single clock through [`Widget::tick`].
//!
//! # Examples
//!
//! ```
//! use flyout_core::{TypeId, TextStyle, FontWeight};
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//!
//! let style = TextStyle::default();
//! assert_eq!(style.size, 14.0);
//! assert_eq!(style.weight, FontWeight::Normal);
//! ```

use crate::constraints::Constraints;
use crate::draw::LinearGradient;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position self and children within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Emit drawing operations.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event, optionally producing a message for the host.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Advance running animations by `dt` seconds.
    ///
    /// Returns `true` while any animation is still in flight.
    fn tick(&mut self, _dt: f64) -> bool {
        false
    }

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// A minimal abstraction over the rendering backend; coordinates are logical
/// pixels in window space.
pub trait Canvas {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle with uniformly rounded corners.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Fill a (possibly rounded) rectangle with a linear gradient.
    fn fill_gradient(&mut self, rect: Rect, radius: f32, gradient: &LinearGradient);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Restrict subsequent drawing to `rect`.
    fn push_clip(&mut self, rect: Rect);

    /// Undo the last [`Canvas::push_clip`].
    fn pop_clip(&mut self);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

impl TextStyle {
    /// Rough advance width of `text` in this style.
    #[must_use]
    pub fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.6
    }

    /// Line height in this style.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Medium (500)
    Medium,
    /// Bold (700)
    Bold,
}

/// Horizontal text alignment inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Centered
    #[default]
    Center,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Window
    Window,
    /// Button
    Button,
    /// Switch (two-state toggle)
    Switch,
    /// Text input
    TextInput,
    /// Menu
    Menu,
    /// Menu item
    MenuItem,
}
