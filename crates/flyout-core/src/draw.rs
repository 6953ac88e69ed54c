//! Draw commands and fill styles.
//!
//! All rendering reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// A color stop along a gradient axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the axis in [0.0, 1.0]
    pub offset: f32,
    /// Color at this position
    pub color: Color,
}

/// Linear gradient between two points in window space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Axis start (offset 0.0)
    pub start: Point,
    /// Axis end (offset 1.0)
    pub end: Point,
    /// Color stops sorted by offset
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Create a gradient with no stops.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Two-stop gradient running left to right across `rect`.
    #[must_use]
    pub fn horizontal(rect: Rect, from: Color, to: Color) -> Self {
        Self::new(rect.origin(), Point::new(rect.right(), rect.y))
            .with_stop(0.0, from)
            .with_stop(1.0, to)
    }

    /// Add a stop, keeping stops ordered by offset.
    #[must_use]
    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let idx = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(idx, GradientStop { offset, color });
        self
    }

    /// Color at normalized position `t` along the axis.
    #[must_use]
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        let t = t.clamp(0.0, 1.0);
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return a.color.lerp(&b.color, local);
            }
        }
        self.stops.last().map_or(first.color, |s| s.color)
    }

    /// Color at `point`, projected onto the gradient axis.
    #[must_use]
    pub fn color_at(&self, point: Point) -> Color {
        let axis = self.end - self.start;
        let len_sq = axis.x.mul_add(axis.x, axis.y * axis.y);
        if len_sq == 0.0 {
            return self.sample(0.0);
        }
        let rel = point - self.start;
        let t = rel.x.mul_add(axis.x, rel.y * axis.y) / len_sq;
        self.sample(t)
    }
}

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Solid fill color (None = no solid fill)
    pub fill: Option<Color>,
    /// Gradient fill, painted instead of `fill` when present
    pub gradient: Option<LinearGradient>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Solid fill only.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            gradient: None,
            stroke: None,
        }
    }

    /// Gradient fill only.
    #[must_use]
    pub const fn gradient(gradient: LinearGradient) -> Self {
        Self {
            fill: None,
            gradient: Some(gradient),
            stroke: None,
        }
    }

    /// Stroke only.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            gradient: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Top-left position
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a rounded rectangle.
    #[must_use]
    pub const fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub const fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }
}
