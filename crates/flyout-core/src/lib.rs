//! Core types and traits for the Flyout widget toolkit.
//!
//! This crate provides foundational types used throughout Flyout:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with HSV lightening
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`MouseButton`]
//! - The [`Widget`] and [`Canvas`] traits, plus [`RecordingCanvas`]
//! - Animation: [`Easing`], [`Tween`], [`Interpolate`]
//! - Notifications: [`Observers`]

mod animation;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod observer;
pub mod widget;

pub use animation::{Easing, Interpolate, Tween};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, GradientStop, LinearGradient, StrokeStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{rounded_rect_contains, CornerRadius, Point, Rect, Size};
pub use observer::{Observers, SubscriptionId};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextAlign, TextStyle, TypeId, Widget,
};
