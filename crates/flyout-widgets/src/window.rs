//! Top-level window hosting a single content widget.

use crate::palette;
use flyout_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;
use tracing::trace;

/// A titled window with a solid background.
///
/// The content is placed at `content_origin`. With a fixed content size it
/// keeps that size; otherwise it fills the rest of the window.
#[derive(Debug)]
pub struct Window<W: Widget> {
    title: String,
    size: Size,
    resizable: bool,
    background: Color,
    content: W,
    content_origin: Point,
    content_size: Option<Size>,
    bounds: Rect,
}

impl<W: Widget + 'static> Window<W> {
    /// Create a resizable window of `width` × `height` around `content`.
    #[must_use]
    pub fn new(title: impl Into<String>, width: f32, height: f32, content: W) -> Self {
        Self {
            title: title.into(),
            size: Size::new(width, height),
            resizable: true,
            background: palette::WINDOW,
            content,
            content_origin: Point::ORIGIN,
            content_size: None,
            bounds: Rect::default(),
        }
    }

    /// Keep the window at its initial size.
    #[must_use]
    pub const fn fixed(mut self) -> Self {
        self.resizable = false;
        self
    }

    /// Place the content at `(x, y)` with its measured size.
    #[must_use]
    pub fn place_content(mut self, x: f32, y: f32) -> Self {
        self.content_origin = Point::new(x, y);
        self.content_size = Some(self.content.measure(Constraints::unbounded()));
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Logical window size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Whether the window follows resize events.
    #[must_use]
    pub const fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// The hosted widget.
    #[must_use]
    pub const fn content(&self) -> &W {
        &self.content
    }

    /// The hosted widget, mutably.
    pub fn content_mut(&mut self) -> &mut W {
        &mut self.content
    }

    /// Run measure and layout for the whole window at its own size.
    pub fn layout_window(&mut self) {
        let size = self.measure(Constraints::tight(self.size));
        self.layout(Rect::from_size(size));
    }

    fn content_rect(&self) -> Rect {
        let origin = self.bounds.origin() + self.content_origin;
        let size = self.content_size.unwrap_or_else(|| {
            Size::new(
                (self.bounds.width - self.content_origin.x).max(0.0),
                (self.bounds.height - self.content_origin.y).max(0.0),
            )
        });
        Rect::from_origin_size(origin, size)
    }
}

impl<W: Widget + 'static> Widget for Window<W> {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let rect = self.content_rect();
        let size = self.content.measure(Constraints::tight(rect.size()));
        self.content.layout(Rect::from_origin_size(rect.origin(), size));
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.background);
        canvas.push_clip(self.bounds);
        self.content.paint(canvas);
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::Resize { width, height } = event {
            if self.resizable {
                trace!(width, height, "window resized");
                self.size = Size::new(*width, *height);
            }
            return None;
        }
        self.content.event(event)
    }

    fn tick(&mut self, dt: f64) -> bool {
        self.content.tick(dt)
    }

    fn is_interactive(&self) -> bool {
        self.content.is_interactive()
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Window
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
