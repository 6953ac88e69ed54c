//! Button bar whose buttons reveal a popup panel on hover.
//!
//! The menu watches raw pointer motion and turns it into enter/leave
//! transitions for its two bar buttons. The popup is the topmost layer: while
//! the pointer is over it no bar button counts as hovered.

use crate::button::Button;
use crate::popup::{BarButton, PanelId, PopupPanel, PopupSlot};
use crate::text_area::TextArea;
use flyout_core::{
    widget::LayoutResult, Canvas, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;
use tracing::debug;

/// Size of each bar button.
pub const BAR_BUTTON_SIZE: Size = Size::new(60.0, 30.0);

/// Fixed height of the text area beneath the bar.
pub const TEXT_AREA_HEIGHT: f32 = 100.0;

/// Placeholder shown by the empty text area.
pub const PLACEHOLDER: &str = "Type here...";

/// Message emitted when hovering a bar button opens its popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOpened {
    /// Bar button that was entered
    pub source: BarButton,
    /// Identifier of the freshly created panel
    pub panel_id: PanelId,
}

/// Two bar buttons over a text area, plus the popup slot.
#[derive(Debug)]
pub struct HoverMenu {
    bar: [Button; 2],
    text_area: TextArea,
    popup: PopupSlot,
    hovered: Option<BarButton>,
    bounds: Rect,
}

impl Default for HoverMenu {
    fn default() -> Self {
        let bar = BarButton::ALL.map(|b| {
            Button::new(b.label())
                .fixed_size(BAR_BUTTON_SIZE.width, BAR_BUTTON_SIZE.height)
                .with_test_id(format!("bar-{}", b.index() + 1))
        });
        Self {
            bar,
            text_area: TextArea::new()
                .placeholder(PLACEHOLDER)
                .fixed_height(TEXT_AREA_HEIGHT),
            popup: PopupSlot::new(),
            hovered: None,
            bounds: Rect::default(),
        }
    }
}

impl HoverMenu {
    /// Create the menu with no popup open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A bar button.
    #[must_use]
    pub const fn button(&self, which: BarButton) -> &Button {
        &self.bar[which.index()]
    }

    /// Bar button currently under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<BarButton> {
        self.hovered
    }

    /// The open popup panel.
    #[must_use]
    pub const fn popup(&self) -> Option<&PopupPanel> {
        self.popup.current()
    }

    /// The text area.
    #[must_use]
    pub const fn text_area(&self) -> &TextArea {
        &self.text_area
    }

    /// Replace any open panel with a new one for `button`.
    pub fn handle_enter(&mut self, button: BarButton) -> PopupOpened {
        let anchor = self.bar[button.index()].bounds();
        let panel_id = self.popup.open(button, anchor);
        PopupOpened {
            source: button,
            panel_id,
        }
    }

    /// Leaving a bar button keeps the panel open.
    pub fn handle_leave(&mut self, button: BarButton) {
        debug!(button = %button, open = self.popup.is_open(), "pointer left bar button");
    }

    /// Bar button under `point`, honouring the popup as the topmost layer.
    #[must_use]
    pub fn bar_button_at(&self, point: &Point) -> Option<BarButton> {
        if self.popup.contains(point) {
            return None;
        }
        BarButton::ALL
            .into_iter()
            .find(|b| self.bar[b.index()].hit_test(point))
    }

    fn set_hovered(&mut self, target: Option<BarButton>) -> Option<Box<dyn Any + Send>> {
        if target == self.hovered {
            return None;
        }
        if let Some(old) = self.hovered.take() {
            self.bar[old.index()].event(&Event::MouseLeave);
            self.handle_leave(old);
        }
        let new = target?;
        self.bar[new.index()].event(&Event::MouseEnter);
        self.hovered = Some(new);
        Some(Box::new(self.handle_enter(new)))
    }
}

impl Widget for HoverMenu {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = BAR_BUTTON_SIZE.width * self.bar.len() as f32;
        constraints.constrain(Size::new(width, BAR_BUTTON_SIZE.height + TEXT_AREA_HEIGHT))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let mut x = bounds.x;
        for button in &mut self.bar {
            let size = button.size();
            button.layout(Rect::new(x, bounds.y, size.width, size.height));
            x += size.width;
        }
        let text_top = bounds.y + BAR_BUTTON_SIZE.height;
        let text_height = self.text_area.height();
        self.text_area
            .layout(Rect::new(bounds.x, text_top, bounds.width, text_height));
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for button in &self.bar {
            button.paint(canvas);
        }
        self.text_area.paint(canvas);
        if let Some(panel) = self.popup.current() {
            panel.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                if let Some(panel) = self.popup.current_mut() {
                    panel.event(event);
                }
                let target = self.bar_button_at(position);
                self.set_hovered(target)
            }
            Event::MouseLeave => {
                if let Some(panel) = self.popup.current_mut() {
                    panel.event(event);
                }
                self.set_hovered(None)
            }
            Event::MouseDown { position, .. } => {
                if self.popup.contains(position) {
                    self.text_area.event(&Event::FocusOut);
                    return self.popup.current_mut().and_then(|p| p.event(event));
                }
                if let Some(b) = self.bar_button_at(position) {
                    self.text_area.event(&Event::FocusOut);
                    return self.bar[b.index()].event(event);
                }
                self.text_area.event(event)
            }
            Event::MouseUp { .. } => {
                let from_popup = self.popup.current_mut().and_then(|p| p.event(event));
                // Every bar button sees the release so stale presses clear.
                let mut from_bar = None;
                for button in &mut self.bar {
                    from_bar = from_bar.or(button.event(event));
                }
                from_popup.or(from_bar)
            }
            _ => self.text_area.event(event),
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonClicked;
    use crate::popup::PopupEntryClicked;
    use flyout_core::{MouseButton, RecordingCanvas};

    fn menu() -> HoverMenu {
        let mut m = HoverMenu::new();
        m.layout(Rect::new(0.0, 0.0, 400.0, 300.0));
        m
    }

    fn move_to(m: &mut HoverMenu, x: f32, y: f32) -> Option<PopupOpened> {
        m.event(&Event::MouseMove {
            position: Point::new(x, y),
        })
        .and_then(|msg| msg.downcast_ref::<PopupOpened>().copied())
    }

    fn press(m: &mut HoverMenu, x: f32, y: f32) -> Option<Box<dyn Any + Send>> {
        let position = Point::new(x, y);
        m.event(&Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        m.event(&Event::MouseUp {
            position,
            button: MouseButton::Left,
        })
    }

    #[test]
    fn test_layout_positions() {
        let m = menu();
        assert_eq!(m.button(BarButton::One).bounds(), Rect::new(0.0, 0.0, 60.0, 30.0));
        assert_eq!(m.button(BarButton::Two).bounds(), Rect::new(60.0, 0.0, 60.0, 30.0));
        assert_eq!(m.text_area().bounds(), Rect::new(0.0, 30.0, 400.0, 100.0));
        assert_eq!(m.text_area().get_placeholder(), PLACEHOLDER);
        assert!(m.popup().is_none());
    }

    #[test]
    fn test_enter_opens_popup_below_button() {
        let mut m = menu();
        let opened = move_to(&mut m, 90.0, 10.0).expect("opened");
        assert_eq!(opened.source, BarButton::Two);
        let panel = m.popup().expect("panel");
        assert_eq!(panel.id(), opened.panel_id);
        assert_eq!(panel.bounds().origin(), Point::new(60.0, 25.0));
        assert_eq!(m.hovered(), Some(BarButton::Two));
        assert!(m.button(BarButton::Two).is_hovered());
    }

    #[test]
    fn test_moving_within_button_does_not_recreate() {
        let mut m = menu();
        let first = move_to(&mut m, 10.0, 10.0).expect("opened");
        assert!(move_to(&mut m, 20.0, 12.0).is_none());
        assert_eq!(m.popup().map(PopupPanel::id), Some(first.panel_id));
    }

    #[test]
    fn test_switching_buttons_keeps_single_popup() {
        let mut m = menu();
        let a = move_to(&mut m, 10.0, 10.0).expect("opened A");
        let b = move_to(&mut m, 70.0, 10.0).expect("opened B");
        assert_ne!(a.panel_id, b.panel_id);
        let panel = m.popup().expect("panel");
        assert_eq!(panel.source(), BarButton::Two);
        assert_eq!(panel.id(), b.panel_id);
        assert!(!m.button(BarButton::One).is_hovered());
    }

    #[test]
    fn test_leave_keeps_popup() {
        let mut m = menu();
        let opened = move_to(&mut m, 10.0, 10.0).expect("opened");
        assert!(move_to(&mut m, 300.0, 200.0).is_none());
        assert_eq!(m.hovered(), None);
        assert_eq!(m.popup().map(PopupPanel::id), Some(opened.panel_id));
    }

    #[test]
    fn test_reenter_creates_new_panel() {
        let mut m = menu();
        let first = move_to(&mut m, 10.0, 10.0).expect("opened");
        move_to(&mut m, 300.0, 10.0);
        let second = move_to(&mut m, 10.0, 10.0).expect("reopened");
        assert_eq!(second.source, BarButton::One);
        assert!(second.panel_id > first.panel_id);
    }

    #[test]
    fn test_popup_is_topmost_for_hover() {
        let mut m = menu();
        move_to(&mut m, 10.0, 10.0).expect("opened");
        // Lower 5px of button 1 are covered by its popup
        assert!(move_to(&mut m, 10.0, 27.0).is_none());
        assert_eq!(m.hovered(), None);
        assert_eq!(m.bar_button_at(&Point::new(10.0, 27.0)), None);
        // Back onto the exposed part of the button is a fresh enter
        assert!(move_to(&mut m, 10.0, 10.0).is_some());
    }

    #[test]
    fn test_window_leave_unhovers() {
        let mut m = menu();
        move_to(&mut m, 10.0, 10.0);
        assert!(m.event(&Event::MouseLeave).is_none());
        assert_eq!(m.hovered(), None);
        assert!(m.popup().is_some());
    }

    #[test]
    fn test_popup_entry_click_reaches_host() {
        let mut m = menu();
        move_to(&mut m, 70.0, 10.0);
        move_to(&mut m, 80.0, 100.0);
        let msg = press(&mut m, 80.0, 100.0).expect("clicked");
        let clicked = msg.downcast_ref::<PopupEntryClicked>().expect("entry");
        assert_eq!(clicked.label, "Copy");
        assert_eq!(clicked.index, 1);
        // Clicking an entry leaves the panel open
        assert!(m.popup().is_some());
        assert!(!m.text_area().is_focused());
    }

    #[test]
    fn test_bar_button_click() {
        let mut m = menu();
        let msg = press(&mut m, 10.0, 10.0).expect("clicked");
        assert!(msg.downcast_ref::<ButtonClicked>().is_some());
    }

    #[test]
    fn test_text_area_receives_focus_and_text() {
        let mut m = menu();
        press(&mut m, 300.0, 80.0);
        assert!(m.text_area().is_focused());
        m.event(&Event::TextInput { text: "hi".into() });
        assert_eq!(m.text_area().text(), "hi");
    }

    #[test]
    fn test_paint_order_popup_last() {
        let mut m = menu();
        move_to(&mut m, 10.0, 10.0);
        let mut canvas = RecordingCanvas::new();
        m.paint(&mut canvas);
        let texts: Vec<&str> = canvas.texts().collect();
        assert_eq!(
            texts,
            vec!["Button 1", "Button 2", PLACEHOLDER, "Save", "Save", "Save"]
        );
    }
}
