//! Animated two-state toggle switch.

use crate::palette;
use flyout_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, Easing, Event, LinearGradient, MouseButton, Observers, Point, Rect,
    Size, SubscriptionId, Tween, TypeId, Widget,
};
use std::any::Any;
use tracing::debug;

/// Default control size.
pub const TOGGLE_SIZE: Size = Size::new(60.0, 30.0);

/// Default transition length in seconds.
pub const TRANSITION_SECS: f64 = 0.3;

/// Knob diameter as a fraction of the control height.
const KNOB_RATIO: f32 = 0.8;

/// Lightening factor for the left end of the track gradient.
const TRACK_HIGHLIGHT: u32 = 120;

/// Message emitted when the switch flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleChanged {
    /// State after the flip
    pub checked: bool,
}

/// Toggle switch with a sliding knob and a color-fading track.
///
/// `offset` runs from 0.0 (knob left, off) to 1.0 (knob right, on). Both the
/// offset and the track color are tweened when the state flips, starting
/// from wherever they currently are.
#[derive(Debug)]
pub struct ToggleSwitch {
    checked: bool,
    offset: Tween<f64>,
    background: Tween<Color>,
    off_color: Color,
    on_color: Color,
    size: Size,
    /// Last values handed to observers
    shown_offset: f64,
    shown_background: Color,
    toggled: Observers<bool>,
    offset_changed: Observers<f64>,
    background_changed: Observers<Color>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Default for ToggleSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleSwitch {
    /// Create a switch in the off state.
    #[must_use]
    pub fn new() -> Self {
        let off_color = palette::TOGGLE_OFF;
        Self {
            checked: false,
            offset: Tween::settled(0.0, TRANSITION_SECS),
            background: Tween::settled(off_color, TRANSITION_SECS),
            off_color,
            on_color: palette::TOGGLE_ON,
            size: TOGGLE_SIZE,
            shown_offset: 0.0,
            shown_background: off_color,
            toggled: Observers::new(),
            offset_changed: Observers::new(),
            background_changed: Observers::new(),
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set the track colors for the off and on states.
    #[must_use]
    pub fn colors(mut self, off: Color, on: Color) -> Self {
        self.off_color = off;
        self.on_color = on;
        let current = self.target_color();
        self.background = Tween::settled(current, self.background.duration);
        self.shown_background = current;
        self
    }

    /// Set the transition length in seconds.
    #[must_use]
    pub fn duration(mut self, secs: f64) -> Self {
        let secs = secs.max(0.0);
        self.offset.duration = secs;
        self.offset.elapsed = secs;
        self.background.duration = secs;
        self.background.elapsed = secs;
        self
    }

    /// Set the easing curve for both tweens.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.offset.easing = easing;
        self.background.easing = easing;
        self
    }

    /// Set a fixed size.
    #[must_use]
    pub fn fixed_size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Whether the switch is on.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Knob position in [0.0, 1.0].
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.shown_offset
    }

    /// Current track color.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.shown_background
    }

    /// Whether a transition is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.offset.is_complete() || !self.background.is_complete()
    }

    /// Fixed size of the control.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Call `f` with the new state whenever the switch flips.
    pub fn on_toggled<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&bool) + Send + Sync + 'static,
    {
        self.toggled.subscribe(f)
    }

    /// Call `f` whenever the knob offset changes.
    pub fn on_offset_changed<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&f64) + Send + Sync + 'static,
    {
        self.offset_changed.subscribe(f)
    }

    /// Call `f` whenever the track color changes.
    pub fn on_background_changed<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&Color) + Send + Sync + 'static,
    {
        self.background_changed.subscribe(f)
    }

    /// Drop a subscription made through any of the `on_*` methods.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.toggled.unsubscribe(id)
            || self.offset_changed.unsubscribe(id)
            || self.background_changed.unsubscribe(id)
    }

    /// Flip the state and start both transitions.
    pub fn toggle(&mut self) -> ToggleChanged {
        self.set_checked(!self.checked);
        ToggleChanged {
            checked: self.checked,
        }
    }

    /// Move to `checked`, animating from the current values.
    ///
    /// Does nothing when already in that state.
    pub fn set_checked(&mut self, checked: bool) {
        if checked == self.checked {
            return;
        }
        self.checked = checked;
        self.offset.retarget(if checked { 1.0 } else { 0.0 });
        self.background.retarget(self.target_color());
        debug!(checked, from_offset = self.shown_offset, "toggle transition started");
        self.toggled.notify(&checked);
    }

    const fn target_color(&self) -> Color {
        if self.checked {
            self.on_color
        } else {
            self.off_color
        }
    }

    fn publish(&mut self) {
        let offset = self.offset.value().clamp(0.0, 1.0);
        if offset != self.shown_offset {
            self.shown_offset = offset;
            self.offset_changed.notify(&offset);
        }
        let background = self.background.value();
        if background != self.shown_background {
            self.shown_background = background;
            self.background_changed.notify(&background);
        }
    }

    /// Track rectangle: the middle half of the control's height.
    #[must_use]
    pub fn track_rect(&self) -> Rect {
        let b = self.bounds;
        Rect::new(b.x, b.y + b.height / 4.0, b.width, b.height / 2.0)
    }

    /// Knob bounding square.
    #[must_use]
    pub fn knob_rect(&self) -> Rect {
        let b = self.bounds;
        let diameter = b.height * KNOB_RATIO;
        let x = (self.shown_offset as f32).mul_add(b.width - diameter, b.x);
        let y = b.y + (b.height - diameter) / 2.0;
        Rect::new(x, y, diameter, diameter)
    }
}

impl Widget for ToggleSwitch {
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
        let track = self.track_rect();
        let radius = self.bounds.height / 4.0;
        let gradient = LinearGradient::new(
            self.bounds.origin(),
            Point::new(self.bounds.right(), self.bounds.y),
        )
        .with_stop(0.0, self.shown_background.lighter(TRACK_HIGHLIGHT))
        .with_stop(1.0, self.shown_background);
        canvas.fill_gradient(track, radius, &gradient);

        let knob = self.knob_rect();
        canvas.fill_circle(knob.center(), knob.width / 2.0, Color::WHITE);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } if self.bounds.contains_point(position) => Some(Box::new(self.toggle())),
            _ => None,
        }
    }

    fn tick(&mut self, dt: f64) -> bool {
        let offset_running = self.offset.advance(dt);
        let background_running = self.background.advance(dt);
        self.publish();
        offset_running || background_running
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(if self.checked { "ON" } else { "OFF" })
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Switch
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyout_core::{DrawCommand, RecordingCanvas};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    const FRAME: f64 = 1.0 / 60.0;

    fn switch() -> ToggleSwitch {
        let mut t = ToggleSwitch::new();
        t.layout(Rect::new(70.0, 35.0, 60.0, 30.0));
        t
    }

    fn click(t: &mut ToggleSwitch, x: f32, y: f32, button: MouseButton) -> Option<ToggleChanged> {
        t.event(&Event::MouseDown {
            position: Point::new(x, y),
            button,
        })
        .and_then(|m| m.downcast_ref::<ToggleChanged>().copied())
    }

    fn settle(t: &mut ToggleSwitch) -> usize {
        let mut frames = 0;
        while t.tick(FRAME) {
            frames += 1;
            assert!(frames < 1000);
        }
        frames
    }

    #[test]
    fn test_initial_state() {
        let t = switch();
        assert!(!t.is_checked());
        assert_eq!(t.offset(), 0.0);
        assert_eq!(t.background(), palette::TOGGLE_OFF);
        assert!(!t.is_animating());
        assert_eq!(t.measure(Constraints::unbounded()), TOGGLE_SIZE);
    }

    #[test]
    fn test_click_on_then_off() {
        let mut t = switch();
        let msg = click(&mut t, 100.0, 50.0, MouseButton::Left).expect("toggled");
        assert!(msg.checked);
        assert!(t.is_checked());
        assert!(t.is_animating());
        settle(&mut t);
        assert_eq!(t.offset(), 1.0);
        assert_eq!(t.background(), palette::TOGGLE_ON);

        let msg = click(&mut t, 100.0, 50.0, MouseButton::Left).expect("toggled");
        assert!(!msg.checked);
        settle(&mut t);
        assert_eq!(t.offset(), 0.0);
        assert_eq!(t.background(), palette::TOGGLE_OFF);
    }

    #[test]
    fn test_ignored_inputs() {
        let mut t = switch();
        assert!(click(&mut t, 100.0, 50.0, MouseButton::Right).is_none());
        assert!(click(&mut t, 10.0, 10.0, MouseButton::Left).is_none());
        assert!(t
            .event(&Event::MouseUp {
                position: Point::new(100.0, 50.0),
                button: MouseButton::Left,
            })
            .is_none());
        assert!(!t.is_checked());
        assert!(!t.tick(FRAME));
    }

    #[test]
    fn test_transition_takes_300ms() {
        let mut t = switch();
        t.toggle();
        t.tick(0.15);
        assert!((t.offset() - 0.5).abs() < 1e-9);
        assert!(t.tick(0.1));
        assert!(!t.tick(0.05 + 1e-9));
    }

    #[test]
    fn test_restart_mid_flight_reverses_from_current() {
        let mut t = switch();
        t.toggle();
        t.tick(0.1);
        let mid = t.offset();
        assert!(mid > 0.0 && mid < 1.0);
        t.toggle();
        t.tick(0.0);
        assert!((t.offset() - mid).abs() < 1e-9);
        settle(&mut t);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn test_observers_fire_on_change_only() {
        let mut t = switch();
        let toggles = Arc::new(Mutex::new(Vec::new()));
        let offsets = Arc::new(Mutex::new(Vec::new()));
        let colors = Arc::new(Mutex::new(0usize));
        {
            let toggles = Arc::clone(&toggles);
            t.on_toggled(move |c| toggles.lock().unwrap().push(*c));
            let offsets = Arc::clone(&offsets);
            t.on_offset_changed(move |o| offsets.lock().unwrap().push(*o));
            let colors = Arc::clone(&colors);
            t.on_background_changed(move |_| *colors.lock().unwrap() += 1);
        }

        t.toggle();
        settle(&mut t);
        // Ticking at rest publishes nothing more
        let seen = offsets.lock().unwrap().len();
        t.tick(FRAME);
        assert_eq!(offsets.lock().unwrap().len(), seen);

        assert_eq!(*toggles.lock().unwrap(), vec![true]);
        let offsets = offsets.lock().unwrap();
        assert!(!offsets.is_empty());
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(offsets.last().copied(), Some(1.0));
        assert!(*colors.lock().unwrap() > 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut t = switch();
        let hits = Arc::new(Mutex::new(0));
        let h = Arc::clone(&hits);
        let id = t.on_toggled(move |_| *h.lock().unwrap() += 1);
        assert!(t.unsubscribe(id));
        t.toggle();
        assert_eq!(*hits.lock().unwrap(), 0);
        assert!(!t.unsubscribe(id));
    }

    #[test]
    fn test_unsubscribe_offset_keeps_toggled_observer() {
        let mut t = switch();
        let toggles = Arc::new(Mutex::new(0));
        let offsets = Arc::new(Mutex::new(0));
        let tg = Arc::clone(&toggles);
        t.on_toggled(move |_| *tg.lock().unwrap() += 1);
        let off = Arc::clone(&offsets);
        let id = t.on_offset_changed(move |_| *off.lock().unwrap() += 1);

        assert!(t.unsubscribe(id));
        t.toggle();
        settle(&mut t);

        assert_eq!(*toggles.lock().unwrap(), 1);
        assert_eq!(*offsets.lock().unwrap(), 0);
    }

    #[test]
    fn test_set_checked_same_state_is_noop() {
        let mut t = switch();
        t.set_checked(false);
        assert!(!t.is_animating());
        t.set_checked(true);
        assert!(t.is_checked());
    }

    #[test]
    fn test_paint_geometry_off() {
        let t = switch();
        let mut canvas = RecordingCanvas::new();
        t.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 2);

        match &canvas.commands()[0] {
            DrawCommand::Rect {
                bounds,
                radius,
                style,
            } => {
                assert_eq!(*bounds, Rect::new(70.0, 42.5, 60.0, 15.0));
                assert_eq!(radius.max(), 7.5);
                let g = style.gradient.as_ref().expect("gradient");
                assert_eq!(g.stops[0].color.to_hex(), "#f5f5f5");
                assert_eq!(g.stops[1].color, palette::TOGGLE_OFF);
                assert_eq!(g.start, Point::new(70.0, 35.0));
                assert_eq!(g.end, Point::new(130.0, 35.0));
            }
            other => panic!("Expected track, got {other:?}"),
        }
        match &canvas.commands()[1] {
            DrawCommand::Circle {
                center,
                radius,
                style,
            } => {
                assert_eq!(*radius, 12.0);
                assert_eq!(*center, Point::new(82.0, 50.0));
                assert_eq!(style.fill, Some(Color::WHITE));
            }
            other => panic!("Expected knob, got {other:?}"),
        }
    }

    #[test]
    fn test_knob_at_right_when_on() {
        let mut t = switch();
        t.toggle();
        settle(&mut t);
        let knob = t.knob_rect();
        assert_eq!(knob.x, 70.0 + 36.0);
        assert_eq!(knob.right(), 130.0);
    }

    #[test]
    fn test_custom_colors_and_duration() {
        let mut t = ToggleSwitch::new()
            .colors(Color::BLACK, Color::WHITE)
            .duration(0.0)
            .easing(Easing::Linear)
            .with_test_id("switch");
        t.layout(Rect::from_size(TOGGLE_SIZE));
        assert_eq!(t.background(), Color::BLACK);
        t.toggle();
        t.tick(0.0);
        assert_eq!(t.background(), Color::WHITE);
        assert_eq!(t.offset(), 1.0);
        assert_eq!(Widget::test_id(&t), Some("switch"));
        assert_eq!(t.accessible_name(), Some("ON"));
    }

    proptest! {
        #[test]
        fn prop_offset_stays_in_unit_range(
            script in proptest::collection::vec((any::<bool>(), 0.0f64..0.2), 1..40)
        ) {
            let mut t = switch();
            for (flip, dt) in script {
                if flip {
                    t.toggle();
                }
                t.tick(dt);
                prop_assert!((0.0..=1.0).contains(&t.offset()));
                let knob = t.knob_rect();
                prop_assert!(knob.x >= 70.0 - 1e-3 && knob.right() <= 130.0 + 1e-3);
            }
        }
    }
}
