//! Floating popup panels anchored beneath a bar button.
//!
//! A [`PopupSlot`] owns at most one [`PopupPanel`]. Opening a panel disposes
//! the previous one; panels are never reused, and each carries a fresh
//! [`PanelId`].

use crate::button::{Button, ButtonClicked};
use crate::palette;
use flyout_core::{
    widget::{AccessibleRole, LayoutResult, TextAlign},
    Canvas, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tracing::{debug, info};

/// Vertical gap between entries.
pub const ENTRY_SPACING: f32 = 10.0;

/// How far the panel overlaps the bottom edge of its anchor button.
pub const ANCHOR_OVERLAP: f32 = 5.0;

/// The top-level buttons that own a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarButton {
    /// "Button 1"
    One,
    /// "Button 2"
    Two,
}

impl BarButton {
    /// Both bar buttons in layout order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "Button 1",
            Self::Two => "Button 2",
        }
    }

    /// Position in the bar, starting at 0.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Entries shown in this button's popup, top to bottom.
    #[must_use]
    pub fn entries(self) -> [PopupEntry; 3] {
        match self {
            Self::One => [
                PopupEntry::new("Save", 120.0, 30.0, palette::LIGHT_BLUE).align(TextAlign::Left),
                PopupEntry::new("Save", 120.0, 30.0, palette::LIGHT_GREEN).align(TextAlign::Left),
                PopupEntry::new("Save", 120.0, 30.0, palette::LIGHT_BLUE).align(TextAlign::Left),
            ],
            Self::Two => [
                PopupEntry::new("Cut", 120.0, 50.0, palette::PINK),
                PopupEntry::new("Copy", 120.0, 50.0, palette::YELLOW),
                PopupEntry::new("Paste", 120.0, 50.0, palette::ORANGE),
            ],
        }
    }
}

impl fmt::Display for BarButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of one popup entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupEntry {
    /// Caption
    pub label: String,
    /// Fixed size
    pub size: Size,
    /// Fill color
    pub background: Color,
    /// Caption alignment
    pub align: TextAlign,
}

impl PopupEntry {
    /// Centered entry of the given size and color.
    #[must_use]
    pub fn new(label: impl Into<String>, width: f32, height: f32, background: Color) -> Self {
        Self {
            label: label.into(),
            size: Size::new(width, height),
            background,
            align: TextAlign::Center,
        }
    }

    /// Set caption alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn build(&self) -> Button {
        Button::flat(self.label.clone(), self.background)
            .fixed_size(self.size.width, self.size.height)
            .text_align(self.align)
    }
}

/// Identifier of a popup panel, unique for the lifetime of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Message emitted when a popup entry is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupEntryClicked {
    /// Bar button that opened the panel
    pub source: BarButton,
    /// Entry index, top to bottom
    pub index: usize,
    /// Entry caption
    pub label: String,
}

/// A borderless vertical stack of flat buttons.
#[derive(Debug, Clone)]
pub struct PopupPanel {
    id: PanelId,
    source: BarButton,
    entries: Vec<Button>,
    hovered: Option<usize>,
    bounds: Rect,
}

impl PopupPanel {
    /// Build the panel for `source` with its top-left corner at `origin`.
    ///
    /// The panel sizes itself to its content and lays out its entries.
    #[must_use]
    pub fn new(id: PanelId, source: BarButton, origin: Point) -> Self {
        let entries = source.entries().iter().map(PopupEntry::build).collect();
        let mut panel = Self {
            id,
            source,
            entries,
            hovered: None,
            bounds: Rect::default(),
        };
        let size = panel.content_size();
        panel.layout(Rect::from_origin_size(origin, size));
        panel
    }

    /// Panel identifier.
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// Bar button this panel belongs to.
    #[must_use]
    pub const fn source(&self) -> BarButton {
        self.source
    }

    /// Entry buttons, top to bottom.
    #[must_use]
    pub fn entries(&self) -> &[Button] {
        &self.entries
    }

    /// Entry captions, top to bottom.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(Button::label).collect()
    }

    /// Index of the entry under the pointer.
    #[must_use]
    pub const fn hovered_entry(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether `point` is over the panel.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.bounds.contains_point(point)
    }

    /// Size that exactly fits the entries and the gaps between them.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let width = self
            .entries
            .iter()
            .map(|e| e.size().width)
            .fold(0.0, f32::max);
        let gaps = self.entries.len().saturating_sub(1) as f32 * ENTRY_SPACING;
        let height = self.entries.iter().map(|e| e.size().height).sum::<f32>() + gaps;
        Size::new(width, height)
    }

    fn entry_at(&self, point: &Point) -> Option<usize> {
        self.entries.iter().position(|e| e.hit_test(point))
    }

    fn set_hovered(&mut self, next: Option<usize>) {
        if next == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.and_then(|i| self.entries.get_mut(i)) {
            old.event(&Event::MouseLeave);
        }
        if let Some(new) = next.and_then(|i| self.entries.get_mut(i)) {
            new.event(&Event::MouseEnter);
        }
        self.hovered = next;
    }

    fn click_message(&self, index: usize) -> PopupEntryClicked {
        let label = self
            .entries
            .get(index)
            .map(|e| e.label().to_string())
            .unwrap_or_default();
        PopupEntryClicked {
            source: self.source,
            index,
            label,
        }
    }
}

impl Widget for PopupPanel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.content_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let mut y = bounds.y;
        for entry in &mut self.entries {
            let size = entry.size();
            entry.layout(Rect::new(bounds.x, y, size.width, size.height));
            y += size.height + ENTRY_SPACING;
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, palette::WINDOW);
        for entry in &self.entries {
            entry.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseMove { position } => {
                let next = self.entry_at(position);
                self.set_hovered(next);
                None
            }
            Event::MouseLeave => {
                self.set_hovered(None);
                None
            }
            Event::MouseDown { .. } | Event::MouseUp { .. } => {
                let mut clicked = None;
                for (index, entry) in self.entries.iter_mut().enumerate() {
                    let msg = entry.event(event);
                    if msg.is_some_and(|m| m.downcast_ref::<ButtonClicked>().is_some()) {
                        clicked = Some(index);
                    }
                }
                let msg = self.click_message(clicked?);
                info!(panel = %self.id, source = %msg.source, index = msg.index, label = %msg.label, "popup entry clicked");
                Some(Box::new(msg))
            }
            _ => None,
        }
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(self.source.label())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Menu
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Single-slot owner of the current popup panel.
#[derive(Debug, Default)]
pub struct PopupSlot {
    current: Option<PopupPanel>,
    next_id: u64,
}

impl PopupSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the current panel (if any) and open a fresh one for `source`
    /// anchored beneath `anchor`.
    pub fn open(&mut self, source: BarButton, anchor: Rect) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        let origin = Point::new(anchor.x, anchor.bottom() - ANCHOR_OVERLAP);
        self.replace(PopupPanel::new(id, source, origin));
        id
    }

    /// Install `panel`, returning the panel it displaced.
    pub fn replace(&mut self, panel: PopupPanel) -> Option<PopupPanel> {
        debug!(panel = %panel.id(), source = %panel.source(), bounds = ?panel.bounds(), "popup created");
        let old = self.current.replace(panel);
        if let Some(old) = &old {
            debug!(panel = %old.id(), "popup disposed");
        }
        old
    }

    /// The current panel.
    #[must_use]
    pub const fn current(&self) -> Option<&PopupPanel> {
        self.current.as_ref()
    }

    /// The current panel, mutably.
    pub fn current_mut(&mut self) -> Option<&mut PopupPanel> {
        self.current.as_mut()
    }

    /// Whether a panel is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Whether `point` is over the current panel.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.current.as_ref().is_some_and(|p| p.contains(point))
    }
}
