//! Input conversion from crossterm events to widget events.
//!
//! Terminal positions are cells; widgets work in logical pixels. Each cell
//! maps to the pixel at its center.

use crate::config::AppConfig;
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CtMouseButton, MouseEvent, MouseEventKind,
};
use flyout_core::{Event, Key, MouseButton, Point};

/// Converts terminal input into widget [`Event`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputHandler {
    cell_width: f32,
    cell_height: f32,
    quit_on_q: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl InputHandler {
    /// Create a handler for cells of `cell_width` × `cell_height` pixels.
    #[must_use]
    pub const fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            quit_on_q: true,
        }
    }

    /// Create a handler matching a host configuration.
    #[must_use]
    pub const fn from_config(config: &AppConfig) -> Self {
        Self {
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            quit_on_q: config.quit_on_q,
        }
    }

    /// Pixel position at the center of cell (`column`, `row`).
    #[must_use]
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f32::from(column) + 0.5) * self.cell_width,
            (f32::from(row) + 0.5) * self.cell_height,
        )
    }

    /// Whether `event` asks the host to quit (`q`, Esc, Ctrl-C).
    #[must_use]
    pub fn is_quit(&self, event: &CrosstermEvent) -> bool {
        let CrosstermEvent::Key(key) = event else {
            return false;
        };
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Char('q') => self.quit_on_q && !key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }

    /// Convert a crossterm event. Unsupported input yields `None`.
    #[must_use]
    pub fn convert(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key) => Self::convert_key(key),
            CrosstermEvent::Mouse(mouse) => self.convert_mouse(mouse),
            CrosstermEvent::Resize(columns, rows) => Some(Event::Resize {
                width: f32::from(columns) * self.cell_width,
                height: f32::from(rows) * self.cell_height,
            }),
            CrosstermEvent::FocusGained => Some(Event::FocusIn),
            CrosstermEvent::FocusLost => Some(Event::FocusOut),
            CrosstermEvent::Paste(text) => Some(Event::TextInput { text }),
        }
    }

    fn convert_key(key: KeyEvent) -> Option<Event> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        let key = match key.code {
            KeyCode::Char(c) => {
                return Some(Event::TextInput {
                    text: c.to_string(),
                })
            }
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(Event::KeyDown { key })
    }

    fn convert_mouse(&self, mouse: MouseEvent) -> Option<Event> {
        let position = self.cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => Some(Event::MouseDown {
                position,
                button: convert_button(button),
            }),
            MouseEventKind::Up(button) => Some(Event::MouseUp {
                position,
                button: convert_button(button),
            }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Event::MouseMove { position }),
            MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => None,
        }
    }
}

const fn convert_button(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}
