//! Fixed colors used by the demo widgets.

use flyout_core::Color;

/// Window background.
pub const WINDOW: Color = Color::from_rgb8(0xf0, 0xf0, 0xf0);
/// Push-button face.
pub const BUTTON: Color = Color::from_rgb8(0xe1, 0xe1, 0xe1);
/// Push-button face while hovered.
pub const BUTTON_HOVER: Color = Color::from_rgb8(0xe5, 0xf1, 0xfb);
/// Push-button face while pressed.
pub const BUTTON_PRESSED: Color = Color::from_rgb8(0xcc, 0xe4, 0xf7);
/// Push-button border.
pub const BUTTON_BORDER: Color = Color::from_rgb8(0xad, 0xad, 0xad);
/// Push-button border while hovered.
pub const BUTTON_BORDER_HOVER: Color = Color::from_rgb8(0x00, 0x78, 0xd7);
/// Body text.
pub const TEXT: Color = Color::BLACK;
/// Placeholder text.
pub const PLACEHOLDER: Color = Color::from_rgb8(0x80, 0x80, 0x80);
/// Text field background.
pub const FIELD: Color = Color::WHITE;

/// CSS `lightblue`.
pub const LIGHT_BLUE: Color = Color::from_rgb8(0xad, 0xd8, 0xe6);
/// CSS `lightgreen`.
pub const LIGHT_GREEN: Color = Color::from_rgb8(0x90, 0xee, 0x90);
/// CSS `pink`.
pub const PINK: Color = Color::from_rgb8(0xff, 0xc0, 0xcb);
/// CSS `yellow`.
pub const YELLOW: Color = Color::from_rgb8(0xff, 0xff, 0x00);
/// CSS `orange`.
pub const ORANGE: Color = Color::from_rgb8(0xff, 0xa5, 0x00);

/// Toggle track color when off (`#CCCCCC`).
pub const TOGGLE_OFF: Color = Color::from_rgb8(0xcc, 0xcc, 0xcc);
/// Toggle track color when on (`#4CAF50`).
pub const TOGGLE_ON: Color = Color::from_rgb8(0x4c, 0xaf, 0x50);
