//! Widgets for the Flyout demos.
//!
//! - [`HoverMenu`]: two bar buttons that open a [`PopupPanel`] on hover, over a
//!   [`TextArea`]
//! - [`ToggleSwitch`]: an animated on/off switch
//! - [`Window`]: a top-level container for either

pub mod button;
pub mod hover_menu;
pub mod palette;
pub mod popup;
pub mod text_area;
pub mod toggle_switch;
pub mod window;

pub use button::{Button, ButtonClicked};
pub use hover_menu::{HoverMenu, PopupOpened};
pub use popup::{BarButton, PanelId, PopupEntry, PopupEntryClicked, PopupPanel, PopupSlot};
pub use text_area::{TextArea, TextChanged};
pub use toggle_switch::{ToggleChanged, ToggleSwitch};
pub use window::Window;
