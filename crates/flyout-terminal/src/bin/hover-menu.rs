//! Hover menu demo.
//!
//! Two bar buttons over a text area. Hovering a button opens a popup panel
//! anchored just under it, replacing any panel that was open.
//!
//! Run with: `cargo run -p flyout-terminal --bin hover-menu`
//! Quit with Esc or Ctrl-C.

use clap::Parser;
use flyout_terminal::{init_tracing, App, AppConfig, AppError, DemoArgs};
use flyout_widgets::{HoverMenu, PopupOpened, TextChanged, Window};
use std::any::Any;
use tracing::{debug, error, info};

const WINDOW_WIDTH: f32 = 400.0;
const WINDOW_HEIGHT: f32 = 300.0;

fn main() -> Result<(), AppError> {
    let args = DemoArgs::parse();
    init_tracing(&args.log_level, args.log_file.as_deref())?;
    let dump_frame = args.dump_frame;
    let config = args.into_config(AppConfig::hover_menu());

    let window = Window::new("Hover menu", WINDOW_WIDTH, WINDOW_HEIGHT, HoverMenu::new());
    let mut app = App::with_config(window, config).on_message(log_message);

    if dump_frame {
        println!("{}", app.dump_frame()?);
        return Ok(());
    }

    info!("hover menu started");
    app.run()
        .inspect_err(|e| error!(error = %e, "hover menu stopped"))
}

fn log_message(message: &(dyn Any + Send)) {
    if let Some(opened) = message.downcast_ref::<PopupOpened>() {
        info!(source = %opened.source, panel = %opened.panel_id, "popup opened");
    } else if let Some(changed) = message.downcast_ref::<TextChanged>() {
        debug!(chars = changed.value.chars().count(), "text changed");
    }
}
