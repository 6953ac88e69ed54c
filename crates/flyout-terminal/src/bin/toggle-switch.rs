//! Toggle switch demo.
//!
//! A 60×30 switch in a fixed 200×100 window. Clicking it slides the knob and
//! fades the track between gray and green.
//!
//! Run with: `cargo run -p flyout-terminal --bin toggle-switch`
//! Quit with q, Esc or Ctrl-C.

use clap::Parser;
use flyout_terminal::{init_tracing, App, AppConfig, AppError, DemoArgs};
use flyout_widgets::{ToggleSwitch, Window};
use tracing::{error, info};

fn main() -> Result<(), AppError> {
    let args = DemoArgs::parse();
    init_tracing(&args.log_level, args.log_file.as_deref())?;
    let dump_frame = args.dump_frame;
    let config = args.into_config(AppConfig::toggle_switch());

    let mut window = Window::new("Toggle switch", 200.0, 100.0, ToggleSwitch::new())
        .fixed()
        .place_content(70.0, 35.0);
    window
        .content_mut()
        .on_toggled(|checked| info!("Toggled: {}", if *checked { "ON" } else { "OFF" }));

    let mut app = App::with_config(window, config);

    if dump_frame {
        println!("{}", app.dump_frame()?);
        return Ok(());
    }

    info!("toggle switch started");
    app.run()
        .inspect_err(|e| error!(error = %e, "toggle switch stopped"))
}
