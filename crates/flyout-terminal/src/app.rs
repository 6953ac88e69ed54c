//! Application runner hosting a widget tree in the terminal.

use crate::config::AppConfig;
use crate::direct::{CellBuffer, CellCanvas, DiffRenderer};
use crate::error::AppError;
use crate::input::InputHandler;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flyout_core::{Constraints, Event, RecordingCanvas, Rect, Widget};
use std::any::Any;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Terminal abstraction for testability.
pub trait Terminal {
    /// Enter raw mode and the alternate screen.
    fn enter(&mut self) -> Result<(), AppError>;
    /// Leave the alternate screen and raw mode.
    fn leave(&mut self) -> Result<(), AppError>;
    /// Terminal size in cells (columns, rows).
    fn size(&self) -> Result<(u16, u16), AppError>;
    /// Wait up to `timeout` for input.
    fn poll(&self, timeout: Duration) -> Result<bool, AppError>;
    /// Read the next input event.
    fn read_event(&self) -> Result<CrosstermEvent, AppError>;
    /// Write the changed cells of `buffer`.
    fn flush(
        &mut self,
        buffer: &mut CellBuffer,
        renderer: &mut DiffRenderer,
    ) -> Result<(), AppError>;
    /// Enable mouse capture.
    fn enable_mouse(&mut self) -> Result<(), AppError>;
    /// Disable mouse capture.
    fn disable_mouse(&mut self) -> Result<(), AppError>;
}

/// Terminal backed by crossterm on stdout.
///
/// Restores the terminal on drop if it is still entered, so a panic inside
/// the loop does not leave the shell in raw mode.
pub struct CrosstermTerminal {
    stdout: Stdout,
    entered: bool,
    mouse: bool,
}

impl CrosstermTerminal {
    /// Create a terminal on stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            entered: false,
            mouse: false,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> Result<(), AppError> {
        enable_raw_mode()?;
        self.entered = true;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), AppError> {
        if self.mouse {
            let _ = self.disable_mouse();
        }
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        self.entered = false;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), AppError> {
        Ok(crossterm::terminal::size()?)
    }

    fn poll(&self, timeout: Duration) -> Result<bool, AppError> {
        Ok(event::poll(timeout)?)
    }

    fn read_event(&self) -> Result<CrosstermEvent, AppError> {
        Ok(event::read()?)
    }

    fn flush(
        &mut self,
        buffer: &mut CellBuffer,
        renderer: &mut DiffRenderer,
    ) -> Result<(), AppError> {
        renderer.flush(buffer, &mut self.stdout)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn enable_mouse(&mut self) -> Result<(), AppError> {
        execute!(self.stdout, EnableMouseCapture)?;
        self.mouse = true;
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<(), AppError> {
        let _ = execute!(self.stdout, DisableMouseCapture);
        self.mouse = false;
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if self.entered {
            let _ = self.leave();
        }
    }
}

/// Frame timing metrics.
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    /// Time spent in measure and layout.
    pub layout_time: Duration,
    /// Time spent painting into the cell buffer.
    pub paint_time: Duration,
    /// Time spent writing to the terminal.
    pub flush_time: Duration,
    /// Total frame time, excluding the input wait.
    pub total_time: Duration,
    /// Frames rendered.
    pub frame_count: u64,
    /// Widget events dispatched.
    pub event_count: u64,
}

type MessageHandler = Box<dyn FnMut(&(dyn Any + Send))>;

/// Hosts a root widget: renders it, feeds it input and advances its
/// animations until the user quits.
pub struct App<W: Widget> {
    root: W,
    config: AppConfig,
    input: InputHandler,
    metrics: FrameMetrics,
    should_quit: bool,
    on_message: Option<MessageHandler>,
}

impl<W: Widget> App<W> {
    /// Create an app with the default configuration.
    #[must_use]
    pub fn new(root: W) -> Self {
        Self::with_config(root, AppConfig::default())
    }

    /// Create an app with `config`.
    #[must_use]
    pub fn with_config(root: W, config: AppConfig) -> Self {
        Self {
            root,
            input: InputHandler::from_config(&config),
            config,
            metrics: FrameMetrics::default(),
            should_quit: false,
            on_message: None,
        }
    }

    /// Receive every message the root widget emits.
    #[must_use]
    pub fn on_message(mut self, handler: impl FnMut(&(dyn Any + Send)) + 'static) -> Self {
        self.on_message = Some(Box::new(handler));
        self
    }

    /// The root widget.
    #[must_use]
    pub const fn root(&self) -> &W {
        &self.root
    }

    /// The root widget, mutably.
    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Host configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Timing of the most recent frame.
    #[must_use]
    pub const fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    /// Whether the loop has been asked to stop.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stop the loop after the current frame.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Run on the real terminal until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails. The terminal is restored first.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.run_with_terminal(CrosstermTerminal::new())
    }

    /// Run on `terminal` until the user quits.
    ///
    /// The terminal is left (and mouse capture released) whether or not the
    /// loop fails.
    ///
    /// # Errors
    ///
    /// Returns the first terminal error.
    pub fn run_with_terminal<T: Terminal>(&mut self, mut terminal: T) -> Result<(), AppError> {
        terminal.enter()?;
        info!(
            tick_rate_ms = self.config.tick_rate_ms,
            mouse = self.config.enable_mouse,
            "terminal entered"
        );

        let mut result = if self.config.enable_mouse {
            terminal.enable_mouse()
        } else {
            Ok(())
        };
        if result.is_ok() {
            result = self.run_loop(&mut terminal);
        }

        if self.config.enable_mouse {
            if let Err(e) = terminal.disable_mouse() {
                warn!(error = %e, "failed to release mouse capture");
            }
        }
        let left = terminal.leave();
        if let Err(e) = &left {
            warn!(error = %e, "failed to restore terminal");
        }
        info!(frames = self.metrics.frame_count, "terminal left");
        result.and(left)
    }

    fn run_loop<T: Terminal>(&mut self, terminal: &mut T) -> Result<(), AppError> {
        let tick = Duration::from_millis(self.config.tick_rate_ms);
        let (columns, rows) = terminal.size()?;
        let mut buffer = CellBuffer::new(columns, rows);
        let mut renderer = DiffRenderer::with_color_mode(self.config.resolved_color_mode());
        let mut last_tick = Instant::now();
        self.should_quit = false;

        while !self.should_quit {
            let frame_start = Instant::now();

            let (columns, rows) = terminal.size()?;
            if columns != buffer.width() || rows != buffer.height() {
                debug!(columns, rows, "terminal resized");
                buffer.resize(columns, rows);
                renderer.reset();
            }

            self.render_frame(&mut buffer);

            let flush_start = Instant::now();
            terminal.flush(&mut buffer, &mut renderer)?;
            self.metrics.flush_time = flush_start.elapsed();
            self.metrics.total_time = frame_start.elapsed();
            self.metrics.frame_count += 1;

            if terminal.poll(tick)? {
                let event = terminal.read_event()?;
                self.handle_input(event);
            }

            let now = Instant::now();
            self.root.tick(now.duration_since(last_tick).as_secs_f64());
            last_tick = now;
        }
        Ok(())
    }

    /// React to one terminal event: quit keys stop the loop, everything else
    /// is converted and dispatched.
    pub fn handle_input(&mut self, event: CrosstermEvent) {
        if self.input.is_quit(&event) {
            info!("quit requested");
            self.should_quit = true;
            return;
        }
        if let Some(event) = self.input.convert(event) {
            self.dispatch(&event);
        }
    }

    /// Send `event` to the root widget and hand any message to the handler.
    ///
    /// Returns whether a message was produced.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        self.metrics.event_count += 1;
        let Some(message) = self.root.event(event) else {
            return false;
        };
        if let Some(handler) = self.on_message.as_mut() {
            handler(message.as_ref());
        }
        true
    }

    /// Measure, lay out and paint the root into `buffer`.
    pub fn render_frame(&mut self, buffer: &mut CellBuffer) {
        let viewport = self.config.viewport(buffer.width(), buffer.height());

        let layout_start = Instant::now();
        let size = self.root.measure(Constraints::loose(viewport));
        self.root.layout(Rect::from_size(size));
        self.metrics.layout_time = layout_start.elapsed();

        let paint_start = Instant::now();
        let mut canvas = CellCanvas::new(buffer, self.config.cell_size());
        self.root.paint(&mut canvas);
        self.metrics.paint_time = paint_start.elapsed();
    }

    /// Lay out the root at its natural size, paint one frame and return the
    /// draw commands as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Json`] if encoding fails.
    pub fn dump_frame(&mut self) -> Result<String, AppError> {
        let size = self.root.measure(Constraints::unbounded());
        self.root.layout(Rect::from_size(size));
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        debug!(commands = canvas.command_count(), "frame recorded");
        Ok(serde_json::to_string_pretty(canvas.commands())?)
    }
}
