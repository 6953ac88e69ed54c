//! End-to-end tests: demo windows driven through a scripted terminal.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use flyout_terminal::direct::{CellBuffer, DiffRenderer};
use flyout_terminal::{App, AppConfig, AppError, ColorMode, Terminal};
use flyout_widgets::{
    BarButton, HoverMenu, PopupOpened, TextChanged, ToggleChanged, ToggleSwitch, Window,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays a fixed list of events and keeps the text of every flushed frame.
struct ScriptedTerminal {
    size: (u16, u16),
    events: RefCell<VecDeque<CrosstermEvent>>,
    frames: Rc<RefCell<Vec<Vec<String>>>>,
    restored: Rc<RefCell<bool>>,
}

impl ScriptedTerminal {
    fn new(size: (u16, u16), events: Vec<CrosstermEvent>) -> Self {
        Self {
            size,
            events: RefCell::new(events.into()),
            frames: Rc::default(),
            restored: Rc::default(),
        }
    }
}

impl Terminal for ScriptedTerminal {
    fn enter(&mut self) -> Result<(), AppError> {
        Ok(())
    }

    fn leave(&mut self) -> Result<(), AppError> {
        *self.restored.borrow_mut() = true;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), AppError> {
        Ok(self.size)
    }

    fn poll(&self, _timeout: Duration) -> Result<bool, AppError> {
        Ok(true)
    }

    fn read_event(&self) -> Result<CrosstermEvent, AppError> {
        Ok(self
            .events
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| key(KeyCode::Esc)))
    }

    fn flush(
        &mut self,
        buffer: &mut CellBuffer,
        _renderer: &mut DiffRenderer,
    ) -> Result<(), AppError> {
        let rows = (0..buffer.height()).map(|y| buffer.row_text(y)).collect();
        self.frames.borrow_mut().push(rows);
        buffer.clear_dirty();
        Ok(())
    }

    fn enable_mouse(&mut self) -> Result<(), AppError> {
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<(), AppError> {
        Ok(())
    }
}

fn key(code: KeyCode) -> CrosstermEvent {
    CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn hover(column: u16, row: u16) -> CrosstermEvent {
    mouse(MouseEventKind::Moved, column, row)
}

fn click(column: u16, row: u16) -> CrosstermEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

fn with_truecolor(config: AppConfig) -> AppConfig {
    AppConfig {
        color_mode: Some(ColorMode::TrueColor),
        ..config
    }
}

fn hover_menu_app() -> App<Window<HoverMenu>> {
    App::with_config(
        Window::new("Hover menu", 400.0, 300.0, HoverMenu::new()),
        with_truecolor(AppConfig::hover_menu()),
    )
}

fn toggle_app() -> App<Window<ToggleSwitch>> {
    let window = Window::new("Toggle switch", 200.0, 100.0, ToggleSwitch::new())
        .fixed()
        .place_content(70.0, 35.0);
    App::with_config(window, with_truecolor(AppConfig::toggle_switch()))
}

// =============================================================================
// Toggle switch
// =============================================================================

#[test]
fn test_click_flips_toggle_and_notifies() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let messages = Rc::new(RefCell::new(Vec::new()));

    let mut app = toggle_app();
    let sink = Arc::clone(&observed);
    app.root_mut().content_mut().on_toggled(move |checked| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(*checked);
        }
    });
    let log = Rc::clone(&messages);
    let mut app = app.on_message(move |message| {
        if let Some(changed) = message.downcast_ref::<ToggleChanged>() {
            log.borrow_mut().push(changed.checked);
        }
    });

    // Cell (25, 6) is centred on pixel (102, 52), inside the switch.
    let terminal = ScriptedTerminal::new(
        (50, 13),
        vec![click(25, 6), key(KeyCode::Char('q'))],
    );
    let restored = Rc::clone(&terminal.restored);
    app.run_with_terminal(terminal).expect("run");

    assert!(app.root().content().is_checked());
    assert_eq!(*messages.borrow(), vec![true]);
    assert_eq!(*observed.lock().expect("lock"), vec![true]);
    assert!(*restored.borrow());
}

#[test]
fn test_click_outside_toggle_is_ignored() {
    let mut app = toggle_app();
    let terminal = ScriptedTerminal::new((50, 13), vec![click(2, 1), key(KeyCode::Esc)]);
    app.run_with_terminal(terminal).expect("run");
    assert!(!app.root().content().is_checked());
}

#[test]
fn test_toggle_renders_each_frame() {
    let mut app = toggle_app();
    let terminal = ScriptedTerminal::new((50, 13), vec![click(25, 6), key(KeyCode::Esc)]);
    let frames = Rc::clone(&terminal.frames);
    app.run_with_terminal(terminal).expect("run");

    assert_eq!(frames.borrow().len(), 2);
    assert_eq!(app.metrics().frame_count, 2);
    assert_eq!(app.metrics().event_count, 1);
}

// =============================================================================
// Hover menu
// =============================================================================

#[test]
fn test_hover_switches_popup_between_buttons() {
    let opened = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&opened);
    let mut app = hover_menu_app().on_message(move |message| {
        if let Some(popup) = message.downcast_ref::<PopupOpened>() {
            log.borrow_mut().push(popup.source);
        }
    });

    // Column 3 is x = 24.5 (Button 1), column 10 is x = 73.5 (Button 2).
    let terminal = ScriptedTerminal::new(
        (60, 22),
        vec![hover(3, 0), hover(10, 0), key(KeyCode::Esc)],
    );
    app.run_with_terminal(terminal).expect("run");

    assert_eq!(*opened.borrow(), vec![BarButton::One, BarButton::Two]);
    let menu = app.root().content();
    assert_eq!(menu.hovered(), Some(BarButton::Two));
    let popup = menu.popup().expect("popup open");
    assert_eq!(popup.source(), BarButton::Two);
    assert_eq!(popup.labels(), vec!["Cut", "Copy", "Paste"]);
}

#[test]
fn test_popup_stays_open_after_pointer_leaves() {
    let mut app = hover_menu_app();
    let terminal = ScriptedTerminal::new(
        (60, 22),
        vec![hover(3, 0), hover(40, 15), key(KeyCode::Esc)],
    );
    app.run_with_terminal(terminal).expect("run");

    let menu = app.root().content();
    assert_eq!(menu.hovered(), None);
    assert_eq!(
        menu.popup().map(flyout_widgets::PopupPanel::source),
        Some(BarButton::One)
    );
}

#[test]
fn test_popup_covers_text_area_on_screen() {
    let mut app = hover_menu_app();
    let terminal = ScriptedTerminal::new((60, 22), vec![hover(3, 0), key(KeyCode::Esc)]);
    let frames = Rc::clone(&terminal.frames);
    app.run_with_terminal(terminal).expect("run");

    let frames = frames.borrow();
    assert_eq!(frames.len(), 2);

    let before = &frames[0];
    assert!(before[1].contains("Button 1"));
    assert!(before[1].contains("Button 2"));
    assert!(before[2].contains("Type here..."));

    let after = &frames[1];
    assert!(after[1].contains("Button 1"));
    assert!(after[2].contains("Save"));
    assert!(!after[2].contains("Type"));
}

#[test]
fn test_typing_q_goes_to_text_area() {
    let edits = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&edits);
    let mut app = hover_menu_app().on_message(move |message| {
        if let Some(changed) = message.downcast_ref::<TextChanged>() {
            log.borrow_mut().push(changed.value.clone());
        }
    });

    // Cell (10, 5) is pixel (73.5, 77), inside the text area.
    let terminal = ScriptedTerminal::new(
        (60, 22),
        vec![
            click(10, 5),
            key(KeyCode::Char('q')),
            key(KeyCode::Char('u')),
            key(KeyCode::Char('i')),
            key(KeyCode::Char('t')),
            key(KeyCode::Backspace),
            key(KeyCode::Esc),
        ],
    );
    app.run_with_terminal(terminal).expect("run");

    assert_eq!(app.root().content().text_area().text(), "qui");
    assert_eq!(edits.borrow().first().map(String::as_str), Some("q"));
    assert_eq!(edits.borrow().last().map(String::as_str), Some("qui"));
}

#[test]
fn test_dump_frame_lists_bar_labels() {
    let mut app = hover_menu_app();
    let json = app.dump_frame().expect("dump");
    assert!(json.contains("Button 1"));
    assert!(json.contains("Button 2"));
    assert!(json.contains("Type here..."));
}
