//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keypad presses into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The core holds no terminal types, so a different front end only needs to
//! call `dispatch` and read `display_lines`.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop blocks on input (up to 500ms) and only
//! redraws after an event arrived. All pending events are drained before the
//! next draw so a burst of mouse moves costs a single frame.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::dispatch;
use crate::core::config::ResolvedConfig;
use crate::core::format::format_operand;
use crate::core::keypad::Key;
use crate::core::state::Calculator;
use crate::tui::component::EventHandler;
use crate::tui::components::{KeypadEvent, KeypadState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub keypad: KeypadState,
    pub title: String,
    pub status_message: String,
    pub show_help: bool,
}

impl TuiState {
    pub fn new(title: String, show_help: bool) -> Self {
        Self {
            keypad: KeypadState::new(),
            title,
            status_message: String::new(),
            show_help,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut calculator = Calculator::default();
    let mut tui = TuiState::new(config.title.clone(), config.show_help);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        log::warn!("Mouse capture unavailable: {}", e);
    }

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &calculator, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if should_quit {
                break;
            }
            should_quit = handle_event(&mut calculator, &mut tui, event);
        }

        if should_quit {
            break Ok(());
        }
    };

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Tally shutting down");
    result
}

/// Routes one event. Returns true when the app should quit.
fn handle_event(calculator: &mut Calculator, tui: &mut TuiState, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Quit => true,
        // Resize just needs a redraw (already flagged)
        TuiEvent::Resize => false,
        _ => {
            if let Some(KeypadEvent::Press(key)) = tui.keypad.handle_event(&event) {
                press(calculator, tui, key);
            }
            false
        }
    }
}

/// Dispatches a key press and refreshes the status line.
fn press(calculator: &mut Calculator, tui: &mut TuiState, key: Key) {
    debug!("Pressed {}", key);
    let before = calculator.clone();
    dispatch(calculator, key.action());

    if let Some(summary) = evaluation_summary(&before, calculator) {
        info!("Evaluated {}", summary);
        tui.status_message = summary;
    } else if key == Key::AllClear {
        tui.status_message.clear();
    }
}

/// `"10 / 4 = 2.5"` when the step from `before` to `after` was an evaluation.
fn evaluation_summary(before: &Calculator, after: &Calculator) -> Option<String> {
    if before.overwrite || !after.overwrite {
        return None;
    }
    let previous = format_operand(before.previous_operand.as_deref())?;
    let current = format_operand(before.current_operand.as_deref())?;
    let operation = before.operation?;
    let result = format_operand(after.current_operand.as_deref()).unwrap_or_default();
    Some(format!("{previous} {operation} {current} = {result}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::replay::replay;

    #[test]
    fn test_press_evaluate_sets_status() {
        let mut calculator = replay("1000*2").state;
        let mut tui = TuiState::new("Tally".to_string(), true);
        press(&mut calculator, &mut tui, Key::Equals);
        assert_eq!(calculator.current_operand.as_deref(), Some("2000"));
        assert_eq!(tui.status_message, "1,000 * 2 = 2,000");
    }

    #[test]
    fn test_press_incomplete_evaluate_keeps_status() {
        let mut calculator = Calculator::default();
        let mut tui = TuiState::new("Tally".to_string(), true);
        tui.status_message = "earlier".to_string();
        press(&mut calculator, &mut tui, Key::Equals);
        assert!(calculator.is_empty());
        assert_eq!(tui.status_message, "earlier");
    }

    #[test]
    fn test_press_all_clear_resets_status() {
        let mut calculator = replay("5+5=").state;
        let mut tui = TuiState::new("Tally".to_string(), true);
        tui.status_message = "5 + 5 = 10".to_string();
        press(&mut calculator, &mut tui, Key::AllClear);
        assert!(calculator.is_empty());
        assert!(tui.status_message.is_empty());
    }

    #[test]
    fn test_handle_event_quit() {
        let mut calculator = Calculator::default();
        let mut tui = TuiState::new("Tally".to_string(), true);
        assert!(handle_event(&mut calculator, &mut tui, TuiEvent::Quit));
        assert!(!handle_event(&mut calculator, &mut tui, TuiEvent::Resize));
    }

    #[test]
    fn test_handle_event_press_dispatches_focused_key() {
        let mut calculator = replay("6/3").state;
        let mut tui = TuiState::new("Tally".to_string(), true);
        // Initial focus is `=`
        assert!(!handle_event(&mut calculator, &mut tui, TuiEvent::Press));
        assert_eq!(calculator.current_operand.as_deref(), Some("2"));
    }
}
