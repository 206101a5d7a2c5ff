//! # Keypad Component
//!
//! The button grid. Follows the persistent state + transient wrapper pattern:
//! - `KeypadState` lives in `TuiState` (focus, cached button rects)
//! - `Keypad` is created each frame with borrowed state
//!
//! ## Input
//!
//! - Arrow keys move the focus highlight; Enter/Space press the focused button.
//! - Left click presses whatever button is under the pointer.
//! - Mouse hover moves the focus, so the highlight follows the pointer.
//!
//! Button rects are recorded during render and reused for hit testing, so
//! clicks always match what was last drawn.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position as Point, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::keypad::{self, COLUMNS, Key, Position, ROWS};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    Press(Key),
}

/// Persistent state for the keypad.
pub struct KeypadState {
    pub focus: Position,
    /// Where each button was drawn last frame.
    button_rects: Vec<(Position, Rect)>,
}

impl KeypadState {
    pub fn new() -> Self {
        // Start on `=`: the first thing most sessions end with
        let focus = keypad::position_of(Key::Equals).unwrap_or(Position { row: 0, index: 0 });
        Self {
            focus,
            button_rects: Vec::new(),
        }
    }

    pub fn focused_key(&self) -> Option<Key> {
        self.focus.button().map(|b| b.key)
    }

    /// Finds the button drawn at a screen cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Position> {
        let point = Point::new(column, row);
        self.button_rects
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(pos, _)| *pos)
    }

    fn move_vertical(&mut self, down: bool) {
        let row = if down {
            (self.focus.row + 1).min(ROWS.len() - 1)
        } else {
            self.focus.row.saturating_sub(1)
        };
        // Stay in the same column when changing rows
        let column = self.focus.start_column();
        if let Some(pos) = keypad::button_at(row, column) {
            self.focus = pos;
        }
    }

    fn move_horizontal(&mut self, right: bool) {
        let len = ROWS[self.focus.row].len();
        self.focus.index = if right {
            (self.focus.index + 1).min(len - 1)
        } else {
            self.focus.index.saturating_sub(1)
        };
    }
}

impl Default for KeypadState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for KeypadState {
    type Event = KeypadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<KeypadEvent> {
        match *event {
            TuiEvent::CursorUp => {
                self.move_vertical(false);
                None
            }
            TuiEvent::CursorDown => {
                self.move_vertical(true);
                None
            }
            TuiEvent::CursorLeft => {
                self.move_horizontal(false);
                None
            }
            TuiEvent::CursorRight => {
                self.move_horizontal(true);
                None
            }
            TuiEvent::Press => self.focused_key().map(KeypadEvent::Press),
            TuiEvent::MouseMove(column, row) => {
                if let Some(pos) = self.hit_test(column, row) {
                    self.focus = pos;
                }
                None
            }
            TuiEvent::MouseClick(column, row) => {
                let pos = self.hit_test(column, row)?;
                self.focus = pos;
                pos.button().map(|b| KeypadEvent::Press(b.key))
            }
            TuiEvent::Quit | TuiEvent::Resize => None,
        }
    }
}

/// Transient render wrapper for the keypad.
pub struct Keypad<'a> {
    state: &'a mut KeypadState,
}

impl<'a> Keypad<'a> {
    pub fn new(state: &'a mut KeypadState) -> Self {
        Self { state }
    }
}

impl Component for Keypad<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let row_areas = Layout::vertical(vec![Constraint::Fill(1); ROWS.len()]).split(area);
        self.state.button_rects.clear();

        for (row, buttons) in ROWS.iter().enumerate() {
            let constraints: Vec<Constraint> = buttons
                .iter()
                .map(|b| Constraint::Ratio(b.span as u32, COLUMNS as u32))
                .collect();
            let cells = Layout::horizontal(constraints).split(row_areas[row]);

            for (index, (button, cell)) in buttons.iter().zip(cells.iter()).enumerate() {
                let pos = Position { row, index };
                let focused = pos == self.state.focus;
                render_button(frame, *cell, button.key, focused);
                self.state.button_rects.push((pos, *cell));
            }
        }
    }
}

fn render_button(frame: &mut Frame, area: Rect, key: Key, focused: bool) {
    let base = match key {
        Key::Digit(_) => Style::default().fg(Color::White),
        Key::Operation(_) => Style::default().fg(Color::Yellow),
        Key::AllClear | Key::Delete => Style::default().fg(Color::Red),
        Key::Equals => Style::default().fg(Color::Green),
    };
    let (style, border_style) = if focused {
        (
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED),
            base,
        )
    } else {
        (base, base.add_modifier(Modifier::DIM))
    };

    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically center the label in whatever height the row got
    let label_area = Rect {
        y: inner.y + inner.height.saturating_sub(1) / 2,
        height: inner.height.min(1),
        ..inner
    };
    let label = Paragraph::new(key.label())
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(label, label_area);
}
