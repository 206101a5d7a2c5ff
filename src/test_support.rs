//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::core::action::{Action, update};
use crate::core::state::{Calculator, Digit, Operation};

/// Builds a state with the given operands and operation, overwrite off.
pub fn calc(
    current: Option<&str>,
    previous: Option<&str>,
    operation: Option<Operation>,
) -> Calculator {
    Calculator {
        current_operand: current.map(str::to_string),
        previous_operand: previous.map(str::to_string),
        operation,
        overwrite: false,
    }
}

/// `AddDigit` for a known-good digit character.
pub fn digit(c: char) -> Action {
    Action::AddDigit(Digit::try_from(c).expect("test digit must be 0-9 or '.'"))
}

/// Folds a sequence of actions over `start` through `update`.
pub fn run(start: &Calculator, actions: &[Action]) -> Calculator {
    actions
        .iter()
        .fold(start.clone(), |state, action| update(&state, *action))
}

/// All cells of a `TestBackend` buffer, row-major, as one string.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

/// One string per buffer row, trailing spaces kept.
pub fn buffer_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect())
        .collect()
}
