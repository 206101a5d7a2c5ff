//! # Headless Replay
//!
//! Drives the reducer from a string of key labels, one character per press.
//! Used by `tally --keys` and by tests that want whole sessions.
//!
//! ```text
//! "12+3=" → press 1, 2, +, 3, = → display "15"
//! ```

use log::{info, warn};

use crate::core::action::dispatch;
use crate::core::format::{DisplayLines, display_lines};
use crate::core::keypad::Key;
use crate::core::state::Calculator;

/// Result of a replay: the final state plus the labels that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replay {
    pub state: Calculator,
    pub rejected: Vec<char>,
}

impl Replay {
    pub fn display(&self) -> DisplayLines {
        display_lines(&self.state)
    }

    /// Display rows as printed by the CLI: the previous row only when it has
    /// something on it.
    pub fn render(&self) -> String {
        let lines = self.display();
        if lines.previous.is_empty() {
            lines.current
        } else {
            format!("{}\n{}", lines.previous, lines.current)
        }
    }
}

/// Presses each key in `keys` starting from an empty calculator.
///
/// Whitespace is ignored. Unknown labels are logged and skipped.
pub fn replay(keys: &str) -> Replay {
    replay_from(Calculator::default(), keys)
}

pub fn replay_from(start: Calculator, keys: &str) -> Replay {
    let mut state = start;
    let mut rejected = Vec::new();

    for c in keys.chars().filter(|c| !c.is_whitespace()) {
        match Key::try_from(c) {
            Ok(key) => dispatch(&mut state, key.action()),
            Err(e) => {
                warn!("Skipping key: {}", e);
                rejected.push(c);
            }
        }
    }

    info!(
        "Replayed {} keys ({} rejected)",
        keys.chars().filter(|c| !c.is_whitespace()).count(),
        rejected.len()
    );
    Replay { state, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Operation;

    #[test]
    fn test_replay_simple_sum() {
        let result = replay("12+3=");
        assert_eq!(result.state.current_operand.as_deref(), Some("15"));
        assert!(result.state.overwrite);
        assert_eq!(result.render(), "+\n15");
    }

    #[test]
    fn test_replay_pending_operation() {
        let result = replay("1234 *");
        assert_eq!(result.state.previous_operand.as_deref(), Some("1234"));
        assert_eq!(result.state.operation, Some(Operation::Multiply));
        assert_eq!(result.render(), "1,234 *\n");
    }

    #[test]
    fn test_replay_skips_unknown() {
        let result = replay("2%x3");
        assert_eq!(result.state.current_operand.as_deref(), Some("23"));
        assert_eq!(result.rejected, vec!['%', 'x']);
    }

    #[test]
    fn test_replay_clear_and_delete() {
        assert!(replay("99+1C").state.is_empty());
        assert_eq!(replay("123<").state.current_operand.as_deref(), Some("12"));
    }

    #[test]
    fn test_replay_from_existing_state() {
        let start = replay("10/").state;
        let result = replay_from(start, "4=");
        assert_eq!(result.render(), "/\n2.5");
    }

    #[test]
    fn test_replay_empty() {
        let result = replay("");
        assert!(result.state.is_empty());
        assert_eq!(result.render(), "");
    }
}
