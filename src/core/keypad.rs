//! # Keypad
//!
//! The calculator's buttons and how they map onto actions. Both the terminal
//! keypad and headless replay press the same `Key`s.
//!
//! ```text
//! ┌───────────┬─────┬─────┐
//! │    AC     │ DEL │  /  │
//! ├─────┬─────┼─────┼─────┤
//! │  1  │  2  │  3  │  *  │
//! │  4  │  5  │  6  │  +  │
//! │  7  │  8  │  9  │  -  │
//! ├─────┼─────┼─────┴─────┤
//! │  .  │  0  │     =     │
//! └─────┴─────┴───────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use crate::core::action::Action;
use crate::core::state::{Digit, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(Digit),
    Operation(Operation),
    AllClear,
    Delete,
    Equals,
}

impl Key {
    /// Text printed on the button.
    pub fn label(self) -> String {
        match self {
            Key::Digit(digit) => digit.to_string(),
            Key::Operation(op) => op.to_string(),
            Key::AllClear => "AC".to_string(),
            Key::Delete => "DEL".to_string(),
            Key::Equals => "=".to_string(),
        }
    }

    pub fn action(self) -> Action {
        match self {
            Key::Digit(digit) => Action::AddDigit(digit),
            Key::Operation(op) => Action::ChooseOperation(op),
            Key::AllClear => Action::Clear,
            Key::Delete => Action::DeleteDigit,
            Key::Equals => Action::Evaluate,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A button on the grid. `span` is the number of columns it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub key: Key,
    pub span: u16,
}

const fn button(key: Key) -> Button {
    Button { key, span: 1 }
}

const fn wide(key: Key) -> Button {
    Button { key, span: 2 }
}

const fn digit(c: char) -> Button {
    button(Key::Digit(Digit(c)))
}

const fn op(op: Operation) -> Button {
    button(Key::Operation(op))
}

pub const COLUMNS: u16 = 4;

/// Button rows, top to bottom. Every row spans exactly `COLUMNS`.
pub const ROWS: [&[Button]; 5] = [
    &[wide(Key::AllClear), button(Key::Delete), op(Operation::Divide)],
    &[digit('1'), digit('2'), digit('3'), op(Operation::Multiply)],
    &[digit('4'), digit('5'), digit('6'), op(Operation::Add)],
    &[digit('7'), digit('8'), digit('9'), op(Operation::Subtract)],
    &[digit('.'), digit('0'), wide(Key::Equals)],
];

/// Grid position of a button: row index and index within the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub index: usize,
}

impl Position {
    pub fn button(self) -> Option<Button> {
        ROWS.get(self.row)?.get(self.index).copied()
    }

    /// Column where the button starts.
    pub fn start_column(self) -> u16 {
        ROWS.get(self.row)
            .map(|row| row.iter().take(self.index).map(|b| b.span).sum())
            .unwrap_or(0)
    }
}

/// Finds the button covering `column` in `row`.
pub fn button_at(row: usize, column: u16) -> Option<Position> {
    let buttons = ROWS.get(row)?;
    let mut start = 0;
    for (index, b) in buttons.iter().enumerate() {
        if column < start + b.span {
            return Some(Position { row, index });
        }
        start += b.span;
    }
    None
}

/// Finds a key's position on the grid.
pub fn position_of(key: Key) -> Option<Position> {
    ROWS.iter().enumerate().find_map(|(row, buttons)| {
        buttons
            .iter()
            .position(|b| b.key == key)
            .map(|index| Position { row, index })
    })
}

// ============================================================================
// Replay labels: one character per key
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no key labelled {:?}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl TryFrom<char> for Key {
    type Error = ParseKeyError;

    /// `C` is AC and `<` is DEL; everything else is its own label.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'C' | 'c' => Ok(Key::AllClear),
            '<' => Ok(Key::Delete),
            '=' => Ok(Key::Equals),
            c => {
                if let Ok(digit) = Digit::try_from(c) {
                    return Ok(Key::Digit(digit));
                }
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .parse::<Operation>()
                    .map(Key::Operation)
                    .map_err(|_| ParseKeyError(c.to_string()))
            }
        }
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Accepts button labels (`AC`, `DEL`, `7`, `+`) and single replay characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AC" => Ok(Key::AllClear),
            "DEL" => Ok(Key::Delete),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::try_from(c),
                    _ => Err(ParseKeyError(s.to_string())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_fill_columns() {
        for row in ROWS {
            assert_eq!(row.iter().map(|b| b.span).sum::<u16>(), COLUMNS);
        }
    }

    #[test]
    fn test_every_label_parses_back() {
        for row in ROWS {
            for b in row {
                assert_eq!(b.key.label().parse::<Key>(), Ok(b.key));
            }
        }
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(Key::AllClear.action(), Action::Clear);
        assert_eq!(Key::Delete.action(), Action::DeleteDigit);
        assert_eq!(Key::Equals.action(), Action::Evaluate);
        assert_eq!(
            Key::Operation(Operation::Add).action(),
            Action::ChooseOperation(Operation::Add)
        );
        assert_eq!(Key::Digit(Digit::POINT).action(), Action::AddDigit(Digit::POINT));
    }

    #[test]
    fn test_button_at_handles_spans() {
        // AC covers columns 0 and 1
        assert_eq!(button_at(0, 0), Some(Position { row: 0, index: 0 }));
        assert_eq!(button_at(0, 1), Some(Position { row: 0, index: 0 }));
        assert_eq!(button_at(0, 2), Some(Position { row: 0, index: 1 }));
        assert_eq!(button_at(0, 3), Some(Position { row: 0, index: 2 }));
        assert_eq!(button_at(0, 4), None);
        assert_eq!(button_at(5, 0), None);
    }

    #[test]
    fn test_position_lookup() {
        let pos = position_of(Key::Equals).unwrap();
        assert_eq!(pos, Position { row: 4, index: 2 });
        assert_eq!(pos.start_column(), 2);
        assert_eq!(pos.button().map(|b| b.span), Some(2));
    }

    #[test]
    fn test_replay_chars() {
        assert_eq!(Key::try_from('c'), Ok(Key::AllClear));
        assert_eq!(Key::try_from('<'), Ok(Key::Delete));
        assert_eq!(Key::try_from('×'), Ok(Key::Operation(Operation::Multiply)));
        assert_eq!(Key::try_from('%'), Err(ParseKeyError("%".into())));
        assert!("12".parse::<Key>().is_err());
    }
}
