//! # Calculator State
//!
//! The whole calculator in one value. This module contains domain types only -
//! no terminal types. Presentation state lives in the `tui` module.
//!
//! ```text
//! Calculator
//! ├── current_operand: Option<String>   // digits being typed, or a result
//! ├── previous_operand: Option<String>  // left-hand side of the pending op
//! ├── operation: Option<Operation>      // + - * /
//! └── overwrite: bool                   // next digit replaces current_operand
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Every transition returns a fresh `Calculator`; nothing is mutated in place.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    pub current_operand: Option<String>,
    pub previous_operand: Option<String>,
    pub operation: Option<Operation>,
    /// Set right after `Evaluate`. The next digit starts a new operand.
    pub overwrite: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries anything (the post-`Clear` state).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A pending binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// ASCII symbol used in replay strings and action payloads.
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    /// Applies the operation as `lhs <op> rhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Subtract => lhs - rhs,
            Operation::Multiply => lhs * rhs,
            Operation::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOperationError(pub String);

impl fmt::Display for ParseOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation: {:?}", self.0)
    }
}

impl std::error::Error for ParseOperationError {}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operation::Add),
            "-" => Ok(Operation::Subtract),
            "*" | "×" => Ok(Operation::Multiply),
            "/" | "÷" => Ok(Operation::Divide),
            other => Err(ParseOperationError(other.to_string())),
        }
    }
}

/// A single keypad entry for an operand: `0`-`9` or `.`.
///
/// Constructing through `TryFrom<char>` keeps typed operands made of digits
/// and decimal points only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit(pub(crate) char);

impl Digit {
    pub const POINT: Digit = Digit('.');
    pub const ZERO: Digit = Digit('0');

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_point(self) -> bool {
        self.0 == '.'
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDigitError(pub char);

impl fmt::Display for ParseDigitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a digit or decimal point: {:?}", self.0)
    }
}

impl std::error::Error for ParseDigitError {}

impl TryFrom<char> for Digit {
    type Error = ParseDigitError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_digit() || c == '.' {
            Ok(Digit(c))
        } else {
            Err(ParseDigitError(c))
        }
    }
}
