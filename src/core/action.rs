//! # Actions
//!
//! Everything that can happen to the calculator becomes an `Action`.
//! User clicks `7`? That's `Action::AddDigit(7)`.
//! User clicks `=`? That's `Action::Evaluate`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&state, action), expected)`.
//! And debuggable: log every action, replay the exact session.

use log::{debug, warn};
use std::fmt;
use std::str::FromStr;

use crate::core::evaluate::evaluate;
use crate::core::state::{Calculator, Digit, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddDigit(Digit),
    Clear,
    DeleteDigit,
    ChooseOperation(Operation),
    Evaluate,
}

impl Action {
    /// Stable kind name, used in logs and in the textual action form.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddDigit(_) => "add-digit",
            Action::Clear => "clear",
            Action::DeleteDigit => "delete-digit",
            Action::ChooseOperation(_) => "choose-operation",
            Action::Evaluate => "evaluate",
        }
    }
}

/// Produces the next state. `state` is never modified.
pub fn update(state: &Calculator, action: Action) -> Calculator {
    match action {
        Action::AddDigit(digit) => add_digit(state, digit),
        Action::Clear => Calculator::default(),
        Action::DeleteDigit => delete_digit(state),
        Action::ChooseOperation(op) => choose_operation(state, op),
        Action::Evaluate => evaluate_pending(state),
    }
}

/// Replaces the held snapshot with the result of `update`.
///
/// This is the one entry point presentation layers call.
pub fn dispatch(state: &mut Calculator, action: Action) {
    let next = update(state, action);
    debug!("{:?}: {:?} -> {:?}", action, state, next);
    *state = next;
}

/// Parses a textual action and dispatches it. Unknown kinds or payloads are
/// logged and leave the state alone.
pub fn dispatch_str(state: &mut Calculator, text: &str) -> Result<(), ParseActionError> {
    match text.parse::<Action>() {
        Ok(action) => {
            dispatch(state, action);
            Ok(())
        }
        Err(e) => {
            warn!("Ignoring action {:?}: {}", text, e);
            Err(e)
        }
    }
}

fn add_digit(state: &Calculator, digit: Digit) -> Calculator {
    if state.overwrite {
        return Calculator {
            current_operand: Some(digit.to_string()),
            overwrite: false,
            ..state.clone()
        };
    }

    let current = state.current_operand.as_deref();

    // No pile of leading zeros
    if digit == Digit::ZERO && current == Some("0") {
        return state.clone();
    }

    if digit.is_point() {
        match current {
            None => return state.clone(),
            Some(text) if text.contains('.') => return state.clone(),
            Some(_) => {}
        }
    }

    let mut next = current.unwrap_or_default().to_string();
    next.push(digit.as_char());
    Calculator {
        current_operand: Some(next),
        ..state.clone()
    }
}

fn choose_operation(state: &Calculator, op: Operation) -> Calculator {
    match (&state.current_operand, &state.previous_operand) {
        (None, None) => state.clone(),
        // Operand already moved up; just switch the operator
        (None, Some(_)) => Calculator {
            operation: Some(op),
            ..state.clone()
        },
        // A result being carried into a new operation stops being a result
        (Some(current), None) => Calculator {
            operation: Some(op),
            previous_operand: Some(current.clone()),
            current_operand: None,
            overwrite: false,
        },
        // Chain left to right, no precedence
        (Some(_), Some(_)) => Calculator {
            previous_operand: Some(evaluate(state)),
            operation: Some(op),
            current_operand: None,
            ..state.clone()
        },
    }
}

fn delete_digit(state: &Calculator) -> Calculator {
    let Some(current) = state.current_operand.as_deref() else {
        return state.clone();
    };

    let mut chars = current.chars();
    chars.next_back();
    let remaining = chars.as_str();

    Calculator {
        current_operand: if remaining.is_empty() {
            None
        } else {
            Some(remaining.to_string())
        },
        ..state.clone()
    }
}

fn evaluate_pending(state: &Calculator) -> Calculator {
    if state.operation.is_none()
        || state.current_operand.is_none()
        || state.previous_operand.is_none()
    {
        return state.clone();
    }

    Calculator {
        current_operand: Some(evaluate(state)),
        previous_operand: None,
        overwrite: true,
        ..state.clone()
    }
}

// ============================================================================
// Textual form: "<kind>" or "<kind>:<payload>"
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    UnknownKind(String),
    MissingPayload(&'static str),
    BadPayload { kind: &'static str, payload: String },
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseActionError::UnknownKind(kind) => write!(f, "unknown action kind: {kind:?}"),
            ParseActionError::MissingPayload(kind) => write!(f, "{kind} needs a payload"),
            ParseActionError::BadPayload { kind, payload } => {
                write!(f, "invalid payload for {kind}: {payload:?}")
            }
        }
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, payload) = match s.split_once(':') {
            Some((kind, payload)) => (kind.trim(), Some(payload.trim())),
            None => (s.trim(), None),
        };

        match kind {
            "add-digit" => {
                let payload = payload.ok_or(ParseActionError::MissingPayload("add-digit"))?;
                let mut chars = payload.chars();
                let digit = match (chars.next(), chars.next()) {
                    (Some(c), None) => Digit::try_from(c).ok(),
                    _ => None,
                };
                digit
                    .map(Action::AddDigit)
                    .ok_or_else(|| ParseActionError::BadPayload {
                        kind: "add-digit",
                        payload: payload.to_string(),
                    })
            }
            "choose-operation" => {
                let payload =
                    payload.ok_or(ParseActionError::MissingPayload("choose-operation"))?;
                payload
                    .parse::<Operation>()
                    .map(Action::ChooseOperation)
                    .map_err(|_| ParseActionError::BadPayload {
                        kind: "choose-operation",
                        payload: payload.to_string(),
                    })
            }
            "clear" => Ok(Action::Clear),
            "delete-digit" => Ok(Action::DeleteDigit),
            "evaluate" => Ok(Action::Evaluate),
            other => Err(ParseActionError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddDigit(digit) => write!(f, "{}:{}", self.kind(), digit),
            Action::ChooseOperation(op) => write!(f, "{}:{}", self.kind(), op),
            _ => f.write_str(self.kind()),
        }
    }
}
