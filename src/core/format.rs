//! # Display Formatter
//!
//! Turns operand text into what the display shows. The integer part gets
//! en-US thousands grouping; the fraction is passed through untouched so a
//! trailing `"."` or `"0"` the user just typed stays visible.
//!
//! ```text
//! "1234567.89"  →  "1,234,567.89"
//! "1000."       →  "1,000."
//! "1e+21"       →  "1,000,000,000,000,000,000,000"
//! ```

use crate::core::evaluate::shortest_digits;
use crate::core::state::Calculator;

/// The two display rows, already formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLines {
    /// Previous operand followed by the pending operation, e.g. `"1,234 +"`.
    pub previous: String,
    /// Current operand.
    pub current: String,
}

/// Builds the display rows from the read surface of a state.
///
/// The operation stays visible after `=` even though the previous operand is
/// gone, so the top row can be just `"/"`.
pub fn display_lines(state: &Calculator) -> DisplayLines {
    let previous = format_operand(state.previous_operand.as_deref()).unwrap_or_default();
    let operation = state
        .operation
        .map(|op| op.to_string())
        .unwrap_or_default();

    DisplayLines {
        previous: format!("{previous} {operation}").trim().to_string(),
        current: format_operand(state.current_operand.as_deref()).unwrap_or_default(),
    }
}

/// Formats an operand for display. Absent in, absent out.
pub fn format_operand(operand: Option<&str>) -> Option<String> {
    let operand = operand?;
    if operand.is_empty() {
        // Failed evaluations land here; show a blank display
        return Some(String::new());
    }
    let formatted = match operand.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", format_integer(integer), fraction),
        None => format_integer(operand),
    };
    Some(formatted)
}

/// Renders the integer part of an operand with zero fraction digits.
///
/// Plain digit runs are grouped as typed so long operands keep every digit.
/// Anything else (exponent forms, `Infinity`, junk) goes through `f64`.
fn format_integer(text: &str) -> String {
    let trimmed = text.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        let digits = unsigned.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        return format!("{sign}{}", group_thousands(digits));
    }

    let value = to_number(text);

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "∞" } else { "-∞" };
        return text.to_string();
    }

    // f64::round is half-away-from-zero, same as the usual display rounding
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let digits = match shortest_digits(rounded) {
        // Integral, so the point never falls inside the digits
        Some((digits, point)) if digits != "0" => {
            let padding = (point - digits.len() as i32).max(0) as usize;
            format!("{digits}{}", "0".repeat(padding))
        }
        _ => "0".to_string(),
    };

    format!("{sign}{}", group_thousands(&digits))
}

/// Whole-string numeric conversion. Empty text is zero; anything that isn't
/// entirely a number is NaN.
fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // str::parse also accepts "inf" and "nan" spellings; those aren't numbers here
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
