//! # Evaluator
//!
//! Computes `previous <op> current` from a `Calculator` snapshot.
//!
//! Operands are text all the way through the reducer, so this module owns both
//! directions of the number/text boundary:
//!
//! - [`parse_float`] reads the longest numeric prefix of an operand
//!   (`"12.5"`, `"-3"`, `"1e+21"`, `"Infinity"`).
//! - [`number_to_string`] renders a result in its canonical shortest form
//!   (`2.5`, `8`, `1e+21`, `Infinity`, `NaN`).
//!
//! Nothing here fails loudly. An operand that doesn't parse gives an empty
//! result, which then shows up as a blank display.

use crate::core::state::Calculator;

/// Evaluates the pending operation. Returns `""` when either operand is not a
/// number or no operation is pending.
pub fn evaluate(state: &Calculator) -> String {
    let previous = state.previous_operand.as_deref().and_then(parse_float);
    let current = state.current_operand.as_deref().and_then(parse_float);

    let (Some(previous), Some(current)) = (previous, current) else {
        return String::new();
    };

    match state.operation {
        Some(op) => number_to_string(op.apply(previous, current)),
        None => String::new(),
    }
}

/// Parses the longest leading decimal number in `text`.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or the literal `Infinity`. Trailing garbage is ignored. Returns
/// `None` when no digits lead the text.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Renders `value` as the shortest decimal text that round-trips.
///
/// Plain notation covers magnitudes in `[1e-6, 1e21)`; anything outside uses
/// exponent notation with an explicit exponent sign (`1e+21`, `1.5e-7`).
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    let Some((digits, n)) = shortest_digits(value) else {
        return format!("{value}");
    };
    let k = digits.len() as i32;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{e_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{e_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

/// Shortest round-trip significant digits of `|value|` and the position of
/// the decimal point relative to them: `2.5` is `("25", 1)`, `1e21` is
/// `("1", 22)`. `None` for NaN and infinities.
pub fn shortest_digits(value: f64) -> Option<(String, i32)> {
    if !value.is_finite() {
        return None;
    }
    // `{:e}` yields the shortest round-trip digits, e.g. "2.5e0", "1e21"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent = exponent.parse::<i32>().ok()?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    Some((digits, exponent + 1))
}
