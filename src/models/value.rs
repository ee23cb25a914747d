//! Comparison and conversion rules for untyped document values
//!
//! Ids arrive as path segments (always text) and are compared against stored
//! values of any type. Books and authors use [`loose_eq`], where `"7"` equals
//! the number `7`; students use [`strict_eq`], where only the same string
//! matches.

use serde_json::{Number, Value};

/// Type-coercing comparison of a stored value with a textual id.
///
/// Strings compare exactly. Numbers and booleans compare numerically against
/// `id` parsed as a number. Sequences and objects compare through their
/// string form. Null never matches.
pub fn loose_eq(value: &Value, id: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s == id,
        Value::Bool(b) => parse_number(id) == f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().is_some_and(|n| n == parse_number(id)),
        Value::Array(_) | Value::Object(_) => to_text(value) == id,
    }
}

/// Exact-type, exact-value comparison: only a string equal to `id` matches.
pub fn strict_eq(value: &Value, id: &str) -> bool {
    matches!(value, Value::String(s) if s == id)
}

/// Whether a value counts as present when filtering optional entries.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else,
/// including empty objects and sequences, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a value as used for matching and dedup keys.
///
/// Scalars render without quotes, sequences join their elements with `,`
/// (null elements render empty), objects render as `[object Object]`.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { to_text(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest round-trip digits; magnitudes from `1e21` up and below `1e-6`
/// use exponent notation with an explicit sign, e.g. `1e+21`, `1.5e-7`.
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // -0 prints as 0
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && (f.abs() >= 1e21 || f.abs() < 1e-6) => {
            let text = format!("{:e}", f);
            match text.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    format!("{}e+{}", mantissa, exponent)
                }
                _ => text,
            }
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Numeric value of a textual id; `NaN` when it is not a number.
///
/// Surrounding whitespace is ignored and a blank string is `0`. Accepts
/// decimal literals, `Infinity`, and `0x`/`0o`/`0b` integer prefixes.
fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&text[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust also accepts "inf" and "nan" spellings, which are not numbers here
    if text.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}
