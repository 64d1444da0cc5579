//! Brazilian-locale money codec.
//!
//! Statements print amounts as `1.234,56` (thousands `.`, decimals `,`),
//! optionally with a leading `-` for credits.

use crate::CoreError;

/// Decode a Brazilian-formatted amount (`"-3.080,88"` -> `-3080.88`).
pub fn decode(text: &str) -> Result<f64, CoreError> {
    let raw = text.trim();
    let cleaned = raw.replace('.', "").replace(',', ".");

    if !is_plain_decimal(&cleaned) {
        return Err(CoreError::MalformedAmount(raw.to_string()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| CoreError::MalformedAmount(raw.to_string()))
}

/// Format an amount for display: two decimals, `.` thousands, `,` decimals.
///
/// `3048.82` -> `"3.048,82"`, `-10.0` -> `"-10,00"`.
pub fn encode(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    // "-0,00" is not a useful thing to print
    let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };

    format!("{sign}{grouped},{frac_part}")
}

/// Optional leading `-`, digits, at most one `.`; at least one digit.
/// Rejects what `f64::from_str` would otherwise accept (`inf`, `1e5`, `NaN`).
fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_point = false;

    for c in body.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }

    seen_digit
}
