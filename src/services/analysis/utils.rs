use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CellValue;

static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal literal pattern")
});

static RADIX_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0([xX][0-9a-fA-F]+|[oO][0-7]+|[bB][01]+)$").expect("valid radix literal pattern")
});

/// Converts a cell to a finite number, or `None` when it has no numeric reading.
///
/// Booleans read as 1 and 0. Text is trimmed first; blank text is not a number.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Null => None,
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Number(n) => n.is_finite().then_some(*n),
        CellValue::Text(s) => parse_number(s),
    }
}

/// Same as [`to_number`] for a raw string.
pub fn parse_number(text: &str) -> Option<f64> {
    parse_literal(text).filter(|n| n.is_finite())
}

/// True when `text` reads as a number under loose coercion: blank text, overflowing
/// literals and `Infinity` all count.
pub fn is_numeric_text(text: &str) -> bool {
    text.trim().is_empty() || parse_literal(text).is_some()
}

// Numeric reading of trimmed text, possibly infinite.
fn parse_literal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if DECIMAL_LITERAL.is_match(trimmed) {
        trimmed.parse::<f64>().ok()
    } else if RADIX_LITERAL.is_match(trimmed) {
        let radix = match trimmed.as_bytes()[1] {
            b'x' | b'X' => 16,
            b'o' | b'O' => 8,
            _ => 2,
        };
        trimmed[2..].chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
    } else {
        match trimmed {
            "Infinity" | "+Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }
}

/// Renders a cell the way it appears in tables, search and grouping.
pub fn to_display_string(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(s) => s.clone(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let label = if n > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // exponent form carries an explicit sign: 1e+21, 1e-7
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

/// Formats to exactly two decimals; negative zero prints unsigned.
///
/// Non-finite values and magnitudes of 1e21 and above use the plain number form.
pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}
