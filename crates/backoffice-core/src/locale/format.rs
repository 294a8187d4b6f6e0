//! Locale-aware number and date rendering.

use chrono::NaiveDate;

/// Fraction digits kept when no explicit precision is requested.
pub const DEFAULT_MAX_FRACTION_DIGITS: usize = 3;

/// Digit grouping and decimal separators of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub group: char,
    pub decimal: char,
}

pub fn number_symbols(code: &str) -> NumberSymbols {
    match code {
        "vi" => NumberSymbols {
            group: '.',
            decimal: ',',
        },
        _ => NumberSymbols {
            group: ',',
            decimal: '.',
        },
    }
}

/// Short numeric date pattern (chrono specifiers) of a locale.
pub fn date_pattern(code: &str) -> &'static str {
    match code {
        "vi" => "%d/%m/%Y",
        "ko" => "%Y. %-m. %-d.",
        _ => "%-m/%-d/%Y",
    }
}

/// Formats `value` with grouped thousands and at most
/// `max_fraction_digits` fraction digits, trailing zeros dropped.
///
/// Non-finite values are rendered as-is.
pub fn format_number(code: &str, value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let symbols = number_symbols(code);
    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if value < 0.0 && (integer.bytes().any(|b| b != b'0') || !fraction.is_empty()) {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(symbols.group);
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push(symbols.decimal);
        out.push_str(fraction);
    }
    out
}

pub fn format_date(code: &str, date: NaiveDate) -> String {
    date.format(date_pattern(code)).to_string()
}
