//! Lenient form-field parsing.
//!
//! Field text is read the way a browser's `parseFloat`/`parseInt` read it: the
//! longest numeric prefix wins and anything unparsable becomes zero.

use super::types::ProjectionInput;

/// Raw text of the four calculator fields. `None` behaves like an empty field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub initial_capital: Option<String>,
    pub current_age: Option<String>,
    /// Annual interest as a percentage, e.g. `"5"` for 5%.
    pub annual_interest: Option<String>,
    pub monthly_contribution: Option<String>,
}

impl FormFields {
    pub fn normalize(&self) -> ProjectionInput {
        ProjectionInput {
            initial_capital: parse_lenient_float(field(&self.initial_capital)),
            current_age: parse_lenient_int(field(&self.current_age)),
            annual_interest_rate: parse_lenient_float(field(&self.annual_interest)) / 100.0,
            monthly_contribution: parse_lenient_float(field(&self.monthly_contribution)),
        }
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Parses the leading decimal number of `text`, returning 0 when there is none.
pub fn parse_lenient_float(text: &str) -> f64 {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Parses the leading integer of `text`, saturating to the `i32` range.
pub fn parse_lenient_int(text: &str) -> i32 {
    let text = text.trim();
    let bytes = text.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let digits = count_digits(&bytes[start..]);
    if digits == 0 {
        return 0;
    }

    let mut value: i64 = 0;
    for &b in &bytes[start..start + digits] {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
