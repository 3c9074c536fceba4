use super::engine::round_half_up;

/// Renders a monetary amount for display.
pub trait CurrencyFormatter {
    fn format(&self, value: f64) -> String;
}

/// Whole-unit amounts grouped the way the `es-ES` locale groups them.
///
/// Spanish grouping only kicks in from five integer digits, so `1234` stays
/// ungrouped while `12345` becomes `12.345`. Amounts rounding to negative zero
/// print as `-0`, matching the browser.
#[derive(Debug, Clone)]
pub struct LocaleCurrency {
    pub group_separator: char,
    pub min_grouping_digits: usize,
    pub suffix: String,
}

impl LocaleCurrency {
    pub fn es_euro() -> Self {
        Self {
            group_separator: '.',
            min_grouping_digits: 5,
            suffix: " €".to_string(),
        }
    }
}

impl Default for LocaleCurrency {
    fn default() -> Self {
        Self::es_euro()
    }
}

impl CurrencyFormatter for LocaleCurrency {
    fn format(&self, value: f64) -> String {
        format!("{}{}", self.format_number(value), self.suffix)
    }
}

impl LocaleCurrency {
    /// The rounded, grouped number without the currency suffix.
    pub fn format_number(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            let symbol = if value < 0.0 { "-∞" } else { "∞" };
            return symbol.to_string();
        }

        let rounded = round_half_up(value);
        let digits = format!("{:.0}", rounded.abs());
        let grouped = if digits.len() >= self.min_grouping_digits {
            group_digits(&digits, self.group_separator)
        } else {
            digits
        };

        if rounded.is_sign_negative() {
            format!("-{grouped}")
        } else {
            grouped
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_are_not_grouped() {
        let fmt = LocaleCurrency::es_euro();
        assert_eq!(fmt.format(0.0), "0 €");
        assert_eq!(fmt.format(999.4), "999 €");
        assert_eq!(fmt.format(1_234.0), "1234 €");
        assert_eq!(fmt.format(9_999.5), "10.000 €");
    }

    #[test]
    fn large_amounts_use_dot_groups() {
        let fmt = LocaleCurrency::es_euro();
        assert_eq!(fmt.format(12_345.0), "12.345 €");
        assert_eq!(fmt.format(277_755.95), "277.756 €");
        assert_eq!(fmt.format(1_234_567.0), "1.234.567 €");
    }

    #[test]
    fn negative_amounts_keep_sign_and_round_half_up() {
        let fmt = LocaleCurrency::es_euro();
        assert_eq!(fmt.format(-12_345.6), "-12.346 €");
        assert_eq!(fmt.format(-2.5), "-2 €");
    }

    #[test]
    fn amounts_rounding_to_negative_zero_keep_the_sign() {
        let fmt = LocaleCurrency::es_euro();
        assert_eq!(fmt.format(-0.2), "-0 €");
        assert_eq!(fmt.format(-2.220_446_049_250_313e-16), "-0 €");
        assert_eq!(fmt.format(0.0), "0 €");
        assert_eq!(fmt.format(0.4), "0 €");
    }

    #[test]
    fn non_finite_amounts_are_spelled_out() {
        let fmt = LocaleCurrency::es_euro();
        assert_eq!(fmt.format(f64::NAN), "NaN €");
        assert_eq!(fmt.format(f64::INFINITY), "∞ €");
        assert_eq!(fmt.format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn custom_grouping_is_respected() {
        let fmt = LocaleCurrency {
            group_separator: ',',
            min_grouping_digits: 4,
            suffix: " USD".to_string(),
        };
        assert_eq!(fmt.format(1_234.0), "1,234 USD");
    }
}
