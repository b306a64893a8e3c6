//! Number formatting for the Indonesian locale
//!
//! Thousands are separated by `.`, decimals by `,`. Currency amounts are
//! Rupiah with two decimals; quantities keep up to three decimals.

/// Format an amount as Rupiah, e.g. `Rp 1.234.567,00`
///
/// Missing and non-finite amounts render as zero.
pub fn format_currency(value: Option<f64>) -> String {
    let value = finite_or_zero(value);
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{}Rp\u{a0}{},{}",
        sign(value, &fixed),
        group_thousands(whole),
        fraction
    )
}

/// Format a quantity, e.g. `1.234,5`
///
/// At most three fraction digits are kept and trailing zeros are dropped.
pub fn format_number(value: f64) -> String {
    let value = finite_or_zero(Some(value));
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = format!("{}{}", sign(value, &fixed), group_thousands(whole));
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Minus sign, unless the value rounds to zero
fn sign(value: f64, rounded: &str) -> &'static str {
    if value < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    }
}

/// Insert `.` between groups of three in a string of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1.000");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Some(1500.0)), "Rp\u{a0}1.500,00");
        assert_eq!(format_currency(Some(350.5)), "Rp\u{a0}350,50");
        assert_eq!(format_currency(Some(1234567.891)), "Rp\u{a0}1.234.567,89");
    }

    #[test]
    fn test_format_currency_missing_or_invalid() {
        assert_eq!(format_currency(None), "Rp\u{a0}0,00");
        assert_eq!(format_currency(Some(f64::NAN)), "Rp\u{a0}0,00");
        assert_eq!(format_currency(Some(f64::INFINITY)), "Rp\u{a0}0,00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Some(-2500.0)), "-Rp\u{a0}2.500,00");
        assert_eq!(format_currency(Some(-0.001)), "Rp\u{a0}0,00");
    }

    #[test]
    fn test_large_values_keep_every_digit() {
        assert_eq!(
            format_currency(Some(1e20)),
            "Rp\u{a0}100.000.000.000.000.000.000,00"
        );
        assert_eq!(format_currency(Some(-1e20)), "-Rp\u{a0}100.000.000.000.000.000.000,00");
        assert_eq!(format_number(2e17), "200.000.000.000.000.000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(75.0), "75");
        assert_eq!(format_number(12500.0), "12.500");
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(0.125), "0,125");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-10.0), "-10");
        assert_eq!(format_number(-1500.25), "-1.500,25");
    }
}
