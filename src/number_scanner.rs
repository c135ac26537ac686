/// Convert a plain decimal string (digits, at most one '.') to seconds.
///
/// Digits are accumulated by hand: the integer part as `value * 10 + digit`,
/// then each fractional digit as `digit / 10^position`. No sign, exponent or
/// second decimal point is understood; callers hand in text that has already
/// been checked to be numeric. Stray non-digit characters are skipped.
pub fn parse_decimal(text: &str) -> f64 {
    let mut chars = text.chars();
    let mut value = 0.0;

    for c in chars.by_ref() {
        if c == '.' {
            break;
        }
        if let Some(digit) = c.to_digit(10) {
            value = value * 10.0 + digit as f64;
        }
    }

    // Anything left is the fractional part; an empty iterator means no '.'
    let mut position = 1;
    for c in chars {
        if let Some(digit) = c.to_digit(10) {
            value += digit as f64 / 10f64.powi(position);
            position += 1;
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers() {
        assert_eq!(parse_decimal("0"), 0.0);
        assert_eq!(parse_decimal("3"), 3.0);
        assert_eq!(parse_decimal("1234"), 1234.0);
        assert_eq!(parse_decimal(""), 0.0);
    }

    #[test]
    fn test_fractional_part() {
        assert_eq!(parse_decimal("12.5"), 12.5);
        assert_eq!(parse_decimal("10.000"), 10.0);
        assert_eq!(parse_decimal("7."), 7.0);
        assert!((parse_decimal("15.517") - 15.517).abs() < 1e-9);
        assert!((parse_decimal("0.033") - 0.033).abs() < 1e-9);
    }
}
