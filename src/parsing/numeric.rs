//! Best-effort numeric token decoding
//!
//! Tokens are not validated. Decoding consumes the longest prefix that fits
//! the grammar and ignores the rest, so `"3/7"` decodes as `3` and a token
//! without digits decodes as zero.

/// Decodes `-?digits(.digits)?`. Exponents and a leading `+` are not part of
/// the grammar and end the number like any other character.
pub fn parse_float(token: &str) -> f32 {
    let bytes = token.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut has_digits = false;
    let mut seen_point = false;

    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => has_digits = true,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    if !has_digits {
        return 0.0;
    }

    // The prefix is plain ASCII decimal, which `f32::from_str` rounds correctly.
    token[..end].parse().unwrap_or(0.0)
}

/// Decodes the leading run of decimal digits, saturating at `u32::MAX`.
pub fn parse_unsigned(token: &str) -> u32 {
    token
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |value, digit| {
            value
                .saturating_mul(10)
                .saturating_add(u32::from(digit - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_examples() {
        assert_eq!(parse_float("-0.5"), -0.5);
        assert_eq!(parse_float("3"), 3.0);
        assert_eq!(parse_float("2.25"), 2.25);
        assert_eq!(parse_float("0.1"), 0.1);
    }

    #[test]
    fn test_float_stops_at_foreign_character() {
        assert_eq!(parse_float("1.5e3"), 1.5);
        assert_eq!(parse_float("4/2"), 4.0);
        assert_eq!(parse_float("1.2.3"), 1.2);
    }

    #[test]
    fn test_float_without_digits_is_zero() {
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("-"), 0.0);
        assert_eq!(parse_float("+1"), 0.0);
        assert_eq!(parse_float("."), 0.0);
    }

    #[test]
    fn test_float_partial_decimal_forms() {
        assert_eq!(parse_float("7."), 7.0);
        assert_eq!(parse_float(".25"), 0.25);
        assert_eq!(parse_float("-.75"), -0.75);
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(parse_unsigned("42"), 42);
        assert_eq!(parse_unsigned("12/3/4"), 12);
        assert_eq!(parse_unsigned("abc"), 0);
        assert_eq!(parse_unsigned("99999999999"), u32::MAX);
    }
}
