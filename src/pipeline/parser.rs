//! Token to sample conversion
//!
//! Anything that is not a finite decimal number is dropped here and never
//! reaches the window. This is the normal path for line noise, boot banners
//! and half-written lines after a reconnect, so it is neither logged nor
//! reported as an error.

use crate::types::Sample;

/// Parse one token as a base-10 floating point reading
///
/// Accepts an optional sign, digits with an optional fraction and an optional
/// exponent, and nothing else: surrounding whitespace makes the token
/// malformed. Streams with CRLF line endings need a `"\r\n"` delimiter.
/// Returns `None` for empty input, invalid UTF-8, non-numeric text and values
/// that overflow to infinity.
pub fn parse_sample(token: &[u8]) -> Option<Sample> {
    let text = std::str::from_utf8(token).ok()?;
    if !is_decimal_literal(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
///
/// `str::parse::<f64>` also accepts `inf`, `NaN` and `infinity`, which are not
/// readings.
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_sample(b"12.5"), Some(12.5));
        assert_eq!(parse_sample(b"7"), Some(7.0));
        assert_eq!(parse_sample(b"-3"), Some(-3.0));
        assert_eq!(parse_sample(b"+0.25"), Some(0.25));
        assert_eq!(parse_sample(b".5"), Some(0.5));
        assert_eq!(parse_sample(b"5."), Some(5.0));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parse_sample(b"1e3"), Some(1000.0));
        assert_eq!(parse_sample(b"2.5E-2"), Some(0.025));
        assert_eq!(parse_sample(b"-1e+2"), Some(-100.0));
        assert_eq!(parse_sample(b"1e"), None);
        assert_eq!(parse_sample(b"1e+"), None);
    }

    #[test]
    fn test_malformed_tokens_dropped() {
        assert_eq!(parse_sample(b""), None);
        assert_eq!(parse_sample(b"abc"), None);
        assert_eq!(parse_sample(b"."), None);
        assert_eq!(parse_sample(b"-"), None);
        assert_eq!(parse_sample(b"1.2.3"), None);
        assert_eq!(parse_sample(b"12,5"), None);
        assert_eq!(parse_sample(b"0x10"), None);
        assert_eq!(parse_sample(&[0xff, 0xfe]), None);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(parse_sample(b"inf"), None);
        assert_eq!(parse_sample(b"-infinity"), None);
        assert_eq!(parse_sample(b"NaN"), None);
        assert_eq!(parse_sample(b"1e400"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_malformed() {
        assert_eq!(parse_sample(b"3.0\r"), None);
        assert_eq!(parse_sample(b" 42 "), None);
        assert_eq!(parse_sample(b"\t7"), None);
        assert_eq!(parse_sample(b" 2"), None);
        assert_eq!(parse_sample(b"4 2"), None);
        assert_eq!(parse_sample(b"   "), None);
    }
}
