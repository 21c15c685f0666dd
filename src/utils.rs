//! Lenient number parsing and display formatting for raw form input.
//!
//! Form fields hold whatever the user typed. These helpers turn that text into
//! numbers at submit time without ever failing: text with no numeric prefix
//! becomes `f64::NAN`, which is handed to the wallet layer as-is.

/// Parse the longest decimal prefix of `input`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12abc"`
/// parses to `12.0`. Returns `f64::NAN` when no digits can be read.
pub fn parse_decimal(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut out = String::with_capacity(s.len() + 1);

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            if sign == b'-' {
                out.push('-');
            }
            pos += 1;
        }
    }

    if s[pos..].starts_with("Infinity") {
        return if out.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows it
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            out.push_str(&s[pos..end]);
        }
    }

    out.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the leading base-10 integer of `input`.
///
/// `"6.9"` parses to `6.0` and `"42 tokens"` to `42.0`. Returns `f64::NAN`
/// when no digits can be read. The result is always integral or NaN.
pub fn parse_integer(input: &str) -> f64 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return f64::NAN;
    }

    match digits.parse::<f64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => f64::NAN,
    }
}

/// Display a number the way a script runtime would: `NaN`, `Infinity`, the
/// shortest round-trip decimal (`1`, `0.5`, `123.456`), or exponent form below
/// 1e-6 and from 1e21 up (`1e-7`, `1.5e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() < EXPONENT_BELOW || value.abs() >= EXPONENT_FROM {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", value)
    }
}

const EXPONENT_BELOW: f64 = 1e-6;
const EXPONENT_FROM: f64 = 1e21;

/// Enough fractional digits to print any f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format with a fixed number of decimals (`2.5` at 3 -> `"2.500"`).
///
/// Exact halfway values round away from zero (`0.125` at 2 -> `"0.13"`).
/// Values from 1e21 up fall back to [`format_number`].
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_FROM {
        return format_number(value);
    }
    // -0 prints without a sign
    let value = if value == 0.0 { 0.0 } else { value };

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    if decimals >= frac_part.len() {
        return format!("{:.*}", decimals, value);
    }
    let rest = &frac_part[decimals..];
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", decimals, value);
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..decimals].bytes())
        .collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&d| d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&d| d as char));
    }
    out
}

/// Shorten a mint identifier to its first 3 and last 2 characters.
pub fn shorten_mint(mint: &str) -> String {
    let chars: Vec<char> = mint.chars().collect();
    let head: String = chars.iter().take(3).collect();
    let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_decimal tests ====================

    #[test]
    fn test_parse_decimal_plain() {
        assert_eq!(parse_decimal("1.5"), 1.5);
        assert_eq!(parse_decimal("42"), 42.0);
    }

    #[test]
    fn test_parse_decimal_empty_is_nan() {
        assert!(parse_decimal("").is_nan());
        assert!(parse_decimal("   ").is_nan());
    }

    #[test]
    fn test_parse_decimal_garbage_is_nan() {
        assert!(parse_decimal("abc").is_nan());
        assert!(parse_decimal(".").is_nan());
        assert!(parse_decimal("-").is_nan());
    }

    #[test]
    fn test_parse_decimal_trailing_garbage_uses_prefix() {
        assert_eq!(parse_decimal("12abc"), 12.0);
        assert_eq!(parse_decimal("0.25 SOL"), 0.25);
        assert_eq!(parse_decimal("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_decimal_leading_whitespace_and_sign() {
        assert_eq!(parse_decimal("  -3.5"), -3.5);
        assert_eq!(parse_decimal("+7"), 7.0);
    }

    #[test]
    fn test_parse_decimal_partial_forms() {
        assert_eq!(parse_decimal(".5"), 0.5);
        assert_eq!(parse_decimal("5."), 5.0);
    }

    #[test]
    fn test_parse_decimal_exponent() {
        assert_eq!(parse_decimal("1e3"), 1000.0);
        assert_eq!(parse_decimal("2.5E-1"), 0.25);
        // Dangling exponent marker is ignored
        assert_eq!(parse_decimal("4e"), 4.0);
        assert_eq!(parse_decimal("4e+"), 4.0);
    }

    #[test]
    fn test_parse_decimal_infinity() {
        assert_eq!(parse_decimal("Infinity"), f64::INFINITY);
        assert_eq!(parse_decimal("-Infinity"), f64::NEG_INFINITY);
    }

    // ==================== parse_integer tests ====================

    #[test]
    fn test_parse_integer_plain() {
        assert_eq!(parse_integer("9"), 9.0);
        assert_eq!(parse_integer("-12"), -12.0);
    }

    #[test]
    fn test_parse_integer_truncates_fraction() {
        assert_eq!(parse_integer("6.9"), 6.0);
    }

    #[test]
    fn test_parse_integer_trailing_garbage() {
        assert_eq!(parse_integer(" 1000 tokens"), 1000.0);
    }

    #[test]
    fn test_parse_integer_nan_cases() {
        assert!(parse_integer("").is_nan());
        assert!(parse_integer("abc").is_nan());
        assert!(parse_integer(".5").is_nan());
        assert!(parse_integer("-").is_nan());
    }

    // ==================== formatting tests ====================

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_format_number_exponent_range() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(123456789012345680000.0), "123456789012345680000");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(2.5, 3), "2.500");
        assert_eq!(to_fixed(12.0, 2), "12.00");
        assert_eq!(to_fixed(1.23456, 3), "1.235");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_to_fixed_exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_to_fixed_inexact_values_keep_nearest() {
        // 1.005 is stored just below the halfway point
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.1, 20), "0.10000000000000000555");
        assert_eq!(to_fixed(-0.0, 3), "0.000");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }

    #[test]
    fn test_shorten_mint() {
        assert_eq!(
            shorten_mint("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            "EPj...1v"
        );
    }

    #[test]
    fn test_shorten_mint_short_input() {
        assert_eq!(shorten_mint("abcd"), "abc...cd");
        assert_eq!(shorten_mint("a"), "a...a");
        assert_eq!(shorten_mint(""), "...");
    }
}
