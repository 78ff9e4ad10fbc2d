//! Display formatting shared by the input and the rate list.

/// Insert `,` between groups of three integer digits (`1000000` → `1,000,000`).
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Value of `amount` in the paired currency: `amount × ask`, two decimals,
/// with thousands separators. An empty amount renders as `0.00`.
pub fn converted_value(amount: &str, ask: &str) -> String {
    if amount.trim().is_empty() {
        return String::from("0.00");
    }

    let value = parse_float(amount) * parse_float(ask);
    if value.is_finite() {
        format_money(value)
    } else {
        String::from("NaN")
    }
}

/// Two-decimal rendering with thousands separators (`1234.5` → `1,234.50`).
pub fn format_money(value: f64) -> String {
    let fixed = to_fixed(value.abs(), 2);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{fraction}", group_digits(integer))
}

/// Parse the longest numeric prefix of `text` after leading whitespace.
///
/// `"12abc"` parses as `12`, `"1e5x"` as `100000`. Text without a numeric
/// prefix yields NaN.
pub fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - integer_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(bytes, end + 1);
        mantissa_digits += fraction_end - (end + 1);
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_end = skip_digits(bytes, exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Render `value` with exactly `digits` fractional digits.
///
/// Rounds the exact binary value half away from zero, so `0.125` becomes
/// `0.13` while `1.005` (stored just below) becomes `1.00`. Magnitudes from
/// `1e21` upward use exponent notation (`1e+21`).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }
    if value.abs() >= 1e21 {
        let exponent = format!("{value:e}");
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exponent,
        };
    }

    // Every finite f64 has at most 1074 fractional digits, so this is exact.
    let exact = format!("{:.1074}", value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = &fraction[..digits.min(fraction.len())];

    let mut number = Vec::with_capacity(integer.len() + kept.len() + 1);
    number.extend_from_slice(integer.as_bytes());
    number.extend_from_slice(kept.as_bytes());
    number.resize(integer.len() + digits, b'0');
    if fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        round_up(&mut number);
    }

    let split = number.len() - digits;
    let mut fixed = String::with_capacity(number.len() + 2);
    if value < 0.0 {
        fixed.push('-');
    }
    fixed.push_str(&String::from_utf8_lossy(&number[..split]));
    if digits > 0 {
        fixed.push('.');
        fixed.push_str(&String::from_utf8_lossy(&number[split..]));
    }
    fixed
}

/// Icon text shown when a currency has no artwork: its first two letters.
pub fn fallback_icon(code: &str) -> String {
    code.chars().take(2).collect::<String>().to_ascii_uppercase()
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_000_000_000), "1,000,000,000");
    }

    #[test]
    fn converts_amount_with_ask() {
        assert_eq!(converted_value("50", "1.080000"), "54.00");
        assert_eq!(converted_value("100", "40000.00"), "4,000,000.00");
        assert_eq!(converted_value("1", "0.000024"), "0.00");
        assert_eq!(converted_value("2.5", "1234.2"), "3,085.50");
    }

    #[test]
    fn empty_amount_is_zero() {
        assert_eq!(converted_value("", "1.08"), "0.00");
    }

    #[test]
    fn unparseable_ask_is_nan() {
        assert_eq!(converted_value("10", "NaN"), "NaN");
        assert_eq!(converted_value(".", "1.0"), "NaN");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(converted_value("1", "0.125"), "0.13");
        assert_eq!(to_fixed(0.0078125, 6), "0.007813");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(99.5, 0), "100");
    }

    #[test]
    fn fixed_rendering_uses_exact_binary_value() {
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.000024, 6), "0.000024");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-Infinity");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn parses_longest_numeric_prefix() {
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("  -1.5e3x"), -1500.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("NaN").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn money_keeps_sign() {
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn fallback_icon_uses_first_two_letters() {
        assert_eq!(fallback_icon("EUR"), "EU");
        assert_eq!(fallback_icon("x"), "X");
    }
}
