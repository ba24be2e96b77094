//! Money display and the loose number parsing used by the input forms.

const GROUP_SEPARATOR: char = '.';
const CURRENCY_SUFFIX: &str = "\u{a0}₫";

/// A value headed for the price column: either already numeric or raw text
/// straight out of an input box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for Amount<'_> {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<i64> for Amount<'_> {
    fn from(value: i64) -> Self {
        Amount::Number(value as f64)
    }
}

impl<'a> From<&'a str> for Amount<'a> {
    fn from(value: &'a str) -> Self {
        Amount::Text(value)
    }
}

impl<'a> From<&'a String> for Amount<'a> {
    fn from(value: &'a String) -> Self {
        Amount::Text(value.as_str())
    }
}

/// Formats an amount the way Vietnamese dong prices are printed: `100.000 ₫`.
///
/// Text is coerced like a JavaScript `Number(..)` call. Anything that does not
/// end up as a finite number renders as an empty string.
pub fn format_vnd<'a>(value: impl Into<Amount<'a>>) -> String {
    let number = match value.into() {
        Amount::Number(n) => Some(n),
        Amount::Text(text) => coerce_number(text),
    };

    match number {
        Some(n) if n.is_finite() => render_dong(n),
        _ => String::new(),
    }
}

fn render_dong(value: f64) -> String {
    // Dong has no minor unit; halves round away from zero.
    let rounded = value.round();
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}{}{}", sign, group_thousands(&digits), CURRENCY_SUFFIX)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

fn is_js_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

/// Strict whole-string coercion with JavaScript `Number(..)` rules.
///
/// Blank text is zero, `0x`/`0o`/`0b` prefixes select a radix, and any
/// trailing garbage makes the whole value invalid (`None`).
pub fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return parse_radix(rest, radix);
        }
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned.starts_with("Infinity") {
        return (unsigned == "Infinity" && trimmed.len() - unsigned.len() <= 1)
            .then(|| if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    // Rust also accepts "inf"/"nan" spellings that JavaScript rejects.
    if unsigned.chars().next().map_or(true, |c| !(c.is_ascii_digit() || c == '.')) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Lenient parsing with JavaScript `parseFloat(..)` rules: leading whitespace
/// is skipped and the longest numeric prefix wins, so `"12abc"` reads as `12`.
/// Returns `None` when no numeric prefix exists.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(is_js_whitespace);
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Text shown in a cost input when editing starts, e.g. `45000` or `12.5`.
pub fn cost_to_input(cost: f64) -> String {
    format!("{}", cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_shows_zero_dong() {
        assert_eq!(format_vnd(0.0), "0\u{a0}₫");
    }

    #[test]
    fn text_and_number_format_identically() {
        assert_eq!(format_vnd("100000"), format_vnd(100000.0));
        assert_eq!(format_vnd(100000_i64), "100.000\u{a0}₫");
    }

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_vnd(1234567.0), "1.234.567\u{a0}₫");
        assert_eq!(format_vnd(999.0), "999\u{a0}₫");
        assert_eq!(format_vnd(-45000.0), "-45.000\u{a0}₫");
    }

    #[test]
    fn drops_fraction_rounding_half_away_from_zero() {
        assert_eq!(format_vnd(12.5), "13\u{a0}₫");
        assert_eq!(format_vnd(12.4), "12\u{a0}₫");
        assert_eq!(format_vnd(-2.5), "-3\u{a0}₫");
    }

    #[test]
    fn unusable_values_render_empty() {
        assert_eq!(format_vnd("abc"), "");
        assert_eq!(format_vnd(f64::NAN), "");
        assert_eq!(format_vnd(f64::INFINITY), "");
        assert_eq!(format_vnd("Infinity"), "");
        assert_eq!(format_vnd("12abc"), "");
        assert_eq!(format_vnd("inf"), "");
    }

    #[test]
    fn blank_text_coerces_to_zero() {
        assert_eq!(coerce_number("   "), Some(0.0));
        assert_eq!(format_vnd(""), "0\u{a0}₫");
    }

    #[test]
    fn coercion_handles_radix_and_exponent() {
        assert_eq!(coerce_number("0x1A"), Some(26.0));
        assert_eq!(coerce_number("0b101"), Some(5.0));
        assert_eq!(coerce_number(" 1e3 "), Some(1000.0));
        assert_eq!(coerce_number("-.5"), Some(-0.5));
        assert_eq!(coerce_number("0x"), None);
        assert_eq!(coerce_number("nan"), None);
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn parse_float_takes_leading_numeric_prefix() {
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix("  3.5kg"), Some(3.5));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("2e3x"), Some(2000.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-7"), Some(-7.0));
    }

    #[test]
    fn parse_float_rejects_text_without_digits() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("   "), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
    }

    #[test]
    fn cost_input_text_is_shortest_form() {
        assert_eq!(cost_to_input(45000.0), "45000");
        assert_eq!(cost_to_input(12.5), "12.5");
    }
}
