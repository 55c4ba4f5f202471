//! Literal rendering: escaping, digit grouping, and constant formatting.
//!
//! These rules are part of the canonical contract and never vary: strings and characters
//! escape a fixed control-character table, numeric literals group digits with `_` every
//! three positions — but only in an integer part of five or more digits, never in the
//! fractional part, and the sign never counts toward the digit count.

use std::fmt::Write as _;

use crate::metadata::constants::ConstantValue;

/// Minimum number of integer digits before grouping separators appear.
const GROUPING_THRESHOLD: usize = 5;

/// Escape one character for a `'…'` or `"…"` literal.
///
/// The fixed table covers NUL, bell, backspace, tab, LF, VT, FF, CR, the quote character
/// of the literal kind, and backslash; every other C0 control code escapes as `\uXXXX`;
/// printable characters pass through.
fn escape_into(out: &mut String, c: char, quote: char) {
    match c {
        '\0' => out.push_str("\\0"),
        '\u{0007}' => out.push_str("\\a"),
        '\u{0008}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{000B}' => out.push_str("\\v"),
        '\u{000C}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if (c as u32) < 0x20 => {
            write!(out, "\\u{:04x}", c as u32).ok();
        }
        c => out.push(c),
    }
}

/// Render a string literal, quotes included.
#[must_use]
pub fn format_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        escape_into(&mut out, c, '"');
    }
    out.push('"');
    out
}

/// Render a character literal, quotes included.
#[must_use]
pub fn format_char_literal(value: char) -> String {
    let mut out = String::with_capacity(4);
    out.push('\'');
    escape_into(&mut out, value, '\'');
    out.push('\'');
    out
}

/// Insert grouping separators into a plain digit run.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (index, c) in digits.char_indices() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push('_');
        }
        out.push(c);
    }
    out
}

/// Apply the grouping rule to a displayed number.
///
/// Accepts an optional leading `-`, an integer part, and an optional fractional part;
/// anything non-numeric (`NaN`, exponent forms) passes through untouched.
#[must_use]
pub fn group_number(display: &str) -> String {
    let (sign, unsigned) = match display.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", display),
    };

    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((integer_part, fraction)) => (integer_part, Some(fraction)),
        None => (unsigned, None),
    };

    if !integer_part.bytes().all(|b| b.is_ascii_digit()) || integer_part.is_empty() {
        return display.to_string();
    }

    let grouped = if integer_part.len() >= GROUPING_THRESHOLD {
        group_digits(integer_part)
    } else {
        integer_part.to_string()
    };

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Render a signed integer with grouping.
#[must_use]
pub fn format_signed(value: i128) -> String {
    group_number(&value.to_string())
}

/// Render an unsigned integer with grouping.
#[must_use]
pub fn format_unsigned(value: u128) -> String {
    group_number(&value.to_string())
}

/// Render a 32-bit float literal (`f` suffix; named forms for non-finite values).
#[must_use]
pub fn format_f32(value: f32) -> String {
    if value.is_nan() {
        "float.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "float.PositiveInfinity".to_string()
        } else {
            "float.NegativeInfinity".to_string()
        }
    } else {
        format!("{}f", group_number(&value.to_string()))
    }
}

/// Render a 64-bit float literal (named forms for non-finite values).
#[must_use]
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        "double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "double.PositiveInfinity".to_string()
        } else {
            "double.NegativeInfinity".to_string()
        }
    } else {
        group_number(&value.to_string())
    }
}

/// Render a constant as literal text.
#[must_use]
pub fn format_constant(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Boolean(true) => "true".to_string(),
        ConstantValue::Boolean(false) => "false".to_string(),
        ConstantValue::Char(c) => format_char_literal(*c),
        ConstantValue::I1(v) => format_signed(i128::from(*v)),
        ConstantValue::U1(v) => format_unsigned(u128::from(*v)),
        ConstantValue::I2(v) => format_signed(i128::from(*v)),
        ConstantValue::U2(v) => format_unsigned(u128::from(*v)),
        ConstantValue::I4(v) => format_signed(i128::from(*v)),
        ConstantValue::U4(v) => format_unsigned(u128::from(*v)),
        ConstantValue::I8(v) => format_signed(i128::from(*v)),
        ConstantValue::U8(v) => format_unsigned(u128::from(*v)),
        ConstantValue::R4(v) => format_f32(*v),
        ConstantValue::R8(v) => format_f64(*v),
        ConstantValue::String(s) => format_string_literal(s),
        ConstantValue::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_threshold() {
        assert_eq!(group_number("1000"), "1000");
        assert_eq!(group_number("9999"), "9999");
        assert_eq!(group_number("10000"), "10_000");
        assert_eq!(group_number("1000000"), "1_000_000");
    }

    #[test]
    fn test_sign_does_not_count_toward_digits() {
        assert_eq!(group_number("-1000"), "-1000");
        assert_eq!(group_number("-10000"), "-10_000");
        assert_eq!(group_number("-100000.1"), "-100_000.1");
    }

    #[test]
    fn test_fraction_is_never_grouped() {
        assert_eq!(group_number("1000000.1"), "1_000_000.1");
        assert_eq!(group_number("1.1234567"), "1.1234567");
        assert_eq!(group_number("1234.56789"), "1234.56789");
    }

    #[test]
    fn test_non_numeric_displays_pass_through() {
        assert_eq!(group_number("NaN"), "NaN");
        assert_eq!(group_number("1e10"), "1e10");
    }

    #[test]
    fn test_integer_constants() {
        assert_eq!(format_constant(&ConstantValue::I4(-100_000)), "-100_000");
        assert_eq!(format_constant(&ConstantValue::U8(u64::MAX)), "18_446_744_073_709_551_615");
        assert_eq!(format_constant(&ConstantValue::U1(255)), "255");
    }

    #[test]
    fn test_float_constants() {
        assert_eq!(format_constant(&ConstantValue::R4(1.5)), "1.5f");
        assert_eq!(format_constant(&ConstantValue::R8(1_000_000.1)), "1_000_000.1");
        assert_eq!(format_constant(&ConstantValue::R4(f32::NAN)), "float.NaN");
        assert_eq!(
            format_constant(&ConstantValue::R8(f64::NEG_INFINITY)),
            "double.NegativeInfinity"
        );
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            format_string_literal("line1\nline2\t\"x\"\\"),
            "\"line1\\nline2\\t\\\"x\\\"\\\\\""
        );
        assert_eq!(format_string_literal("\0\u{7}\u{8}\u{b}\u{c}\r"), "\"\\0\\a\\b\\v\\f\\r\"");
        // Remaining C0 codes use the four-digit form; printable text passes through.
        assert_eq!(format_string_literal("\u{1}ok\u{1f}"), "\"\\u0001ok\\u001f\"");
    }

    #[test]
    fn test_char_escaping_uses_its_own_quote() {
        assert_eq!(format_char_literal('\''), "'\\''");
        assert_eq!(format_char_literal('"'), "'\"'");
        assert_eq!(format_char_literal('A'), "'A'");
        assert_eq!(format_char_literal('\n'), "'\\n'");
    }

    #[test]
    fn test_bool_and_null() {
        assert_eq!(format_constant(&ConstantValue::Boolean(true)), "true");
        assert_eq!(format_constant(&ConstantValue::Null), "null");
    }
}
