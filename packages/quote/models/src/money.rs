//! Rounding and Brazilian-real formatting for quote amounts.

/// Rounds `value` to `places` decimal places (half away from zero).
///
/// Non-finite input is returned unchanged, and so is a value too large to
/// scale without overflowing (it has no fractional digits left to round).
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Formats a number with `.` thousands separators and a `,` decimal
/// separator, e.g. `36000.5` → `36.000,50`.
#[must_use]
pub fn format_decimal_br(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), ""), |(i, f)| (i, f));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}

/// Formats an amount as Brazilian reais, e.g. `R$ 36.000,00`.
#[must_use]
pub fn format_brl(value: f64) -> String {
    let digits = format_decimal_br(value, 2);
    digits
        .strip_prefix('-')
        .map_or_else(|| format!("R$ {digits}"), |rest| format!("-R$ {rest}"))
}
