//! Field-level coercion from raw form text.
//!
//! Nothing here fails. Unusable input becomes a default and, for numbers,
//! the default carries a [`DefaultReason`].

use charter_quote_models::{Coerced, DefaultReason};

/// Parses a non-negative number from form text.
///
/// Leading and trailing whitespace is ignored and a comma is accepted as
/// the decimal separator. Blank input, text that is not a number, `NaN`,
/// infinities and negative values all become `0` with the matching
/// reason. A typed `0` stays [`Coerced::Valid`].
#[must_use]
pub fn number(raw: Option<&str>) -> Coerced<f64> {
    let defaulted = |reason| Coerced::Defaulted { value: 0.0, reason };

    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return defaulted(DefaultReason::Missing);
    };

    let Ok(value) = raw.replacen(',', ".", 1).parse::<f64>() else {
        return defaulted(DefaultReason::Unparseable);
    };

    if !value.is_finite() {
        defaulted(DefaultReason::NonFinite)
    } else if value < 0.0 {
        defaulted(DefaultReason::Negative)
    } else {
        Coerced::Valid(value)
    }
}

/// Whether `raw` holds a strictly positive number.
#[must_use]
pub fn positive(raw: Option<&str>) -> Option<f64> {
    match number(raw) {
        Coerced::Valid(value) if value > 0.0 => Some(value),
        _ => None,
    }
}

/// Free text; a missing field is an empty string.
#[must_use]
pub fn text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

/// Airport code text: trimmed and upper-cased, not validated.
#[must_use]
pub fn code(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_uppercase()
}

/// Checkbox state; a missing checkbox is unchecked.
#[must_use]
pub fn flag(raw: Option<bool>) -> bool {
    raw.unwrap_or(false)
}
