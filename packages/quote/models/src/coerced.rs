//! Tagged results for form values that may have been substituted.
//!
//! The quote form never rejects input; unusable values degrade to a safe
//! default. [`Coerced`] keeps track of whether a value was actually typed
//! or filled in, so "the user entered 0" and "the field was empty" stay
//! distinguishable.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Why a value was substituted instead of taken from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DefaultReason {
    /// The field was absent or blank.
    Missing,
    /// The field did not contain a number.
    Unparseable,
    /// The field parsed to NaN or infinity.
    NonFinite,
    /// The field was negative where only non-negative values are allowed.
    Negative,
    /// The value was derived from the kilometre field.
    ConvertedFromKilometers,
}

/// A value taken from the input, or a default with the reason it was used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coerced<T> {
    /// The input held a usable value.
    Valid(T),
    /// The input was unusable and `value` was substituted.
    Defaulted {
        /// The substituted value.
        value: T,
        /// Why the input was not used.
        reason: DefaultReason,
    },
}

impl<T: Copy> Coerced<T> {
    /// The effective value regardless of provenance.
    #[must_use]
    pub const fn value(&self) -> T {
        match self {
            Self::Valid(value) | Self::Defaulted { value, .. } => *value,
        }
    }
}

impl<T> Coerced<T> {
    /// Whether the value was substituted.
    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }

    /// The substitution reason, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<DefaultReason> {
        match self {
            Self::Valid(_) => None,
            Self::Defaulted { reason, .. } => Some(*reason),
        }
    }

    /// Maps the contained value, keeping its provenance.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Coerced<U> {
        match self {
            Self::Valid(value) => Coerced::Valid(f(value)),
            Self::Defaulted { value, reason } => Coerced::Defaulted {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_zero_differs_from_missing() {
        let typed: Coerced<f64> = Coerced::Valid(0.0);
        let missing = Coerced::Defaulted {
            value: 0.0,
            reason: DefaultReason::Missing,
        };
        assert!((typed.value() - missing.value()).abs() < f64::EPSILON);
        assert_ne!(typed, missing);
        assert!(!typed.is_defaulted());
        assert_eq!(missing.reason(), Some(DefaultReason::Missing));
    }

    #[test]
    fn map_keeps_reason() {
        let km: Coerced<f64> = Coerced::Defaulted {
            value: 100.0,
            reason: DefaultReason::ConvertedFromKilometers,
        };
        let doubled = km.map(|v| v * 2.0);
        assert_eq!(
            doubled.reason(),
            Some(DefaultReason::ConvertedFromKilometers)
        );
        assert!((doubled.value() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_provenance() {
        let value = serde_json::to_value(Coerced::<f64>::Defaulted {
            value: 0.0,
            reason: DefaultReason::Unparseable,
        })
        .unwrap();
        assert_eq!(value["defaulted"]["reason"], "unparseable");
        let valid = serde_json::to_value(Coerced::Valid(36.0)).unwrap();
        assert_eq!(valid["valid"], 36.0);
    }
}
