#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data model for charter flight quotes.
//!
//! These types flow through the whole quote pipeline: airport codes are
//! resolved to [`Point`]s, the form is captured as an immutable
//! [`QuoteState`] snapshot, and pricing produces a [`PricingResult`] that
//! the summary renderer turns into a document.

pub mod coerced;
pub mod money;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use coerced::{Coerced, DefaultReason};

/// A geographic point (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Point {
    /// Creates a point, returning `None` if either coordinate is not a
    /// finite number.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        (lat.is_finite() && lng.is_finite()).then_some(Self { lat, lng })
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Length of an ICAO airport code.
pub const AIRPORT_CODE_LEN: usize = 4;

/// A validated four-letter ICAO airport code, always upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Normalizes `raw` to upper-case and validates it.
    ///
    /// Returns `None` unless the trimmed input is exactly four ASCII
    /// letters.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.trim().to_ascii_uppercase();
        (code.len() == AIRPORT_CODE_LEN && code.bytes().all(|b| b.is_ascii_uppercase()))
            .then_some(Self(code))
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a valid ICAO airport code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAirportCode {
    /// The rejected input.
    pub input: String,
}

impl std::fmt::Display for InvalidAirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid airport code {:?}: expected four letters",
            self.input
        )
    }
}

impl std::error::Error for InvalidAirportCode {}

impl FromStr for AirportCode {
    type Err = InvalidAirportCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidAirportCode {
            input: s.to_string(),
        })
    }
}

impl TryFrom<String> for AirportCode {
    type Error = InvalidAirportCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AirportCode> for String {
    fn from(value: AirportCode) -> Self {
        value.0
    }
}

/// Cleans free-typed airport field input the way the code fields do while
/// the user types: letters only, upper-case, at most four characters.
#[must_use]
pub fn sanitize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .take(AIRPORT_CODE_LEN)
        .collect()
}

/// Whether the flat adjustment is a surcharge or a discount.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum AdjustmentKind {
    /// Surcharge added to the subtotal.
    #[default]
    #[serde(alias = "soma")]
    #[strum(to_string = "add", serialize = "soma")]
    Add,
    /// Discount subtracted from the subtotal.
    #[serde(alias = "subtrai")]
    #[strum(to_string = "subtract", serialize = "subtrai")]
    Subtract,
}

impl AdjustmentKind {
    /// `1.0` for [`Self::Add`], `-1.0` for [`Self::Subtract`].
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Add => 1.0,
            Self::Subtract => -1.0,
        }
    }

    /// Prefix used when the adjustment is shown next to an amount.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

/// A flat surcharge or discount applied to the subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    /// Surcharge or discount.
    pub kind: AdjustmentKind,
    /// Non-negative amount.
    pub amount: Coerced<f64>,
}

impl Adjustment {
    /// The amount with the sign implied by [`Self::kind`].
    #[must_use]
    pub fn signed(&self) -> f64 {
        self.kind.sign() * self.amount.value().max(0.0)
    }
}

impl Default for Adjustment {
    fn default() -> Self {
        Self {
            kind: AdjustmentKind::Add,
            amount: Coerced::Defaulted {
                value: 0.0,
                reason: DefaultReason::Missing,
            },
        }
    }
}

/// Default percentage offered by the toggled commission component.
pub const DEFAULT_COMMISSION_COMPONENT_PERCENT: f64 = 5.0;

/// The separately toggled, single-percentage commission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionComponent {
    /// Whether the component is switched on.
    pub enabled: bool,
    /// Percentage of the subtotal.
    pub percent: f64,
}

impl Default for CommissionComponent {
    fn default() -> Self {
        Self {
            enabled: false,
            percent: DEFAULT_COMMISSION_COMPONENT_PERCENT,
        }
    }
}

/// Which sections appear in the rendered summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Visibility {
    /// Route line (origin, stops, destination).
    pub route: bool,
    /// Aircraft label.
    pub aircraft: bool,
    /// Tariff per kilometre.
    pub tariff: bool,
    /// Distance in NM and km.
    pub distance: bool,
    /// Outbound and return dates.
    pub dates: bool,
    /// Adjustment row in the pricing table.
    pub adjustment: bool,
    /// Commission rows in the pricing table.
    pub commission: bool,
    /// Free-text notes.
    pub notes: bool,
    /// Payment instructions.
    pub payment: bool,
    /// Route map (refreshes the route before export).
    pub map: bool,
}

impl Visibility {
    /// Every section visible.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            route: true,
            aircraft: true,
            tariff: true,
            distance: true,
            dates: true,
            adjustment: true,
            commission: true,
            notes: true,
            payment: true,
            map: true,
        }
    }
}

/// Immutable snapshot of the quote form.
///
/// Rebuilt from scratch on every recompute; nothing mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteState {
    /// Aircraft label (e.g. "Phenom 100").
    pub aircraft: String,
    /// Route distance in nautical miles, rounded to two decimals.
    pub distance_nm: Coerced<f64>,
    /// Price per kilometre.
    pub tariff_per_km: Coerced<f64>,
    /// Origin airport code (upper-case, possibly empty or invalid).
    pub origin: String,
    /// Destination airport code.
    pub destination: String,
    /// Intermediate stop codes in flight order, blanks removed.
    pub stops: Vec<String>,
    /// Outbound date text (ISO `YYYY-MM-DD` when set from a date field).
    pub outbound_date: String,
    /// Return date text, never before `outbound_date` once both are set.
    pub return_date: String,
    /// Flat surcharge or discount.
    pub adjustment: Adjustment,
    /// Free-text notes.
    pub notes: String,
    /// Payment instructions.
    pub payment: String,
    /// Commission percentages, each applied to the subtotal.
    pub commission_percentages: Vec<f64>,
    /// The separately toggled commission.
    pub commission_component: CommissionComponent,
    /// Which sections the summary shows.
    pub visibility: Visibility,
}

impl QuoteState {
    /// Route codes in flight order: origin, stops, destination. Blank
    /// entries are skipped.
    #[must_use]
    pub fn route_codes(&self) -> Vec<&str> {
        std::iter::once(self.origin.as_str())
            .chain(self.stops.iter().map(String::as_str))
            .chain(std::iter::once(self.destination.as_str()))
            .filter(|code| !code.trim().is_empty())
            .collect()
    }
}

impl Default for QuoteState {
    fn default() -> Self {
        Self {
            aircraft: String::new(),
            distance_nm: Coerced::Defaulted {
                value: 0.0,
                reason: DefaultReason::Missing,
            },
            tariff_per_km: Coerced::Defaulted {
                value: 0.0,
                reason: DefaultReason::Missing,
            },
            origin: String::new(),
            destination: String::new(),
            stops: Vec::new(),
            outbound_date: String::new(),
            return_date: String::new(),
            adjustment: Adjustment::default(),
            notes: String::new(),
            payment: String::new(),
            commission_percentages: Vec::new(),
            commission_component: CommissionComponent::default(),
            visibility: Visibility::default(),
        }
    }
}

/// One commission percentage and the amount it yields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionLine {
    /// Percentage of the subtotal.
    pub percent: f64,
    /// Computed amount.
    pub amount: f64,
}

/// Derived pricing figures for a [`QuoteState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Route distance in kilometres.
    pub distance_km: f64,
    /// `distance_km × tariff_per_km`.
    pub subtotal: f64,
    /// Adjustment with its sign applied.
    pub signed_adjustment: f64,
    /// Display label for the adjustment (empty when there is none).
    pub adjustment_label: String,
    /// One line per commission percentage.
    pub commission_breakdown: Vec<CommissionLine>,
    /// Sum of `commission_breakdown` amounts.
    pub commission_total: f64,
    /// Amount from the toggled commission component.
    pub commission_component_amount: f64,
    /// Grand total.
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_rejects_non_finite() {
        assert!(Point::new(f64::NAN, 1.0).is_none());
        assert!(Point::new(1.0, f64::INFINITY).is_none());
        assert_eq!(
            Point::new(-23.5, -46.6),
            Some(Point {
                lat: -23.5,
                lng: -46.6
            })
        );
    }

    #[test]
    fn airport_code_normalizes_case() {
        let code = AirportCode::parse(" sbsp ").unwrap();
        assert_eq!(code.as_str(), "SBSP");
    }

    #[test]
    fn airport_code_rejects_bad_input() {
        for raw in ["", "SBS", "SBSPX", "SB1P", "SB P", "ÉBSP"] {
            assert!(AirportCode::parse(raw).is_none(), "accepted {raw:?}");
        }
        assert!("KJF".parse::<AirportCode>().is_err());
    }

    #[test]
    fn airport_code_serde_validates() {
        let code: AirportCode = serde_json::from_str("\"sbgr\"").unwrap();
        assert_eq!(code.as_str(), "SBGR");
        assert!(serde_json::from_str::<AirportCode>("\"12AB\"").is_err());
    }

    #[test]
    fn sanitizes_code_input() {
        assert_eq!(sanitize_code_input("sb-sp123x"), "SBSP");
        assert_eq!(sanitize_code_input("k1"), "K");
    }

    #[test]
    fn adjustment_kind_parses_legacy_names() {
        assert_eq!("soma".parse::<AdjustmentKind>(), Ok(AdjustmentKind::Add));
        assert_eq!(
            "SUBTRACT".parse::<AdjustmentKind>(),
            Ok(AdjustmentKind::Subtract)
        );
        assert_eq!(AdjustmentKind::Subtract.to_string(), "subtract");
    }

    #[test]
    fn signed_adjustment_follows_kind() {
        let discount = Adjustment {
            kind: AdjustmentKind::Subtract,
            amount: Coerced::Valid(250.0),
        };
        assert!((discount.signed() + 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn route_codes_follow_flight_order() {
        let state = QuoteState {
            origin: "SBSP".to_string(),
            destination: "SBRJ".to_string(),
            stops: vec!["SBKP".to_string(), " ".to_string()],
            ..QuoteState::default()
        };
        assert_eq!(state.route_codes(), vec!["SBSP", "SBKP", "SBRJ"]);
    }
}
