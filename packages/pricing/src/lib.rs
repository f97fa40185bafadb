#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quote price composition.
//!
//! The price of a charter is `distance_km × tariff_per_km`, plus or minus a
//! flat adjustment, plus commissions. Every commission is a percentage of
//! the subtotal; the adjustment never feeds into a commission base.
//!
//! The free functions are total over any `f64` input: non-finite or
//! negative distances and tariffs count as zero, so a half-filled form
//! yields zeros instead of `NaN`. [`price`] is the quote-level entry point
//! and refuses to compute until a tariff and a distance are present.

use charter_quote_models::money::format_brl;
use charter_quote_models::{
    Adjustment, CommissionComponent, CommissionLine, PricingResult, QuoteState,
};
use charter_quote_route::nm_to_km;
use serde::Serialize;
use thiserror::Error;

/// Preconditions that must hold before a quote is priced.
///
/// Checked in declaration order, so a quote missing both reports the
/// tariff first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    /// No positive tariff per kilometre.
    #[error("no tariff per km: select an aircraft or enter a tariff")]
    MissingTariff,
    /// No positive distance.
    #[error("no distance: enter NM or km, or fill in the airports")]
    MissingDistance,
}

/// Result of applying a list of commission percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommissionSummary {
    /// Sum of all line amounts.
    pub total: f64,
    /// One line per percentage, in input order.
    pub breakdown: Vec<CommissionLine>,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// `distance_km × tariff_per_km`, unrounded.
#[must_use]
pub fn subtotal(distance_km: f64, tariff_per_km: f64) -> f64 {
    non_negative(distance_km) * non_negative(tariff_per_km)
}

/// Subtotal with a signed adjustment applied.
///
/// The caller resolves the sign from the adjustment kind. A non-finite
/// adjustment counts as zero.
#[must_use]
pub fn total(distance_km: f64, tariff_per_km: f64, signed_adjustment: f64) -> f64 {
    let adjustment = if signed_adjustment.is_finite() {
        signed_adjustment
    } else {
        0.0
    };
    subtotal(distance_km, tariff_per_km) + adjustment
}

/// Applies each percentage to `subtotal`.
///
/// Non-finite percentages produce a zero line rather than poisoning the
/// total.
#[must_use]
pub fn commission(subtotal: f64, percentages: &[f64]) -> CommissionSummary {
    let base = non_negative(subtotal);
    let breakdown: Vec<CommissionLine> = percentages
        .iter()
        .map(|&percent| {
            let amount = if percent.is_finite() {
                base * (percent / 100.0)
            } else {
                0.0
            };
            CommissionLine { percent, amount }
        })
        .collect();
    let total = breakdown.iter().map(|line| line.amount).sum();

    CommissionSummary { total, breakdown }
}

/// Amount from the toggled commission component against `base`.
///
/// Zero when the component is off or its percentage is not positive.
#[must_use]
pub fn commission_component(base: f64, component: &CommissionComponent) -> f64 {
    if !component.enabled || !usable(component.percent) {
        return 0.0;
    }
    non_negative(base) * (component.percent / 100.0)
}

/// Display label for an adjustment, e.g. `+ R$ 500,00`.
///
/// Empty when the amount is zero.
#[must_use]
pub fn adjustment_label(adjustment: &Adjustment) -> String {
    let amount = non_negative(adjustment.amount.value());
    if amount <= 0.0 {
        return String::new();
    }
    format!("{} {}", adjustment.kind.symbol(), format_brl(amount))
}

/// Prices a quote snapshot.
///
/// The state's distance is in nautical miles and is converted to
/// kilometres first. The subtotal is computed once and serves as the base
/// for both the percentage list and the toggled component.
///
/// # Errors
///
/// * [`PricingError::MissingTariff`] if the tariff is not positive
/// * [`PricingError::MissingDistance`] if the distance is not positive
pub fn price(state: &QuoteState) -> Result<PricingResult, PricingError> {
    let tariff = state.tariff_per_km.value();
    if !usable(tariff) {
        return Err(PricingError::MissingTariff);
    }
    let distance_nm = state.distance_nm.value();
    if !usable(distance_nm) {
        return Err(PricingError::MissingDistance);
    }

    let distance_km = nm_to_km(distance_nm);
    let base = subtotal(distance_km, tariff);
    let signed_adjustment = state.adjustment.signed();
    let commissions = commission(base, &state.commission_percentages);
    let component = commission_component(base, &state.commission_component);
    let total = total(distance_km, tariff, signed_adjustment) + commissions.total + component;

    log::debug!(
        "Priced {distance_km:.1} km at {tariff}/km: subtotal={base:.2} adjustment={signed_adjustment:.2} commissions={:.2} component={component:.2} total={total:.2}",
        commissions.total
    );

    Ok(PricingResult {
        distance_km,
        subtotal: base,
        signed_adjustment,
        adjustment_label: adjustment_label(&state.adjustment),
        commission_breakdown: commissions.breakdown,
        commission_total: commissions.total,
        commission_component_amount: component,
        total,
    })
}
