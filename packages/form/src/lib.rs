#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quote form capture.
//!
//! [`FormInput`] holds the raw field values exactly as typed, and
//! [`QuoteStateBuilder`] turns them into a [`QuoteState`] snapshot. Building
//! never fails: every unusable value degrades to a default, and numeric
//! defaults record why through [`charter_quote_models::Coerced`].
//!
//! Field names follow the quote form. The Portuguese form element IDs
//! (`aeronave`, `tarifa`, `origem`, ...) are accepted as aliases when
//! deserializing.

pub mod coerce;
pub mod tariffs;

use charter_quote_models::money::round_to;
use charter_quote_models::{
    Adjustment, AdjustmentKind, Coerced, CommissionComponent, DEFAULT_COMMISSION_COMPONENT_PERCENT,
    DefaultReason, QuoteState, Visibility,
};
use charter_quote_route::{km_field_from_nm, km_to_nm, nm_field_from_km};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use tariffs::{
    AircraftTariff, DEFAULT_TARIFF_STORE_PATH, TariffStore, TariffStoreError, TariffTable,
};

/// Raw values of every quote form field.
///
/// `None` means the field is absent or untouched. Text fields also accept
/// JSON numbers, checkboxes also accept `"on"`/`"true"`-style text, and
/// values of any other shape are dropped, so deserializing a JSON object
/// never fails on a field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormInput {
    /// Selected aircraft label.
    #[serde(alias = "aeronave", deserialize_with = "text_or_number")]
    pub aircraft: Option<String>,
    /// Distance in nautical miles.
    #[serde(deserialize_with = "text_or_number")]
    pub nm: Option<String>,
    /// Distance in kilometres.
    #[serde(deserialize_with = "text_or_number")]
    pub km: Option<String>,
    /// Price per kilometre.
    #[serde(alias = "tarifa", deserialize_with = "text_or_number")]
    pub tariff: Option<String>,
    /// Origin airport code.
    #[serde(alias = "origem", deserialize_with = "text_or_number")]
    pub origin: Option<String>,
    /// Destination airport code.
    #[serde(alias = "destino", deserialize_with = "text_or_number")]
    pub destination: Option<String>,
    /// Intermediate stop codes in flight order.
    #[serde(deserialize_with = "texts_or_numbers")]
    pub stops: Vec<String>,
    /// Outbound date, `YYYY-MM-DD`.
    #[serde(alias = "dataIda", deserialize_with = "text_or_number")]
    pub outbound_date: Option<String>,
    /// Return date, `YYYY-MM-DD`.
    #[serde(alias = "dataVolta", deserialize_with = "text_or_number")]
    pub return_date: Option<String>,
    /// `add`/`subtract` (or `soma`/`subtrai`).
    #[serde(alias = "tipoExtra", deserialize_with = "text_or_number")]
    pub adjustment_kind: Option<String>,
    /// Flat adjustment amount.
    #[serde(alias = "valorExtra", deserialize_with = "text_or_number")]
    pub adjustment_amount: Option<String>,
    /// Free-text notes.
    #[serde(alias = "observacoes", deserialize_with = "text_or_number")]
    pub notes: Option<String>,
    /// Payment instructions.
    #[serde(alias = "pagamento", deserialize_with = "text_or_number")]
    pub payment: Option<String>,
    /// Commission percentage entries.
    #[serde(alias = "comissoes", deserialize_with = "texts_or_numbers")]
    pub commissions: Vec<String>,
    /// Whether the toggled commission component is on.
    #[serde(deserialize_with = "checkbox")]
    pub commission_component_enabled: Option<bool>,
    /// Percentage for the toggled commission component.
    #[serde(alias = "commissionPercent", deserialize_with = "text_or_number")]
    pub commission_component_percent: Option<String>,
    /// Show the route line.
    #[serde(alias = "showRota", deserialize_with = "checkbox")]
    pub show_route: Option<bool>,
    /// Show the aircraft.
    #[serde(alias = "showAeronave", deserialize_with = "checkbox")]
    pub show_aircraft: Option<bool>,
    /// Show the tariff.
    #[serde(alias = "showTarifa", deserialize_with = "checkbox")]
    pub show_tariff: Option<bool>,
    /// Show the distance.
    #[serde(alias = "showDistancia", deserialize_with = "checkbox")]
    pub show_distance: Option<bool>,
    /// Show the dates.
    #[serde(alias = "showDatas", deserialize_with = "checkbox")]
    pub show_dates: Option<bool>,
    /// Show the adjustment row.
    #[serde(alias = "showAjuste", deserialize_with = "checkbox")]
    pub show_adjustment: Option<bool>,
    /// Show the commission rows.
    #[serde(alias = "pdfCommissionToggle", deserialize_with = "checkbox")]
    pub show_commission: Option<bool>,
    /// Show the notes.
    #[serde(alias = "showObservacoes", deserialize_with = "checkbox")]
    pub show_notes: Option<bool>,
    /// Show the payment instructions.
    #[serde(alias = "showPagamento", deserialize_with = "checkbox")]
    pub show_payment: Option<bool>,
    /// Show the route map.
    #[serde(alias = "showMapa", deserialize_with = "checkbox")]
    pub show_map: Option<bool>,
}

fn lenient_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        other => {
            log::debug!("Ignoring non-text form value {other}");
            None
        }
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(lenient_text(Value::deserialize(d)?))
}

fn texts_or_numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items.into_iter().filter_map(lenient_text).collect(),
        other => lenient_text(other).into_iter().collect(),
    })
}

/// Checkbox values as browsers and hand-written JSON send them. Anything
/// unrecognised is unchecked.
fn checkbox<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        Value::Bool(checked) => Some(checked),
        Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(text) => Some(matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1" | "checked"
        )),
        Value::Array(_) | Value::Object(_) => Some(false),
    })
}

fn format_rate(rate: f64) -> String {
    rate.to_string()
}

/// Returns the return date to keep so that it never precedes `outbound`.
///
/// When both are valid `YYYY-MM-DD` dates and the return is earlier, the
/// outbound date is returned; otherwise `return_date` is kept as typed.
#[must_use]
pub fn clamp_return_date(outbound: &str, return_date: &str) -> String {
    let parse = |raw: &str| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok();
    match (parse(outbound), parse(return_date)) {
        (Some(out), Some(ret)) if ret < out => {
            log::debug!("Return date {return_date} precedes outbound {outbound}; clamping");
            outbound.trim().to_string()
        }
        _ => return_date.to_string(),
    }
}

impl FormInput {
    /// A freshly cleared form: every field empty, every section visible,
    /// the commission component off at its default percentage.
    #[must_use]
    pub fn cleared() -> Self {
        Self {
            commission_component_enabled: Some(false),
            commission_component_percent: Some(format_rate(DEFAULT_COMMISSION_COMPONENT_PERCENT)),
            show_route: Some(true),
            show_aircraft: Some(true),
            show_tariff: Some(true),
            show_distance: Some(true),
            show_dates: Some(true),
            show_adjustment: Some(true),
            show_commission: Some(true),
            show_notes: Some(true),
            show_payment: Some(true),
            show_map: Some(true),
            ..Self::default()
        }
    }

    /// Resets the form to [`Self::cleared`].
    pub fn clear(&mut self) {
        *self = Self::cleared();
    }

    /// Selects an aircraft and pre-fills the tariff.
    ///
    /// A rate saved in `store` always wins. Otherwise the default rate from
    /// `table` is filled in, but only when the tariff field does not
    /// already hold a positive number.
    pub fn apply_aircraft(&mut self, label: &str, table: &TariffTable, store: Option<&TariffStore>) {
        self.aircraft = Some(label.to_string());

        if let Some(saved) = store.and_then(|s| s.get(label)) {
            log::debug!("Using saved tariff {saved} for {label}");
            self.tariff = Some(format_rate(saved));
        } else {
            self.sync_tariff(table, None);
        }
    }

    /// Fills the tariff for the aircraft already on the form.
    ///
    /// Used when a form is loaded rather than edited: a positive tariff is
    /// left alone, otherwise the saved rate (or, failing that, the default
    /// rate) for the current aircraft is filled in.
    pub fn sync_tariff(&mut self, table: &TariffTable, store: Option<&TariffStore>) {
        if coerce::positive(self.tariff.as_deref()).is_some() {
            return;
        }
        let Some(label) = self.aircraft.as_deref().map(str::trim).filter(|l| !l.is_empty())
        else {
            return;
        };

        match store.and_then(|s| s.get(label)).or_else(|| table.get(label)) {
            Some(rate) => self.tariff = Some(format_rate(rate)),
            None => log::debug!("No tariff on file for {label}"),
        }
    }

    /// Sets the NM field and mirrors it into the km field.
    pub fn set_nm_field(&mut self, raw: &str) {
        self.km = Some(km_field_from_nm(raw));
        self.nm = Some(raw.to_string());
    }

    /// Sets the km field and mirrors it into the NM field.
    pub fn set_km_field(&mut self, raw: &str) {
        self.nm = Some(nm_field_from_km(raw));
        self.km = Some(raw.to_string());
    }

    /// Writes a measured route distance into both distance fields, one
    /// decimal each.
    pub fn set_route_distance(&mut self, total_km: f64) {
        self.nm = Some(format!("{:.1}", km_to_nm(total_km)));
        self.km = Some(format!("{total_km:.1}"));
    }

    /// Sets the outbound date and pulls the return date forward if it
    /// would precede it.
    pub fn set_outbound_date(&mut self, raw: &str) {
        self.outbound_date = Some(raw.to_string());
        if let Some(ret) = &self.return_date {
            self.return_date = Some(clamp_return_date(raw, ret));
        }
    }

    /// Snapshot of the current values.
    #[must_use]
    pub fn snapshot(&self) -> QuoteState {
        QuoteStateBuilder::new(self).build()
    }
}

/// Builds [`QuoteState`] snapshots from a [`FormInput`].
#[derive(Debug, Clone, Copy)]
pub struct QuoteStateBuilder<'a> {
    input: &'a FormInput,
}

impl<'a> QuoteStateBuilder<'a> {
    /// Creates a builder over `input`.
    #[must_use]
    pub const fn new(input: &'a FormInput) -> Self {
        Self { input }
    }

    /// Produces the snapshot.
    ///
    /// Total over any input; see the field coercion rules in [`coerce`].
    #[must_use]
    pub fn build(&self) -> QuoteState {
        let input = self.input;
        let outbound_date = coerce::text(input.outbound_date.as_deref());
        let return_date = clamp_return_date(
            &outbound_date,
            &coerce::text(input.return_date.as_deref()),
        );

        QuoteState {
            aircraft: coerce::text(input.aircraft.as_deref()),
            distance_nm: self.distance_nm(),
            tariff_per_km: coerce::number(input.tariff.as_deref()),
            origin: coerce::code(input.origin.as_deref()),
            destination: coerce::code(input.destination.as_deref()),
            stops: input
                .stops
                .iter()
                .map(|s| coerce::code(Some(s.as_str())))
                .filter(|s| !s.is_empty())
                .collect(),
            outbound_date,
            return_date,
            adjustment: self.adjustment(),
            notes: coerce::text(input.notes.as_deref()),
            payment: coerce::text(input.payment.as_deref()),
            commission_percentages: input
                .commissions
                .iter()
                .filter_map(|c| coerce::positive(Some(c.as_str())))
                .collect(),
            commission_component: self.commission_component(),
            visibility: self.visibility(),
        }
    }

    /// NM from the NM field when positive, else converted from a positive
    /// km field, rounded to two decimals.
    fn distance_nm(&self) -> Coerced<f64> {
        let nm = coerce::number(self.input.nm.as_deref());
        if matches!(nm, Coerced::Valid(v) if v > 0.0) {
            return nm.map(|v| round_to(v, 2));
        }

        if let Some(km) = coerce::positive(self.input.km.as_deref()) {
            return Coerced::Defaulted {
                value: round_to(km_to_nm(km), 2),
                reason: DefaultReason::ConvertedFromKilometers,
            };
        }

        nm
    }

    fn adjustment(&self) -> Adjustment {
        let kind = self
            .input
            .adjustment_kind
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .and_then(|k| {
                k.parse::<AdjustmentKind>()
                    .inspect_err(|_| log::debug!("Unknown adjustment kind {k:?}; using add"))
                    .ok()
            })
            .unwrap_or_default();

        Adjustment {
            kind,
            amount: coerce::number(self.input.adjustment_amount.as_deref()).map(|v| round_to(v, 2)),
        }
    }

    fn commission_component(&self) -> CommissionComponent {
        let percent = match coerce::number(self.input.commission_component_percent.as_deref()) {
            Coerced::Defaulted {
                reason: DefaultReason::Missing,
                ..
            } => DEFAULT_COMMISSION_COMPONENT_PERCENT,
            other => other.value(),
        };

        CommissionComponent {
            enabled: coerce::flag(self.input.commission_component_enabled),
            percent,
        }
    }

    fn visibility(&self) -> Visibility {
        let input = self.input;
        Visibility {
            route: coerce::flag(input.show_route),
            aircraft: coerce::flag(input.show_aircraft),
            tariff: coerce::flag(input.show_tariff),
            distance: coerce::flag(input.show_distance),
            dates: coerce::flag(input.show_dates),
            adjustment: coerce::flag(input.show_adjustment),
            commission: coerce::flag(input.show_commission),
            notes: coerce::flag(input.show_notes),
            payment: coerce::flag(input.show_payment),
            map: coerce::flag(input.show_map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> FormInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_form_builds_zeroed_state() {
        let state = QuoteStateBuilder::new(&FormInput::default()).build();

        assert_eq!(state.distance_nm.reason(), Some(DefaultReason::Missing));
        assert_eq!(state.tariff_per_km.reason(), Some(DefaultReason::Missing));
        assert!(state.origin.is_empty());
        assert!(state.stops.is_empty());
        assert_eq!(state.adjustment, Adjustment::default());
        assert_eq!(state.visibility, Visibility::default());
        assert!(!state.commission_component.enabled);
    }

    #[test]
    fn accepts_form_element_ids_and_numbers() {
        let input = form(json!({
            "aeronave": "Phenom 100",
            "tarifa": 36,
            "nm": "539,96",
            "origem": "sbsp",
            "destino": " sbrj ",
            "tipoExtra": "soma",
            "valorExtra": "500",
            "comissoes": [10, "2,5"],
            "showRota": true,
            "pdfCommissionToggle": true
        }));

        let state = input.snapshot();

        assert_eq!(state.aircraft, "Phenom 100");
        assert_eq!(state.tariff_per_km, Coerced::Valid(36.0));
        assert_eq!(state.distance_nm, Coerced::Valid(539.96));
        assert_eq!(state.origin, "SBSP");
        assert_eq!(state.destination, "SBRJ");
        assert_eq!(state.adjustment.kind, AdjustmentKind::Add);
        assert_eq!(state.adjustment.amount, Coerced::Valid(500.0));
        assert_eq!(state.commission_percentages, vec![10.0, 2.5]);
        assert!(state.visibility.route);
        assert!(state.visibility.commission);
        assert!(!state.visibility.map);
    }

    #[test]
    fn typed_zero_is_not_missing() {
        let state = form(json!({ "tariff": "0" })).snapshot();
        assert_eq!(state.tariff_per_km, Coerced::Valid(0.0));

        let state = form(json!({ "tariff": "abc" })).snapshot();
        assert_eq!(state.tariff_per_km.reason(), Some(DefaultReason::Unparseable));
    }

    #[test]
    fn distance_falls_back_to_kilometres() {
        let state = form(json!({ "nm": "", "km": "1000" })).snapshot();
        assert_eq!(
            state.distance_nm,
            Coerced::Defaulted {
                value: 539.96,
                reason: DefaultReason::ConvertedFromKilometers,
            }
        );

        let state = form(json!({ "nm": "0", "km": "" })).snapshot();
        assert_eq!(state.distance_nm, Coerced::Valid(0.0));
    }

    #[test]
    fn distance_and_adjustment_round_to_cents() {
        let state = form(json!({ "nm": "100.456", "adjustmentAmount": "10,456" })).snapshot();
        assert!((state.distance_nm.value() - 100.46).abs() < 1e-9);
        assert!((state.adjustment.amount.value() - 10.46).abs() < 1e-9);
    }

    #[test]
    fn drops_blank_stops_and_bad_commissions() {
        let state = form(json!({
            "stops": ["sbkp", "", "  ", "sbbh"],
            "commissions": ["5", "", "x", "-2", "0"]
        }))
        .snapshot();

        assert_eq!(state.stops, vec!["SBKP", "SBBH"]);
        assert_eq!(state.commission_percentages, vec![5.0]);
    }

    #[test]
    fn unknown_adjustment_kind_is_add() {
        let state = form(json!({ "adjustmentKind": "subtrai", "adjustmentAmount": 50 })).snapshot();
        assert_eq!(state.adjustment.kind, AdjustmentKind::Subtract);

        let state = form(json!({ "adjustmentKind": "multiply" })).snapshot();
        assert_eq!(state.adjustment.kind, AdjustmentKind::Add);
    }

    #[test]
    fn return_date_never_precedes_outbound() {
        let state = form(json!({ "dataIda": "2025-03-10", "dataVolta": "2025-03-01" })).snapshot();
        assert_eq!(state.return_date, "2025-03-10");

        let state = form(json!({ "dataIda": "2025-03-10", "dataVolta": "2025-03-12" })).snapshot();
        assert_eq!(state.return_date, "2025-03-12");

        assert_eq!(clamp_return_date("", "2025-03-01"), "2025-03-01");
        assert_eq!(clamp_return_date("2025-03-10", ""), "");
    }

    #[test]
    fn outbound_edit_pulls_return_forward() {
        let mut input = FormInput {
            return_date: Some("2025-01-05".to_string()),
            ..FormInput::default()
        };
        input.set_outbound_date("2025-01-20");
        assert_eq!(input.return_date.as_deref(), Some("2025-01-20"));
    }

    #[test]
    fn commission_component_defaults_to_five_percent() {
        let state = form(json!({ "commissionComponentEnabled": true })).snapshot();
        assert!(state.commission_component.enabled);
        assert!((state.commission_component.percent - 5.0).abs() < f64::EPSILON);

        let state = form(json!({ "commissionPercent": "7,5" })).snapshot();
        assert!(!state.commission_component.enabled);
        assert!((state.commission_component.percent - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_restores_defaults() {
        let mut input = form(json!({
            "aircraft": "Hawker 400",
            "tariff": "36",
            "commissionComponentEnabled": true,
            "showMapa": false
        }));
        input.clear();

        let state = input.snapshot();
        assert!(state.aircraft.is_empty());
        assert_eq!(state.visibility, Visibility::all());
        assert_eq!(state.commission_component, CommissionComponent::default());
    }

    #[test]
    fn aircraft_prefills_default_tariff_when_empty() {
        let table = TariffTable::embedded();
        let mut input = FormInput::default();

        input.apply_aircraft("King Air C90", &table, None);

        assert_eq!(input.aircraft.as_deref(), Some("King Air C90"));
        assert_eq!(input.tariff.as_deref(), Some("30"));
        assert_eq!(input.snapshot().tariff_per_km, Coerced::Valid(30.0));
    }

    #[test]
    fn aircraft_keeps_typed_tariff() {
        let table = TariffTable::embedded();
        let mut input = FormInput {
            tariff: Some("42".to_string()),
            ..FormInput::default()
        };

        input.apply_aircraft("Phenom 100", &table, None);

        assert_eq!(input.tariff.as_deref(), Some("42"));
    }

    #[test]
    fn saved_tariff_wins_over_default_and_typed() {
        let table = TariffTable::embedded();
        let mut store = TariffStore::empty(std::env::temp_dir().join("charter_quote_unused.json"));
        store.set("Phenom 100", 39.5);
        let mut input = FormInput {
            tariff: Some("42".to_string()),
            ..FormInput::default()
        };

        input.apply_aircraft("Phenom 100", &table, Some(&store));

        assert_eq!(input.tariff.as_deref(), Some("39.5"));
    }

    #[test]
    fn loaded_form_keeps_explicit_tariff() {
        let table = TariffTable::embedded();
        let mut store = TariffStore::empty(std::env::temp_dir().join("charter_quote_unused.json"));
        store.set("Phenom 100", 39.5);
        let mut input = form(json!({ "aircraft": "Phenom 100", "tariff": 50 }));

        input.sync_tariff(&table, Some(&store));

        assert_eq!(input.tariff.as_deref(), Some("50"));
    }

    #[test]
    fn loaded_form_fills_missing_tariff() {
        let table = TariffTable::embedded();
        let mut store = TariffStore::empty(std::env::temp_dir().join("charter_quote_unused.json"));
        store.set("Phenom 100", 39.5);

        let mut saved = form(json!({ "aircraft": "Phenom 100", "tariff": "0" }));
        saved.sync_tariff(&table, Some(&store));
        assert_eq!(saved.tariff.as_deref(), Some("39.5"));

        let mut default = form(json!({ "aircraft": "Citation II" }));
        default.sync_tariff(&table, Some(&store));
        assert_eq!(default.tariff.as_deref(), Some("36"));

        let mut unknown = form(json!({ "aircraft": "Learjet 45" }));
        unknown.sync_tariff(&table, None);
        assert!(unknown.tariff.is_none());
    }

    #[test]
    fn malformed_field_values_degrade() {
        let input = form(json!({
            "stops": null,
            "aircraft": { "label": "Phenom 100" },
            "tariff": [36],
            "showRota": "on",
            "showMapa": "nope",
            "showDatas": 1,
            "pdfCommissionToggle": { "checked": true },
            "commissionComponentEnabled": "TRUE"
        }));

        assert!(input.stops.is_empty());
        assert!(input.aircraft.is_none());
        assert!(input.tariff.is_none());
        assert_eq!(input.show_route, Some(true));
        assert_eq!(input.show_map, Some(false));
        assert_eq!(input.show_dates, Some(true));
        assert_eq!(input.show_commission, Some(false));
        assert_eq!(input.commission_component_enabled, Some(true));

        let state = input.snapshot();
        assert!(state.visibility.route);
        assert!(!state.visibility.map);
        assert_eq!(state.tariff_per_km.reason(), Some(DefaultReason::Missing));
    }

    #[test]
    fn single_stop_string_is_accepted() {
        let input = form(json!({ "stops": "sbkp" }));
        assert_eq!(input.snapshot().stops, vec!["SBKP"]);
    }

    #[test]
    fn huge_amounts_stay_finite() {
        let state = form(json!({ "nm": "1e308", "adjustmentAmount": "1e308" })).snapshot();
        assert!(state.distance_nm.value().is_finite());
        assert!(state.adjustment.amount.value().is_finite());
        assert_eq!(state.adjustment.amount, Coerced::Valid(1e308));
    }

    #[test]
    fn distance_fields_stay_in_sync() {
        let mut input = FormInput::default();
        input.set_nm_field("100");
        assert_eq!(input.km.as_deref(), Some("185.2"));

        input.set_km_field("abc");
        assert_eq!(input.nm.as_deref(), Some(""));

        input.set_route_distance(359.92);
        assert_eq!(input.nm.as_deref(), Some("194.3"));
        assert_eq!(input.km.as_deref(), Some("359.9"));
    }
}
