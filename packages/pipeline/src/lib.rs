#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quote pipeline.
//!
//! [`QuotePipeline`] owns everything a quote session needs (the resolver
//! and its cache, the tariff table and store, the current form values and
//! the last measured route) and exposes the two recompute steps as plain
//! methods:
//!
//! * [`QuotePipeline::recompute_route`] resolves the route's airports and
//!   writes the measured distance back into the form.
//! * [`QuotePipeline::recompute_pricing`] snapshots the form, prices it and
//!   renders the summary, refreshing the route first when no distance was
//!   entered.
//!
//! [`DebouncedPipeline`] wraps a session for interactive use, so that a
//! burst of airport-code edits triggers a single route resolution.

pub mod debounce;

use charter_quote_form::{FormInput, TariffStore, TariffStoreError, TariffTable};
use charter_quote_geocoder::GeoResolver;
use charter_quote_models::{PricingResult, QuoteState};
use charter_quote_pricing::price;
use charter_quote_route::{RouteMeasurement, measure};
use charter_quote_summary::{
    DocumentExporter, DocumentModel, ExportOutcome, advisory, fallback, render_or_fallback,
};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};

/// Errors from pipeline actions that report failures to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Saving the tariff store failed.
    #[error(transparent)]
    TariffStore(#[from] TariffStoreError),
    /// Weather was requested without an origin airport.
    #[error("enter an origin airport code to fetch its METAR")]
    NoOrigin,
    /// No METAR came back for the airport.
    #[error("no METAR available for {code}")]
    MetarUnavailable {
        /// The requested airport code.
        code: String,
    },
}

/// Result of [`QuotePipeline::recompute_pricing`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    /// Pricing preconditions are not met; show this message instead.
    Advisory(String),
    /// A priced and rendered quote.
    Quote {
        /// The snapshot that was priced.
        state: QuoteState,
        /// Pricing figures.
        pricing: PricingResult,
        /// Rendered summary.
        document: DocumentModel,
    },
}

/// What [`QuotePipeline::export`] produced and how the export went.
#[derive(Debug)]
pub struct ExportReport {
    /// The document handed to the exporter.
    pub document: DocumentModel,
    /// Exporter result.
    pub outcome: ExportOutcome,
}

/// A quote session.
pub struct QuotePipeline {
    resolver: GeoResolver,
    tariffs: TariffTable,
    store: Option<TariffStore>,
    form: FormInput,
    route: Option<RouteMeasurement>,
}

impl QuotePipeline {
    /// New session with a cleared form and no tariff store.
    #[must_use]
    pub fn new(resolver: GeoResolver, tariffs: TariffTable) -> Self {
        Self {
            resolver,
            tariffs,
            store: None,
            form: FormInput::cleared(),
            route: None,
        }
    }

    /// Attaches a tariff store for saved rates.
    #[must_use]
    pub fn with_store(mut self, store: TariffStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the form values.
    #[must_use]
    pub fn with_form(mut self, form: FormInput) -> Self {
        self.form = form;
        self
    }

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &FormInput {
        &self.form
    }

    /// Mutable access to the form values.
    pub const fn form_mut(&mut self) -> &mut FormInput {
        &mut self.form
    }

    /// The last successfully measured route.
    #[must_use]
    pub const fn route(&self) -> Option<&RouteMeasurement> {
        self.route.as_ref()
    }

    /// The session's resolver.
    #[must_use]
    pub const fn resolver(&self) -> &GeoResolver {
        &self.resolver
    }

    /// The default tariff table.
    #[must_use]
    pub const fn tariffs(&self) -> &TariffTable {
        &self.tariffs
    }

    /// The attached tariff store.
    #[must_use]
    pub const fn store(&self) -> Option<&TariffStore> {
        self.store.as_ref()
    }

    /// Resolves the route and writes its distance into the form.
    ///
    /// Requires both origin and destination. Airports are resolved one at
    /// a time in flight order (origin, stops, destination) and nothing is
    /// updated until all of them have settled. Unresolvable airports are
    /// dropped; if at least two points remain, both distance fields are
    /// overwritten (one decimal) and the measurement is kept. Otherwise
    /// this is a no-op.
    ///
    /// Returns the new measurement, if one was made.
    pub async fn recompute_route(&mut self) -> Option<&RouteMeasurement> {
        let state = self.form.snapshot();
        if state.origin.is_empty() || state.destination.is_empty() {
            log::debug!("Route refresh skipped: origin and destination are required");
            return None;
        }

        let codes = state.route_codes();
        let resolved = self.resolver.resolve_route(&codes).await;
        let points: Vec<_> = resolved.into_iter().flatten().collect();

        let Some(measurement) = measure(&points) else {
            log::debug!(
                "Route refresh skipped: {} of {} airports resolved",
                points.len(),
                codes.len()
            );
            return None;
        };

        log::debug!(
            "Route {} measured at {:.1} km ({:.1} NM)",
            codes.join(" → "),
            measurement.total_km,
            measurement.total_nm
        );
        self.form.set_route_distance(measurement.total_km);
        self.route = Some(measurement);
        self.route.as_ref()
    }

    /// Prices the current form and renders the summary.
    ///
    /// When the form has no usable distance, the route is refreshed first
    /// and the form snapshotted again.
    pub async fn recompute_pricing(&mut self) -> QuoteOutcome {
        let mut state = self.form.snapshot();
        if state.distance_nm.value() <= 0.0 {
            self.recompute_route().await;
            state = self.form.snapshot();
        }

        match price(&state) {
            Ok(pricing) => {
                let document = render_or_fallback(&state, &pricing);
                QuoteOutcome::Quote {
                    state,
                    pricing,
                    document,
                }
            }
            Err(e) => {
                log::debug!("Pricing skipped: {e}");
                QuoteOutcome::Advisory(advisory(&e))
            }
        }
    }

    /// Selects an aircraft, pre-filling its saved or default tariff.
    pub fn select_aircraft(&mut self, label: &str) {
        self.form
            .apply_aircraft(label, &self.tariffs, self.store.as_ref());
    }

    /// Fills an empty tariff from the selected aircraft's saved or default
    /// rate. A positive tariff already on the form is kept.
    pub fn sync_tariff(&mut self) {
        self.form.sync_tariff(&self.tariffs, self.store.as_ref());
    }

    /// Sets the tariff field and, when an aircraft is selected and the rate
    /// is usable, saves it for that aircraft.
    ///
    /// # Errors
    ///
    /// * If the tariff store cannot be written
    pub fn set_tariff(&mut self, raw: &str) -> Result<(), PipelineError> {
        self.form.tariff = Some(raw.to_string());

        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        let Some(aircraft) = self.form.aircraft.as_deref().filter(|a| !a.is_empty()) else {
            return Ok(());
        };
        let Some(rate) = charter_quote_form::coerce::positive(Some(raw)) else {
            return Ok(());
        };

        store.set(aircraft, rate);
        store.save()?;
        Ok(())
    }

    /// Fetches the METAR for the origin airport.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::NoOrigin`] if the origin field is empty
    /// * [`PipelineError::MetarUnavailable`] if the lookup returned nothing
    pub async fn weather(&self) -> Result<serde_json::Value, PipelineError> {
        let origin = charter_quote_form::coerce::code(self.form.origin.as_deref());
        if origin.is_empty() {
            return Err(PipelineError::NoOrigin);
        }
        self.resolver
            .metar(&origin)
            .await
            .ok_or(PipelineError::MetarUnavailable { code: origin })
    }

    /// Renders the current quote and hands it to `exporter`.
    ///
    /// The route is always refreshed first, whether or not the map section
    /// is visible. A quote that cannot be priced still exports, as the
    /// fallback document.
    pub async fn export(&mut self, exporter: &dyn DocumentExporter) -> ExportReport {
        self.recompute_route().await;

        let state = self.form.snapshot();
        let document = match price(&state) {
            Ok(pricing) => render_or_fallback(&state, &pricing),
            Err(e) => {
                log::warn!("Exporting fallback document: {e}");
                fallback(&state)
            }
        };

        let outcome = charter_quote_summary::export(exporter, &document).await;
        ExportReport { document, outcome }
    }
}

/// A [`QuotePipeline`] shared between concurrent edits, with route
/// resolution debounced.
pub struct DebouncedPipeline {
    pipeline: Mutex<QuotePipeline>,
    debouncer: Debouncer,
}

impl DebouncedPipeline {
    /// Wraps `pipeline`, coalescing route edits within `debouncer`'s window.
    #[must_use]
    pub fn new(pipeline: QuotePipeline, debouncer: Debouncer) -> Self {
        Self {
            pipeline: Mutex::new(pipeline),
            debouncer,
        }
    }

    /// Exclusive access to the session.
    pub async fn lock(&self) -> MutexGuard<'_, QuotePipeline> {
        self.pipeline.lock().await
    }

    /// Applies `edit` to the form straight away, then resolves the route
    /// once the debounce window passes with no further edits.
    ///
    /// Returns `None` when a later edit superseded this one or when the
    /// route could not be measured.
    pub async fn edit_route(
        &self,
        edit: impl FnOnce(&mut FormInput) + Send,
    ) -> Option<RouteMeasurement> {
        edit(self.pipeline.lock().await.form_mut());

        if !self.debouncer.settle().await {
            return None;
        }

        self.pipeline.lock().await.recompute_route().await.cloned()
    }

    /// The wrapped session.
    #[must_use]
    pub fn into_inner(self) -> QuotePipeline {
        self.pipeline.into_inner()
    }
}
