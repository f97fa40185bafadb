#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Airport code geocoding for charter quotes.
//!
//! Resolves four-letter ICAO codes to coordinates using an aviation
//! station-data provider configured via TOML files in `services/`:
//!
//! 1. **AVWX** (priority 1): `GET /station/{ICAO}` and
//!    `GET /metar/{ICAO}`, authenticated with a bearer token read from the
//!    environment.
//!
//! Lookups go through [`resolver::GeoResolver`], which validates the code,
//! consults a session [`cache::GeoCache`] (successful and failed lookups
//! are both cached), and only then issues one request. Station payloads
//! vary in shape, so coordinates are pulled out by [`extract`]: a typed
//! schema first, then a bounded-depth scan of the JSON tree.

pub mod avwx;
pub mod cache;
pub mod extract;
pub mod resolver;
pub mod service_registry;

use charter_quote_models::AirportCode;
use thiserror::Error;

pub use cache::GeoCache;
pub use resolver::GeoResolver;

/// Errors from station and weather lookups.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{provider} returned status {status} for {code}")]
    Status {
        /// Provider identifier.
        provider: String,
        /// Airport code that was requested.
        code: AirportCode,
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The endpoint requires a token and none is configured.
    #[error("No API token configured for {provider}")]
    MissingToken {
        /// Provider identifier.
        provider: String,
    },

    /// The service configuration is unusable.
    #[error("Invalid service configuration: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },
}

/// A source of raw station and METAR payloads.
///
/// Implemented by [`avwx::AvwxClient`] for the real provider; tests supply
/// in-memory implementations.
#[async_trait::async_trait]
pub trait StationLookup: Send + Sync {
    /// Fetches the raw station document for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] on transport failure or a non-success
    /// response.
    async fn fetch_station(&self, code: &AirportCode) -> Result<serde_json::Value, GeocodeError>;

    /// Fetches the raw METAR document for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] on transport failure, a non-success
    /// response, or when the provider cannot serve weather.
    async fn fetch_metar(&self, code: &AirportCode) -> Result<serde_json::Value, GeocodeError>;
}
