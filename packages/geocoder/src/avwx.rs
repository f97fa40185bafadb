//! AVWX REST client for station and METAR lookups.
//!
//! Station documents carry `latitude`/`longitude` among many other fields;
//! METAR documents are passed through untouched.
//!
//! When the `AVWX_API_TOKEN` environment variable (or the variable named by
//! `token_env` in the service TOML) is set and non-empty, every request
//! carries an `Authorization: Bearer <token>` header. `AVWX_BASE_URL`
//! overrides the configured base URL.
//!
//! See <https://avwx.docs.apiary.io/>

use std::time::Duration;

use charter_quote_models::AirportCode;

use crate::service_registry::{self, ProviderConfig, StationService};
use crate::{GeocodeError, StationLookup};

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "AVWX_BASE_URL";

const USER_AGENT: &str = concat!("charter-quote/", env!("CARGO_PKG_VERSION"));

/// Reads a bearer token from the environment variable `var`.
///
/// Returns `Some` only when the variable is set and non-blank.
#[must_use]
pub fn token_from_env(var: &str) -> Option<String> {
    let token = std::env::var(var).ok()?;
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Client for the AVWX station and METAR endpoints.
#[derive(Debug, Clone)]
pub struct AvwxClient {
    client: reqwest::Client,
    provider_id: String,
    base_url: String,
    station_path: String,
    metar_path: String,
    token: Option<String>,
}

impl AvwxClient {
    /// Builds a client from a service configuration, reading the token from
    /// the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_service(service: &StationService) -> Result<Self, GeocodeError> {
        let ProviderConfig::Avwx {
            base_url,
            station_path,
            metar_path,
            timeout_secs,
            token_env,
        } = &service.provider;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(*timeout_secs))
            .build()?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| base_url.clone());

        let token = token_from_env(token_env);
        if token.is_none() {
            log::warn!("{token_env} is not set; {} requests are unauthenticated", service.id);
        }

        Ok(Self {
            client,
            provider_id: service.id.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            station_path: station_path.trim_matches('/').to_string(),
            metar_path: metar_path.trim_matches('/').to_string(),
            token,
        })
    }

    /// Builds a client for the highest-priority enabled service.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if no service is enabled, or
    /// [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_registry() -> Result<Self, GeocodeError> {
        let service = service_registry::primary_service().ok_or_else(|| GeocodeError::Config {
            message: "no enabled station service".to_string(),
        })?;
        Self::from_service(&service)
    }

    /// Replaces the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Whether a bearer token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// URL for `path` and `code` under the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str, code: &AirportCode) -> String {
        format!("{}/{path}/{code}", self.base_url)
    }

    async fn get_json(
        &self,
        path: &str,
        code: &AirportCode,
    ) -> Result<serde_json::Value, GeocodeError> {
        let url = self.endpoint(path, code);
        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        log::debug!("GET {url}");
        let resp = req.send().await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                provider: self.provider_id.clone(),
                code: code.clone(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await?;
        self.decode(code, &body)
    }

    fn decode(&self, code: &AirportCode, body: &[u8]) -> Result<serde_json::Value, GeocodeError> {
        serde_json::from_slice(body).map_err(|e| GeocodeError::Parse {
            message: format!("{} response for {code} is not JSON: {e}", self.provider_id),
        })
    }
}

#[async_trait::async_trait]
impl StationLookup for AvwxClient {
    async fn fetch_station(&self, code: &AirportCode) -> Result<serde_json::Value, GeocodeError> {
        self.get_json(&self.station_path, code).await
    }

    async fn fetch_metar(&self, code: &AirportCode) -> Result<serde_json::Value, GeocodeError> {
        if self.token.is_none() {
            return Err(GeocodeError::MissingToken {
                provider: self.provider_id.clone(),
            });
        }
        self.get_json(&self.metar_path, code).await
    }
}
