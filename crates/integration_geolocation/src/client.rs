//! IP geolocation client
//!
//! Estimates the caller's position from its public IP address using an
//! ipapi-compatible `/json/` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{IpLocation, IpLookupResponse};

/// Geolocation client errors
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// Connection to the lookup service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The lookup did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Request to the lookup service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The service could not place the address
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Failed to parse response from the lookup service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Geolocation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Lookup base URL (default: <https://ipapi.co>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://ipapi.co".to_string()
}

const fn default_timeout() -> u64 {
    5
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Geolocation client trait
#[async_trait]
pub trait GeolocationClient: Send + Sync {
    /// Estimate the position of the current public IP
    async fn lookup(&self) -> Result<IpLocation, GeolocationError>;
}

/// ipapi-compatible HTTP client
#[derive(Debug)]
pub struct IpApiClient {
    client: Client,
    config: GeolocationConfig,
}

impl IpApiClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeolocationConfig) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeolocationError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn location_from(body: IpLookupResponse) -> Result<IpLocation, GeolocationError> {
        if body.error {
            let reason = body.reason.unwrap_or_else(|| "unknown".to_string());
            if reason.eq_ignore_ascii_case("ratelimited") {
                return Err(GeolocationError::RateLimitExceeded);
            }
            return Err(GeolocationError::LookupFailed(reason));
        }

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => Ok(IpLocation {
                latitude,
                longitude,
                city: body.city.filter(|c| !c.trim().is_empty()),
            }),
            _ => Err(GeolocationError::LookupFailed(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}

#[async_trait]
impl GeolocationClient for IpApiClient {
    #[instrument(skip(self))]
    async fn lookup(&self) -> Result<IpLocation, GeolocationError> {
        let url = format!("{}/json/", self.config.base_url.trim_end_matches('/'));
        debug!(url = %url, "Looking up IP location");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeolocationError::Timeout
            } else {
                GeolocationError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeolocationError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeolocationError::RequestFailed(format!("HTTP {status}")));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::ParseError(e.to_string()))?;

        Self::location_from(body)
    }
}
