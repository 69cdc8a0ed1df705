//! Coarse network-level location, used when a device fix is not desired or
//! available.
//!
//! The result is city-grade at best; the session flags it approximate so
//! downstream display never conflates it with a GPS fix.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApproximateError;

/// A coarse fix resolved from network-level signals.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproximateFix {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
}

/// Provider of approximate positions.
#[allow(async_fn_in_trait)]
pub trait ApproximateSource: Send + Sync {
    async fn locate(&self) -> Result<ApproximateFix, ApproximateError>;
}

/// ip-api-style JSON payload: `status` is `"success"` or `"fail"`, with an
/// optional `message` on failure.
#[derive(Debug, Deserialize)]
struct IpLocatePayload {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

/// HTTP client for an ip-api-style locate endpoint.
pub struct IpLocateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl IpLocateClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns `ApproximateError::Http` if the underlying client cannot be
    /// constructed.
    pub fn new(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApproximateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl ApproximateSource for IpLocateClient {
    async fn locate(&self) -> Result<ApproximateFix, ApproximateError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApproximateError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: IpLocatePayload = serde_json::from_str(&body)?;

        if payload.status != "success" {
            return Err(ApproximateError::Provider {
                message: payload
                    .message
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            });
        }

        match (payload.lat, payload.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!(latitude, longitude, city = ?payload.city, "approximate fix resolved");
                Ok(ApproximateFix {
                    latitude,
                    longitude,
                    city: payload.city,
                })
            }
            _ => Err(ApproximateError::Provider {
                message: "response missing coordinates".to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "approximate_test.rs"]
mod tests;
