// SPDX-License-Identifier: MPL-2.0
//! Location providers.
//!
//! - [`FixedLocation`]: coordinates from the settings file
//! - [`IpLookupLocation`]: approximate position from an IP geolocation service
//!
//! No provider at all is expressed as the absence of the capability.

use crate::application::port::{Coordinates, LocationError, LocationProvider};
use crate::error::{Error, Result};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

/// Always reports the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(Coordinates);

impl FixedLocation {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self(coordinates)
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self) -> BoxFuture<'static, std::result::Result<Coordinates, LocationError>> {
        let coordinates = self.0;
        async move { Ok(coordinates) }.boxed()
    }
}

/// Queries an HTTP endpoint returning `{lat, lon}` or `{latitude, longitude}`.
#[derive(Debug, Clone)]
pub struct IpLookupLocation {
    client: Client,
    url: Url,
}

impl IpLookupLocation {
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn new(lookup_url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(lookup_url.trim())
            .map_err(|e| Error::InvalidUrl(format!("{lookup_url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{lookup_url}: unsupported scheme '{}'",
                url.scheme()
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

impl LocationProvider for IpLookupLocation {
    fn locate(&self) -> BoxFuture<'static, std::result::Result<Coordinates, LocationError>> {
        let request = self.client.get(self.url.clone());
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| LocationError::Failed(e.to_string()))?;
            if !response.status().is_success() {
                return Err(LocationError::Failed(format!(
                    "HTTP status: {}",
                    response.status()
                )));
            }
            let body: Value = response
                .json()
                .await
                .map_err(|e| LocationError::Failed(e.to_string()))?;
            parse_coordinates(&body)
        }
        .boxed()
    }
}

/// Extracts coordinates from a geolocation response.
///
/// # Errors
///
/// Returns [`LocationError::Failed`] if neither key pair holds a valid
/// position.
pub fn parse_coordinates(body: &Value) -> std::result::Result<Coordinates, LocationError> {
    let number = |key: &str| -> Option<f64> {
        match body.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    };

    let lat = number("lat").or_else(|| number("latitude"));
    let lon = number("lon")
        .or_else(|| number("lng"))
        .or_else(|| number("longitude"));

    lat.zip(lon)
        .and_then(|(lat, lon)| Coordinates::new(lat, lon))
        .ok_or_else(|| LocationError::Failed("response carries no coordinates".into()))
}
