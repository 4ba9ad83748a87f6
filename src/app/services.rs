// SPDX-License-Identifier: MPL-2.0
//! Startup registration of the collaborators.
//!
//! [`Services::from_config`] builds every adapter once. A required
//! collaborator that cannot be built (invalid service URL, incomplete fixed
//! location) fails startup instead of surfacing later as a missing widget.
//! Optional capabilities (camera, location) are simply absent.

use crate::app::config::{Config, LocationProviderKind, LOCATION_TIMEOUT_SECS};
use crate::application::port::{
    CameraDevice, Coordinates, FeedbackSink, LocationProvider, ReportExtractor, RiskPredictor,
};
use crate::error::{Error, Result};
use crate::infrastructure::http::HttpBackend;
use crate::infrastructure::location::{FixedLocation, IpLookupLocation};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Optional capabilities the session may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub camera: bool,
    pub location: bool,
}

/// The collaborators the session's effects run against.
#[derive(Clone)]
pub struct Services {
    pub extractor: Arc<dyn ReportExtractor>,
    pub predictor: Arc<dyn RiskPredictor>,
    pub feedback: Arc<dyn FeedbackSink>,
    pub camera: Option<Arc<dyn CameraDevice>>,
    pub location: Option<Arc<dyn LocationProvider>>,
}

impl Services {
    /// Builds the adapters described by `config`.
    ///
    /// `api_url` (from `--api-url`) overrides `[service] base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when a service or lookup URL is invalid
    /// and [`Error::Config`] when the fixed location lacks coordinates.
    pub fn from_config(config: &Config, api_url: Option<&str>) -> Result<Self> {
        let base_url = api_url.unwrap_or_else(|| config.service_url());
        let backend = Arc::new(HttpBackend::new(base_url, config.request_timeout())?);
        tracing::info!(url = %backend.base_url(), "service collaborators registered");

        let services = Self {
            extractor: backend.clone(),
            predictor: backend.clone(),
            feedback: backend,
            camera: camera_from_config(config),
            location: location_from_config(config)?,
        };
        tracing::info!(capabilities = ?services.capabilities(), "capabilities registered");
        Ok(services)
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            camera: self.camera.is_some(),
            location: self.location.is_some(),
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "camera")]
fn camera_from_config(config: &Config) -> Option<Arc<dyn CameraDevice>> {
    use crate::infrastructure::camera::FfmpegCamera;

    if !config.camera_enabled() {
        return None;
    }
    Some(Arc::new(FfmpegCamera::new(config.camera.device.clone())))
}

#[cfg(not(feature = "camera"))]
fn camera_from_config(config: &Config) -> Option<Arc<dyn CameraDevice>> {
    if config.camera_enabled() {
        tracing::debug!("built without the camera feature; camera capability absent");
    }
    None
}

fn location_from_config(config: &Config) -> Result<Option<Arc<dyn LocationProvider>>> {
    let location = &config.location;
    match location.provider {
        LocationProviderKind::None => Ok(None),
        LocationProviderKind::Fixed => {
            let (Some(lat), Some(lon)) = (location.latitude, location.longitude) else {
                return Err(Error::Config(
                    "[location] provider \"fixed\" needs latitude and longitude".into(),
                ));
            };
            let coordinates = Coordinates::new(lat, lon).ok_or_else(|| {
                Error::Config(format!("[location] coordinates out of range: {lat}, {lon}"))
            })?;
            Ok(Some(Arc::new(FixedLocation::new(coordinates))))
        }
        LocationProviderKind::IpLookup => {
            let provider = IpLookupLocation::new(
                config.location_lookup_url(),
                Duration::from_secs(LOCATION_TIMEOUT_SECS),
            )?;
            Ok(Some(Arc::new(provider)))
        }
    }
}
