// SPDX-License-Identifier: MPL-2.0
//! Camera port definition.
//!
//! A [`CameraDevice`] opens a live [`CameraStream`]. The stream decodes frames
//! in the background and keeps only the most recent one; the UI polls it on
//! its tick and the capture action snapshots it.
//!
//! # Lifecycle
//!
//! 1. `CameraDevice::open()` resolves to a running stream or a [`CameraError`]
//! 2. `CameraStream::latest_frame()` returns the newest decoded frame
//! 3. `CameraStream::stop()` releases the device; calling it again is a no-op

use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// CameraError
// =============================================================================

/// Errors that can occur while opening a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The operating system refused access to the device.
    PermissionDenied,
    /// No capture device matched the request.
    NotFound,
    /// Camera support is not available in this build or was disabled.
    Unavailable,
    /// Opening or decoding failed for another reason.
    Failed(String),
}

impl CameraError {
    /// Returns the i18n key of the blocking alert shown for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "camera-error-denied",
            CameraError::NotFound => "camera-error-not-found",
            CameraError::Unavailable => "camera-error-unavailable",
            CameraError::Failed(_) => "camera-error-failed",
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::NotFound => write!(f, "No camera found"),
            CameraError::Unavailable => write!(f, "Camera unavailable"),
            CameraError::Failed(msg) => write!(f, "Camera error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

// =============================================================================
// CameraFrame
// =============================================================================

/// One decoded RGBA frame.
#[derive(Clone, PartialEq, Eq)]
pub struct CameraFrame {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
}

impl CameraFrame {
    /// Wraps tightly packed RGBA8 pixels.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected && expected > 0).then(|| Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraFrame({}x{})", self.width, self.height)
    }
}

// =============================================================================
// Stream and device ports
// =============================================================================

/// A running capture stream owned by an adapter.
pub trait LiveStream: Send + Sync {
    /// Returns the most recently decoded frame, if any arrived yet.
    fn latest_frame(&self) -> Option<CameraFrame>;

    /// Releases the device without waiting on the capture thread. Idempotent.
    fn stop(&self);

    /// Returns `false` once the stream was stopped or the device went away.
    fn is_running(&self) -> bool;
}

/// Cloneable handle to a live stream.
///
/// Clones share the same device; stopping one stops them all.
#[derive(Clone)]
pub struct CameraStream(Arc<dyn LiveStream>);

impl CameraStream {
    pub fn new(stream: impl LiveStream + 'static) -> Self {
        Self(Arc::new(stream))
    }

    #[must_use]
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.0.latest_frame()
    }

    pub fn stop(&self) {
        self.0.stop();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.is_running()
    }
}

impl fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraStream")
            .field("running", &self.is_running())
            .finish()
    }
}

/// Port for opening the camera.
pub trait CameraDevice: Send + Sync {
    /// Requests the configured (preferably environment-facing) camera.
    ///
    /// # Errors
    ///
    /// Returns a [`CameraError`] if access is denied or the device cannot be
    /// opened.
    fn open(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>>;
}
