// SPDX-License-Identifier: MPL-2.0
//! Camera adapters and still-frame encoding.
//!
//! Live capture goes through `FFmpeg` input devices and is compiled only with
//! the `camera` feature. Without it the camera capability is simply absent
//! and the session reports the camera as unavailable.

#[cfg(feature = "camera")]
mod ffmpeg;

#[cfg(feature = "camera")]
pub use ffmpeg::FfmpegCamera;

use crate::application::port::CameraFrame;
use crate::domain::report::AcquiredFile;
use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::RgbaImage;
#[cfg(any(feature = "camera", test))]
use std::thread::JoinHandle;

/// JPEG quality used for captured stills.
pub const CAPTURE_JPEG_QUALITY: u8 = 90;

/// Encodes a camera frame as a JPEG capture.
///
/// # Errors
///
/// Returns [`Error::Image`] if the frame buffer is inconsistent or encoding
/// fails.
pub fn encode_capture(frame: &CameraFrame) -> Result<AcquiredFile> {
    let rgba = RgbaImage::from_raw(frame.width(), frame.height(), frame.rgba().to_vec())
        .ok_or_else(|| Error::Image("frame buffer does not match its size".into()))?;
    // JPEG has no alpha channel.
    let rgb = image_rs::DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, CAPTURE_JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    tracing::debug!(
        width = frame.width(),
        height = frame.height(),
        size = bytes.len(),
        "camera frame encoded"
    );
    Ok(AcquiredFile::captured_jpeg(bytes))
}

/// Waits for a capture worker on a separate thread.
///
/// The worker only notices its stop flag between device reads, and a stalled
/// device can block a read indefinitely. The device is closed when the
/// worker returns.
#[cfg(any(feature = "camera", test))]
pub(crate) fn release_worker(handle: JoinHandle<()>) {
    let spawned = std::thread::Builder::new()
        .name("camera-release".into())
        .spawn(move || {
            if handle.join().is_err() {
                tracing::warn!("camera capture thread panicked");
            }
            tracing::info!("camera stream released");
        });
    if let Err(err) = spawned {
        tracing::warn!(error = %err, "camera release thread not started; capture worker detached");
    }
}
