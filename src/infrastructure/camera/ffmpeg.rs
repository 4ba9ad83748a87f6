// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` input-device camera implementing the [`CameraDevice`] port.
//!
//! Each stream owns one capture thread. `FFmpeg` contexts are created and
//! dropped on that thread, so nothing non-`Send` crosses threads; the UI only
//! sees the latest RGBA frame through a mutex.

use crate::application::port::{CameraDevice, CameraError, CameraFrame, CameraStream, LiveStream};
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Input device format for the current platform.
#[cfg(target_os = "linux")]
const DEVICE_FORMAT: &str = "v4l2";
#[cfg(target_os = "macos")]
const DEVICE_FORMAT: &str = "avfoundation";
#[cfg(target_os = "windows")]
const DEVICE_FORMAT: &str = "dshow";
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const DEVICE_FORMAT: &str = "v4l2";

/// Device opened when none is configured.
#[cfg(target_os = "windows")]
pub const DEFAULT_DEVICE: &str = "video=Integrated Camera";
#[cfg(target_os = "macos")]
pub const DEFAULT_DEVICE: &str = "0";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_DEVICE: &str = "/dev/video0";

/// Camera backed by an `FFmpeg` capture device.
#[derive(Debug, Clone)]
pub struct FfmpegCamera {
    device: String,
}

impl FfmpegCamera {
    #[must_use]
    pub fn new(device: Option<String>) -> Self {
        Self {
            device: device
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
        }
    }
}

impl CameraDevice for FfmpegCamera {
    fn open(&self) -> BoxFuture<'static, Result<CameraStream, CameraError>> {
        let device = self.device.clone();
        async move {
            let shared = Arc::new(Shared::default());
            let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();

            let worker_shared = Arc::clone(&shared);
            let handle = std::thread::Builder::new()
                .name("camera-capture".into())
                .spawn(move || capture_thread(&device, &worker_shared, ready_tx))
                .map_err(|e| CameraError::Failed(e.to_string()))?;

            match ready_rx.await {
                Ok(Ok(())) => {
                    tracing::info!("camera stream opened");
                    Ok(CameraStream::new(FfmpegStream {
                        shared,
                        worker: Mutex::new(Some(handle)),
                    }))
                }
                Ok(Err(err)) => {
                    let _ = handle.join();
                    Err(err)
                }
                Err(_) => Err(CameraError::Failed("capture thread exited".into())),
            }
        }
        .boxed()
    }
}

#[derive(Default)]
struct Shared {
    latest: Mutex<Option<CameraFrame>>,
    running: AtomicBool,
}

struct FfmpegStream {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LiveStream for FfmpegStream {
    fn latest_frame(&self) -> Option<CameraFrame> {
        self.shared.latest.lock().ok().and_then(|slot| slot.clone())
    }

    /// Signals the worker and returns without waiting for it.
    fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
        let handle = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(handle) = handle {
            super::release_worker(handle);
        }
    }

    fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }
}

impl Drop for FfmpegStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn classify_open_error(message: &str) -> CameraError {
    let lower = message.to_lowercase();
    if lower.contains("permission denied") || lower.contains("operation not permitted") {
        CameraError::PermissionDenied
    } else if lower.contains("no such file") || lower.contains("not found") {
        CameraError::NotFound
    } else {
        CameraError::Failed(message.to_string())
    }
}

type Ready = tokio::sync::oneshot::Sender<Result<(), CameraError>>;

fn capture_thread(device: &str, shared: &Shared, ready: Ready) {
    let opened = open_device(device);
    let (mut input, mut decoder, stream_index) = match opened {
        Ok(parts) => parts,
        Err(err) => {
            tracing::warn!(%device, error = %err, "camera open failed");
            let _ = ready.send(Err(err));
            return;
        }
    };

    let (width, height) = (decoder.width(), decoder.height());
    let scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    );
    let mut scaler = match scaler {
        Ok(scaler) => scaler,
        Err(e) => {
            let _ = ready.send(Err(CameraError::Failed(format!(
                "Failed to create scaler: {e}"
            ))));
            return;
        }
    };

    shared.running.store(true, Ordering::SeqCst);
    if ready.send(Ok(())).is_err() {
        // Nobody is waiting for this stream any more.
        shared.running.store(false, Ordering::SeqCst);
        return;
    }

    let mut decoded = ffmpeg_next::frame::Video::empty();
    let mut rgba = ffmpeg_next::frame::Video::empty();
    for (stream, packet) in input.packets() {
        if !shared.running.load(Ordering::SeqCst) {
            break;
        }
        if stream.index() != stream_index || decoder.send_packet(&packet).is_err() {
            continue;
        }
        while decoder.receive_frame(&mut decoded).is_ok() {
            if scaler.run(&decoded, &mut rgba).is_err() {
                continue;
            }
            if let Some(frame) = CameraFrame::new(width, height, extract_rgba_data(&rgba)) {
                if let Ok(mut slot) = shared.latest.lock() {
                    *slot = Some(frame);
                }
            }
        }
    }

    shared.running.store(false, Ordering::SeqCst);
}

type OpenedDevice = (
    ffmpeg_next::format::context::Input,
    ffmpeg_next::decoder::Video,
    usize,
);

fn open_device(device: &str) -> Result<OpenedDevice, CameraError> {
    ffmpeg_next::init().map_err(|e| CameraError::Failed(e.to_string()))?;
    ffmpeg_next::device::register_all();

    let format = ffmpeg_next::device::input::video()
        .find(|format| format.name() == DEVICE_FORMAT)
        .ok_or(CameraError::Unavailable)?;

    let mut options = ffmpeg_next::Dictionary::new();
    options.set("framerate", "30");

    let context = ffmpeg_next::format::open_with(device, &format, options)
        .map_err(|e| classify_open_error(&e.to_string()))?;
    let ffmpeg_next::format::context::Context::Input(input) = context else {
        return Err(CameraError::Failed("device is not an input".into()));
    };

    let stream = input
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or(CameraError::NotFound)?;
    let stream_index = stream.index();

    let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
        .and_then(|context| context.decoder().video())
        .map_err(|e| CameraError::Failed(format!("Failed to create video decoder: {e}")))?;

    Ok((input, decoder, stream_index))
}

/// Copies RGBA rows out of a frame, skipping stride padding.
#[allow(clippy::cast_possible_truncation)] // stride is always < u32::MAX for video frames
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        if let Some(row) = data.get(row_start..row_end) {
            rgba_bytes.extend_from_slice(row);
        }
    }
    rgba_bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_errors_are_classified() {
        assert_eq!(
            classify_open_error("/dev/video0: Permission denied"),
            CameraError::PermissionDenied
        );
        assert_eq!(
            classify_open_error("No such file or directory"),
            CameraError::NotFound
        );
        assert!(matches!(
            classify_open_error("Input/output error"),
            CameraError::Failed(_)
        ));
    }

    #[test]
    fn blank_device_uses_default() {
        let camera = FfmpegCamera::new(Some("  ".into()));
        assert_eq!(camera.device, DEFAULT_DEVICE);
    }
}
