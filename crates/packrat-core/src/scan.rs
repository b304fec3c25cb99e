//! Scan-identifier normalization and capture lifecycle
//!
//! The QR camera itself is an external collaborator behind the
//! [`CaptureDevice`] trait; this module owns the identifier normalization
//! shared by camera decodes and manual text entry, and the session state
//! machine that drives one capture from permission request to device
//! release.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Convert a raw decoded or typed string into a normalized box identifier:
/// trim whitespace, uppercase the whole string.
///
/// No format validation is performed; any non-empty trimmed string is
/// accepted. Returns `None` when nothing remains after trimming.
pub fn normalize_box_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Capture failures.
///
/// Start failures block the scan flow and are user-visible; stop failures
/// are logged only and never block identifier delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The user denied camera access.
    #[error("camera permission denied")]
    PermissionDenied,

    /// Another consumer holds the physical device.
    #[error("capture device busy: {0}")]
    DeviceBusy(String),

    /// Any other start failure.
    #[error("failed to start capture: {0}")]
    Start(String),

    /// The device produced no usable payload before closing.
    #[error("capture ended without a decode: {0}")]
    Decode(String),

    /// The decoded payload normalized to nothing.
    #[error("decoded payload was empty")]
    EmptyPayload,

    /// Releasing the device failed. Non-fatal.
    #[error("failed to stop capture: {0}")]
    Stop(String),
}

/// Boundary to the camera/QR collaborator.
///
/// Implementations wrap whatever actually produces decoded payloads: a
/// camera pipeline, a test double, or a terminal prompt standing in for one.
#[async_trait]
pub trait CaptureDevice: Send {
    /// Request access to the device and begin scanning.
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// Wait for the next successfully decoded payload.
    async fn next_decode(&mut self) -> Result<String, CaptureError>;

    /// Release the underlying device.
    async fn stop(&mut self) -> Result<(), CaptureError>;
}

/// Capture lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture attempted yet.
    Idle,
    /// Access requested, device not yet delivering frames.
    RequestingPermission,
    /// Device running, waiting for a decode.
    Scanning,
    /// Finished after a successful decode.
    Stopped,
    /// Finished after a start or decode failure.
    StoppedWithError,
}

/// Drives one capture through the state machine
/// `Idle → RequestingPermission → Scanning → Stopped | StoppedWithError`.
///
/// The device handle is scoped to the session: it is released before
/// [`capture`](Self::capture) returns on every path (success, decode error,
/// or failed start, where it was never acquired). At most one capture runs
/// per session instance, matching the singleton physical camera.
pub struct ScanSession<D: CaptureDevice> {
    device: D,
    state: CaptureState,
}

impl<D: CaptureDevice> ScanSession<D> {
    /// Wrap a capture device. The session starts idle.
    pub fn new(device: D) -> Self {
        Self {
            device,
            state: CaptureState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Run one capture and return the normalized box identifier.
    ///
    /// On a successful decode exactly one identifier is emitted and the
    /// device is told to stop; a stop failure is logged and never blocks
    /// delivery. Start failures (permission denial, device busy) surface to
    /// the caller with no automatic retry.
    pub async fn capture(&mut self) -> Result<String, CaptureError> {
        self.state = CaptureState::RequestingPermission;
        if let Err(err) = self.device.start().await {
            self.state = CaptureState::StoppedWithError;
            return Err(err);
        }

        self.state = CaptureState::Scanning;
        let decoded = match self.device.next_decode().await {
            Ok(decoded) => decoded,
            Err(err) => {
                self.state = CaptureState::StoppedWithError;
                if let Err(stop_err) = self.device.stop().await {
                    warn!("failed to stop capture after error: {stop_err}");
                }
                return Err(err);
            }
        };

        if let Err(stop_err) = self.device.stop().await {
            warn!("failed to stop capture after decode: {stop_err}");
        }
        self.state = CaptureState::Stopped;

        normalize_box_id(&decoded).ok_or(CaptureError::EmptyPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_box_id() {
        assert_eq!(normalize_box_id(" box-001 ").as_deref(), Some("BOX-001"));
        assert_eq!(normalize_box_id("BOX-001").as_deref(), Some("BOX-001"));
        assert_eq!(normalize_box_id("Box-001").as_deref(), Some("BOX-001"));
        assert_eq!(normalize_box_id("   "), None);
        assert_eq!(normalize_box_id(""), None);
    }

    /// Scripted device for exercising the session state machine.
    struct FakeDevice {
        start_result: Result<(), CaptureError>,
        decode_result: Result<String, CaptureError>,
        stop_result: Result<(), CaptureError>,
        stop_calls: usize,
    }

    impl FakeDevice {
        fn decoding(payload: &str) -> Self {
            Self {
                start_result: Ok(()),
                decode_result: Ok(payload.to_string()),
                stop_result: Ok(()),
                stop_calls: 0,
            }
        }
    }

    #[async_trait]
    impl CaptureDevice for FakeDevice {
        async fn start(&mut self) -> Result<(), CaptureError> {
            self.start_result.clone()
        }

        async fn next_decode(&mut self) -> Result<String, CaptureError> {
            self.decode_result.clone()
        }

        async fn stop(&mut self) -> Result<(), CaptureError> {
            self.stop_calls += 1;
            self.stop_result.clone()
        }
    }

    #[tokio::test]
    async fn test_capture_normalizes_decoded_payload() {
        let mut session = ScanSession::new(FakeDevice::decoding(" box-001 "));
        assert_eq!(session.state(), CaptureState::Idle);

        let id = session.capture().await.unwrap();
        assert_eq!(id, "BOX-001");
        assert_eq!(session.state(), CaptureState::Stopped);
    }

    #[tokio::test]
    async fn test_stop_failure_still_delivers_identifier() {
        let mut device = FakeDevice::decoding("box-7");
        device.stop_result = Err(CaptureError::Stop("already released".to_string()));
        let mut session = ScanSession::new(device);

        let id = session.capture().await.unwrap();
        assert_eq!(id, "BOX-7");
        assert_eq!(session.state(), CaptureState::Stopped);
    }

    #[tokio::test]
    async fn test_permission_denied_surfaces() {
        let mut device = FakeDevice::decoding("unused");
        device.start_result = Err(CaptureError::PermissionDenied);
        let mut session = ScanSession::new(device);

        let err = session.capture().await.unwrap_err();
        assert_eq!(err, CaptureError::PermissionDenied);
        assert_eq!(session.state(), CaptureState::StoppedWithError);
    }

    #[tokio::test]
    async fn test_decode_error_releases_device() {
        let mut device = FakeDevice::decoding("unused");
        device.decode_result = Err(CaptureError::Decode("stream closed".to_string()));
        let mut session = ScanSession::new(device);

        assert!(session.capture().await.is_err());
        assert_eq!(session.state(), CaptureState::StoppedWithError);
        assert_eq!(session.device.stop_calls, 1);
    }

    #[tokio::test]
    async fn test_whitespace_decode_is_empty_payload() {
        let mut session = ScanSession::new(FakeDevice::decoding("   "));
        let err = session.capture().await.unwrap_err();
        assert_eq!(err, CaptureError::EmptyPayload);
    }
}
