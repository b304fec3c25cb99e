//! Terminal stand-in for the QR capture device
//!
//! The CLI has no camera; decoded payloads arrive as lines on stdin (from a
//! pipe or typed by hand). [`ManualCapture`] adapts that input stream to the
//! [`CaptureDevice`] lifecycle so the scan flow runs through the same
//! session state machine a camera would.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use packrat_core::{CaptureDevice, CaptureError};

/// [`CaptureDevice`] reading decoded payloads from stdin.
pub struct ManualCapture {
    lines: Option<Lines<BufReader<Stdin>>>,
}

impl ManualCapture {
    /// New capture over the process stdin.
    pub fn new() -> Self {
        Self { lines: None }
    }
}

impl Default for ManualCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureDevice for ManualCapture {
    async fn start(&mut self) -> Result<(), CaptureError> {
        self.lines = Some(BufReader::new(tokio::io::stdin()).lines());
        Ok(())
    }

    async fn next_decode(&mut self) -> Result<String, CaptureError> {
        let lines = self
            .lines
            .as_mut()
            .ok_or_else(|| CaptureError::Start("capture not started".to_string()))?;
        match lines.next_line().await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(CaptureError::Decode("end of input".to_string())),
            Err(err) => Err(CaptureError::Decode(err.to_string())),
        }
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        self.lines = None;
        Ok(())
    }
}
