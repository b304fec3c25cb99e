//! `pak scan` - resolve a payload to a box identifier

use anyhow::Result;

use packrat_core::{normalize_box_id, CaptureError, ScanSession};

use crate::capture::ManualCapture;
use crate::commands::CommandContext;
use crate::output;

/// Resolve `raw` (or the next stdin line when omitted) and show the box it
/// names.
pub async fn execute(ctx: CommandContext, raw: Option<String>) -> Result<()> {
    let box_id = match raw {
        // Manual entry path: same normalization as a camera decode.
        Some(raw) => match normalize_box_id(&raw) {
            Some(id) => id,
            None => {
                eprintln!("Nothing to resolve: the payload is empty.");
                return Ok(());
            }
        },
        None => {
            let mut session = ScanSession::new(ManualCapture::new());
            match session.capture().await {
                Ok(id) => id,
                Err(err) => {
                    eprintln!("{}", capture_message(&err));
                    return Ok(());
                }
            }
        }
    };

    match ctx.repo.get(&box_id) {
        Some(b) => {
            println!("{} ({} item(s))", b.id, b.item_count());
            println!("{}", output::items_table(b));
        }
        None => {
            println!("{box_id} is not in the collection yet.");
            println!("Add an item with: pak add {box_id} <name>");
        }
    }
    Ok(())
}

/// User-facing message for a capture failure.
pub(crate) fn capture_message(err: &CaptureError) -> String {
    match err {
        CaptureError::PermissionDenied => {
            "Camera permission denied. Allow camera access and try again.".to_string()
        }
        CaptureError::DeviceBusy(_) => {
            "Could not start the scanner: the device is in use by another application.".to_string()
        }
        other => format!("Scan failed: {other}"),
    }
}
