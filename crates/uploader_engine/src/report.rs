use uploader_logging::{upload_debug, upload_error, upload_info, upload_warn};

use crate::UploadEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: UploadEvent);
}

/// Renders run events through the logging macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl EventSink for LogReporter {
    fn emit(&self, event: UploadEvent) {
        match event {
            UploadEvent::RunStarted { total } => {
                upload_info!("Starting uploader...");
                upload_info!("{} claims to upload.", total);
            }
            UploadEvent::DaemonReady => upload_info!("LBRY daemon ready for upload."),
            UploadEvent::DaemonUnavailable { reason, summary } => {
                upload_error!(
                    "Could not reach LBRY daemon ({}). Please check if it is running.",
                    reason
                );
                upload_info!("{}.", summary);
                upload_info!("Exiting uploader...");
            }
            UploadEvent::ClaimStarted {
                position,
                total,
                label,
            } => upload_info!("[{}/{}] Uploading claim '{}'...", position, total, label),
            UploadEvent::ClaimRejected { position, reason } => {
                upload_warn!("[{}] Skipping claim: {}.", position, reason)
            }
            UploadEvent::Duplicate { position, title } => {
                upload_info!("[{}] Claim '{}' already published.", position, title)
            }
            UploadEvent::LedgerLookupFailed {
                position,
                title,
                error,
            } => upload_warn!(
                "[{}] Could not check ledger for '{}' ({}); publishing anyway.",
                position,
                title,
                error
            ),
            UploadEvent::PublishFailed {
                position,
                title,
                error,
            } => upload_error!(
                "[{}] Claim '{}' could not be published: {}",
                position,
                title,
                error
            ),
            UploadEvent::Published {
                position,
                title,
                channel_name: Some(channel),
                receipt,
            } => upload_info!(
                "[{}] Claim '{}' was successfully published to channel {} (txid {}, claim {}).",
                position,
                title,
                channel,
                receipt.txid,
                receipt.claim_id
            ),
            UploadEvent::Published {
                position,
                title,
                channel_name: None,
                receipt,
            } => upload_info!(
                "[{}] Claim '{}' was successfully published (txid {}, claim {}).",
                position,
                title,
                receipt.txid,
                receipt.claim_id
            ),
            UploadEvent::Recorded { title, entry, .. } => {
                upload_debug!("Recorded '{}' as ledger entry {}", title, entry)
            }
            UploadEvent::RecordFailed {
                position,
                title,
                receipt,
                error,
            } => upload_error!(
                "[{}] PUBLISHED BUT NOT RECORDED: '{}' (txid {}, claim {}) is live but the ledger \
                 write failed: {}. A later run may publish it again.",
                position,
                title,
                receipt.txid,
                receipt.claim_id,
                error
            ),
            UploadEvent::RunFinished { summary } => {
                upload_info!("{}.", summary);
                if summary.unrecorded > 0 {
                    upload_error!(
                        "{} published claims are missing from the ledger.",
                        summary.unrecorded
                    );
                }
                upload_info!("Exiting uploader...");
            }
        }
    }
}
