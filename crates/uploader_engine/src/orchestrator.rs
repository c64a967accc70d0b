use std::sync::Arc;

use thiserror::Error;
use uploader_core::{
    fingerprint, normalize, ConfigDefaults, LedgerEntry, PublishPayload, RawClaim,
};

use crate::{ClaimOutcome, EventSink, Ledger, PublishClient, Summary, UploadEvent};

/// Supplies the `publish_time` stamped on ledger entries.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

pub fn utc_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().to_rfc3339())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: Summary,
    /// One outcome per input claim, in input order.
    pub outcomes: Vec<ClaimOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunAborted {
    #[error("daemon unavailable: {reason}")]
    DaemonUnavailable { total: usize, reason: String },
}

impl RunAborted {
    /// Nothing is processed when a run aborts.
    pub fn summary(&self) -> Summary {
        match self {
            RunAborted::DaemonUnavailable { total, .. } => Summary::new(*total),
        }
    }
}

/// Sequential batch publisher: normalize, dedupe, publish and record, one claim at a time.
///
/// Claims share the daemon's wallet state, so they are never published concurrently.
pub struct UploadOrchestrator<C, L> {
    client: C,
    ledger: L,
    defaults: ConfigDefaults,
    sink: Arc<dyn EventSink>,
    clock: Clock,
}

impl<C, L> UploadOrchestrator<C, L>
where
    C: PublishClient,
    L: Ledger,
{
    pub fn new(client: C, ledger: L, defaults: ConfigDefaults, sink: Arc<dyn EventSink>) -> Self {
        Self {
            client,
            ledger,
            defaults,
            sink,
            clock: utc_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Run the batch. Only an unavailable daemon aborts; every per-claim failure is
    /// reported in the outcome list and the run moves on.
    pub async fn run(&mut self, claims: Vec<RawClaim>) -> Result<RunReport, RunAborted> {
        let total = claims.len();
        self.sink.emit(UploadEvent::RunStarted { total });

        let reason = match self.client.status().await {
            Ok(true) => None,
            Ok(false) => Some("daemon reports it is not running".to_string()),
            Err(err) => Some(err.to_string()),
        };
        if let Some(reason) = reason {
            self.sink.emit(UploadEvent::DaemonUnavailable {
                reason: reason.clone(),
                summary: Summary::new(total),
            });
            return Err(RunAborted::DaemonUnavailable { total, reason });
        }
        self.sink.emit(UploadEvent::DaemonReady);

        let mut summary = Summary::new(total);
        let mut outcomes = Vec::with_capacity(total);
        for (index, raw) in claims.into_iter().enumerate() {
            let outcome = self.process(index + 1, total, &raw).await;
            summary.record(&outcome);
            outcomes.push(outcome);
        }

        self.sink.emit(UploadEvent::RunFinished { summary });
        Ok(RunReport { summary, outcomes })
    }

    async fn process(&mut self, position: usize, total: usize, raw: &RawClaim) -> ClaimOutcome {
        self.sink.emit(UploadEvent::ClaimStarted {
            position,
            total,
            label: claim_label(raw, position),
        });

        let claim = match normalize(raw, &self.defaults) {
            Ok(claim) => claim,
            Err(reason) => {
                self.sink.emit(UploadEvent::ClaimRejected {
                    position,
                    reason: reason.clone(),
                });
                return ClaimOutcome::Rejected(reason);
            }
        };

        let fingerprint = fingerprint(&claim);
        let title = claim.title.clone();
        match self.ledger.exists(&fingerprint, &title) {
            Ok(true) => {
                self.sink.emit(UploadEvent::Duplicate {
                    position,
                    title: title.clone(),
                });
                return ClaimOutcome::Duplicate { title, fingerprint };
            }
            Ok(false) => {}
            // An unreadable ledger must not block new content; treat as not yet published.
            Err(err) => self.sink.emit(UploadEvent::LedgerLookupFailed {
                position,
                title: title.clone(),
                error: err.to_string(),
            }),
        }

        let payload = PublishPayload::from(&claim);
        let receipt = match self.client.publish(&payload).await {
            Ok(receipt) => receipt,
            Err(error) => {
                self.sink.emit(UploadEvent::PublishFailed {
                    position,
                    title: title.clone(),
                    error: error.clone(),
                });
                return ClaimOutcome::PublishFailed { title, error };
            }
        };
        self.sink.emit(UploadEvent::Published {
            position,
            title: title.clone(),
            channel_name: claim.channel_name.clone(),
            receipt: receipt.clone(),
        });

        let publish_time = (self.clock)();
        let entry = LedgerEntry::new(title.clone(), fingerprint.clone(), &receipt, publish_time);
        let entry = match self.ledger.record(entry) {
            Ok(id) => {
                self.sink.emit(UploadEvent::Recorded {
                    position,
                    title: title.clone(),
                    entry: id,
                });
                Some(id)
            }
            Err(err) => {
                self.sink.emit(UploadEvent::RecordFailed {
                    position,
                    title: title.clone(),
                    receipt: receipt.clone(),
                    error: err.to_string(),
                });
                None
            }
        };

        ClaimOutcome::Published {
            title,
            fingerprint,
            receipt,
            entry,
        }
    }
}

fn claim_label(raw: &RawClaim, position: usize) -> String {
    raw.get("title")
        .or_else(|| raw.get("file_path"))
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("claim #{position}"))
}
