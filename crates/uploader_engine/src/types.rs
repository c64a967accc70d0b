use std::fmt;

use uploader_core::{EntryId, Fingerprint, Receipt, RejectionReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishError {
    pub kind: PublishErrorKind,
    pub message: String,
}

impl PublishError {
    pub(crate) fn new(kind: PublishErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for PublishError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishErrorKind {
    /// The daemon answered with a JSON-RPC error object.
    Daemon { code: Option<i64> },
    HttpStatus(u16),
    Timeout,
    InvalidResponse,
    Network,
}

impl fmt::Display for PublishErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishErrorKind::Daemon { code: Some(code) } => write!(f, "daemon error {code}"),
            PublishErrorKind::Daemon { code: None } => write!(f, "daemon error"),
            PublishErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            PublishErrorKind::Timeout => write!(f, "timeout"),
            PublishErrorKind::InvalidResponse => write!(f, "invalid response"),
            PublishErrorKind::Network => write!(f, "network error"),
        }
    }
}

/// Final state of one claim within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Rejected(RejectionReason),
    Duplicate {
        title: String,
        fingerprint: Fingerprint,
    },
    PublishFailed {
        title: String,
        error: PublishError,
    },
    /// `entry` is `None` when the ledger write failed after the daemon accepted the claim.
    Published {
        title: String,
        fingerprint: Fingerprint,
        receipt: Receipt,
        entry: Option<EntryId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub published: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// Published but missing from the ledger.
    pub unrecorded: usize,
}

impl Summary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &ClaimOutcome) {
        match outcome {
            ClaimOutcome::Rejected(_) => self.rejected += 1,
            ClaimOutcome::Duplicate { .. } => self.duplicates += 1,
            ClaimOutcome::PublishFailed { .. } => self.failed += 1,
            ClaimOutcome::Published { entry, .. } => {
                self.published += 1;
                if entry.is_none() {
                    self.unrecorded += 1;
                }
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} claims published", self.published, self.total)
    }
}

/// Structured progress of a run, rendered by an [`crate::EventSink`].
///
/// `position` is 1-based within the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    RunStarted {
        total: usize,
    },
    DaemonReady,
    /// Run aborted before any claim; `summary` counts nothing as processed.
    DaemonUnavailable {
        reason: String,
        summary: Summary,
    },
    ClaimStarted {
        position: usize,
        total: usize,
        label: String,
    },
    ClaimRejected {
        position: usize,
        reason: RejectionReason,
    },
    Duplicate {
        position: usize,
        title: String,
    },
    LedgerLookupFailed {
        position: usize,
        title: String,
        error: String,
    },
    PublishFailed {
        position: usize,
        title: String,
        error: PublishError,
    },
    Published {
        position: usize,
        title: String,
        channel_name: Option<String>,
        receipt: Receipt,
    },
    Recorded {
        position: usize,
        title: String,
        entry: EntryId,
    },
    RecordFailed {
        position: usize,
        title: String,
        receipt: Receipt,
        error: String,
    },
    RunFinished {
        summary: Summary,
    },
}
