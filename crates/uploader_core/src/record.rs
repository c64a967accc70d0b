use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Daemon confirmation of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub txid: String,
    pub claim_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One published claim as remembered by the ledger. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub title: String,
    pub fingerprint: Fingerprint,
    pub txid: String,
    pub claim_id: String,
    pub publish_time: String,
}

impl LedgerEntry {
    pub fn new(
        title: impl Into<String>,
        fingerprint: Fingerprint,
        receipt: &Receipt,
        publish_time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            fingerprint,
            txid: receipt.txid.clone(),
            claim_id: receipt.claim_id.clone(),
            publish_time: publish_time.into(),
        }
    }

    pub fn matches(&self, fingerprint: &Fingerprint, title: &str) -> bool {
        self.fingerprint == *fingerprint && self.title == title
    }
}
