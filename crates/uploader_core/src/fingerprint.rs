use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::claim::NormalizedClaim;

/// Hex-encoded SHA-256 over the canonical form of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content fingerprint used as the dedup key. Keyed by content, never by file name alone.
pub fn fingerprint(claim: &NormalizedClaim) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes(claim));
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    Fingerprint(hex)
}

/// Sorted-key JSON object of the publish fields.
fn canonical_bytes(claim: &NormalizedClaim) -> Vec<u8> {
    let object: serde_json::Map<String, serde_json::Value> = claim
        .publish_fields()
        .into_iter()
        .map(|(field, value)| (field.to_string(), serde_json::Value::String(value)))
        .collect();
    serde_json::Value::Object(object).to_string().into_bytes()
}
