//! Uploader core: pure claim model, normalization and fingerprinting.
mod claim;
mod fingerprint;
mod normalize;
mod payload;
mod record;
mod slug;

pub use claim::{ConfigDefaults, Fee, NormalizedClaim, RawClaim, REQUIRED_FIELDS};
pub use fingerprint::{fingerprint, Fingerprint};
pub use normalize::{normalize, RejectionReason};
pub use payload::{FeePayload, PublishPayload};
pub use record::{EntryId, LedgerEntry, Receipt};
pub use slug::slugify;
