//! Uploader engine: claim import, daemon client, ledger and the upload run.
mod client;
mod config;
mod import;
mod ledger;
mod orchestrator;
mod persist;
mod report;
mod types;

pub use client::{ClientSettings, PublishClient, ReqwestPublishClient, DEFAULT_DAEMON_URL};
pub use config::{load_defaults, ConfigError, DEFAULT_PROFILE};
pub use import::{import_claims, ImportError};
pub use ledger::{JsonLedger, Ledger, LedgerError};
pub use orchestrator::{utc_clock, Clock, RunAborted, RunReport, UploadOrchestrator};
pub use persist::{AtomicFileWriter, PersistError};
pub use report::{EventSink, LogReporter};
pub use types::{ClaimOutcome, PublishError, PublishErrorKind, Summary, UploadEvent};
