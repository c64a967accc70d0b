use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uploader_core::{EntryId, Fingerprint, LedgerEntry};
use uploader_logging::upload_debug;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("could not read ledger {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("ledger {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write ledger: {0}")]
    Write(#[from] PersistError),
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Durable, append-only record of published claims keyed by `(fingerprint, title)`.
pub trait Ledger {
    fn exists(&self, fingerprint: &Fingerprint, title: &str) -> Result<bool, LedgerError>;

    /// Appends an entry. Never overwrites or deletes.
    fn record(&mut self, entry: LedgerEntry) -> Result<EntryId, LedgerError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    id: EntryId,
    #[serde(flatten)]
    entry: LedgerEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerFile {
    next_id: u64,
    entries: Vec<StoredEntry>,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

/// Ledger kept in a single JSON document, rewritten atomically on every append.
#[derive(Debug)]
pub struct JsonLedger {
    writer: AtomicFileWriter,
    state: LedgerFile,
}

impl JsonLedger {
    /// Loads the ledger at `path`. A missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => LedgerFile::default(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| LedgerError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => LedgerFile::default(),
            Err(source) => return Err(LedgerError::Read { path, source }),
        };
        upload_debug!(
            "Loaded ledger {:?} with {} entries",
            path,
            state.entries.len()
        );
        Ok(Self {
            writer: AtomicFileWriter::new(path),
            state,
        })
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &LedgerEntry)> {
        self.state.entries.iter().map(|stored| (stored.id, &stored.entry))
    }
}

impl Ledger for JsonLedger {
    fn exists(&self, fingerprint: &Fingerprint, title: &str) -> Result<bool, LedgerError> {
        Ok(self
            .state
            .entries
            .iter()
            .any(|stored| stored.entry.matches(fingerprint, title)))
    }

    fn record(&mut self, entry: LedgerEntry) -> Result<EntryId, LedgerError> {
        let id = EntryId(self.state.next_id);
        let mut next = self.state.clone();
        next.entries.push(StoredEntry { id, entry });
        next.next_id += 1;

        let content = serde_json::to_string_pretty(&next)?;
        self.writer.write(&content)?;
        self.state = next;
        Ok(id)
    }
}
