use std::fs;

use tempfile::TempDir;
use uploader_core::{EntryId, Fingerprint, LedgerEntry, Receipt};
use uploader_engine::{JsonLedger, Ledger, LedgerError};

fn entry(title: &str, hash: &str) -> LedgerEntry {
    LedgerEntry::new(
        title,
        Fingerprint::from_hex(hash),
        &Receipt {
            txid: format!("tx-{title}"),
            claim_id: format!("claim-{title}"),
        },
        "2024-01-01T00:00:00+00:00",
    )
}

#[test]
fn missing_file_opens_empty() {
    let temp = TempDir::new().unwrap();
    let ledger = JsonLedger::open(temp.path().join("db.json")).unwrap();
    assert!(ledger.is_empty());
    assert!(!ledger
        .exists(&Fingerprint::from_hex("aa"), "anything")
        .unwrap());
}

#[test]
fn recorded_entries_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("db.json");

    let mut ledger = JsonLedger::open(&path).unwrap();
    assert_eq!(ledger.record(entry("first", "aa")).unwrap(), EntryId(1));
    assert_eq!(ledger.record(entry("second", "bb")).unwrap(), EntryId(2));

    let reopened = JsonLedger::open(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.exists(&Fingerprint::from_hex("aa"), "first").unwrap());
    let (id, stored) = reopened.entries().nth(1).unwrap();
    assert_eq!(id, EntryId(2));
    assert_eq!(stored, &entry("second", "bb"));
}

#[test]
fn lookup_is_keyed_by_fingerprint_and_title() {
    let temp = TempDir::new().unwrap();
    let mut ledger = JsonLedger::open(temp.path().join("db.json")).unwrap();
    ledger.record(entry("title", "aa")).unwrap();

    assert!(ledger.exists(&Fingerprint::from_hex("aa"), "title").unwrap());
    assert!(!ledger.exists(&Fingerprint::from_hex("aa"), "other").unwrap());
    assert!(!ledger.exists(&Fingerprint::from_hex("bb"), "title").unwrap());
}

#[test]
fn ids_continue_after_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("db.json");
    JsonLedger::open(&path)
        .unwrap()
        .record(entry("a", "aa"))
        .unwrap();

    let mut ledger = JsonLedger::open(&path).unwrap();
    assert_eq!(ledger.record(entry("b", "bb")).unwrap(), EntryId(2));
}

#[test]
fn corrupt_file_is_rejected_on_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("db.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonLedger::open(&path).unwrap_err();
    assert!(matches!(err, LedgerError::Corrupt { .. }));
}

#[test]
fn failed_write_leaves_ledger_unchanged() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    let mut ledger = JsonLedger::open(dir.join("db.json")).unwrap();
    fs::write(&dir, "x").unwrap();

    let err = ledger.record(entry("a", "aa")).unwrap_err();
    assert!(matches!(err, LedgerError::Write(_)));
    assert!(ledger.is_empty());
    assert!(!ledger.exists(&Fingerprint::from_hex("aa"), "a").unwrap());
}
