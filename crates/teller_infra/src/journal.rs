//! Branch compliance decision journal.
//!
//! Every accepted gate decision is captured as an append-only record so
//! end-of-day reconciliation and AMLO reporting can reconstruct what the
//! gate decided and why. Records carry the customer digest, never the
//! raw identifier.
//!
//! Appends go through a bounded in-memory queue; a full queue fails the
//! append and increments a counter rather than blocking the teller
//! screen. An optional JSONL file mirrors the queue so decisions survive
//! a restart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use teller_core::gate::GateState;

// ─── Records ────────────────────────────────────────────────────────────

/// Outcome of one accepted gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Exchange allowed for the customer.
    Allowed,
    /// Exchange blocked by a pending or rejected reservation, or by a
    /// failed lookup under a fail-closed policy.
    Blocked,
    /// Identifier cleared; gate reset without a lookup.
    Cleared,
    /// Lookup failed; the exchange stayed enabled (fail-open).
    LookupFailed,
}

/// One journaled decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// xxh64 digest of the customer identifier (hex string).
    pub customer_digest: String,
    /// Lookup sequence number. 0 for records without a lookup.
    pub seq: u64,
    /// Decision outcome.
    pub outcome: GateOutcome,
    /// Raw reservation status string, when a reservation existed.
    pub status: Option<String>,
    /// Error text, when the lookup failed.
    pub error: Option<String>,
    /// Epoch milliseconds of the decision.
    pub decided_at_ms: u64,
}

// ─── Append error ───────────────────────────────────────────────────────

/// Error returned when a journal append fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalAppendError {
    /// Bounded queue is full.
    QueueFull,
    /// Backing-file write failure.
    WriteFailed(String),
}

impl fmt::Display for JournalAppendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalAppendError::QueueFull => write!(f, "decision journal queue full"),
            JournalAppendError::WriteFailed(msg) => {
                write!(f, "decision journal write failed: {msg}")
            }
        }
    }
}

impl std::error::Error for JournalAppendError {}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Journal observability counters.
#[derive(Debug, Default)]
pub struct JournalMetrics {
    appends_total: u64,
    write_errors: u64,
    enqueue_failures: u64,
}

impl JournalMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful append.
    pub fn record_append(&mut self) {
        self.appends_total += 1;
    }

    /// Record a backing-file write failure.
    pub fn record_write_error(&mut self) {
        self.write_errors += 1;
    }

    /// Record a full-queue rejection.
    pub fn record_enqueue_failure(&mut self) {
        self.enqueue_failures += 1;
    }

    /// Successful appends.
    pub fn appends_total(&self) -> u64 {
        self.appends_total
    }

    /// Backing-file write failures.
    pub fn write_errors(&self) -> u64 {
        self.write_errors
    }

    /// Full-queue rejections.
    pub fn enqueue_failures(&self) -> u64 {
        self.enqueue_failures
    }
}

// ─── Journal ────────────────────────────────────────────────────────────

/// Bounded append-only decision journal with optional file backing.
#[derive(Debug)]
pub struct DecisionJournal {
    records: Vec<DecisionRecord>,
    capacity: usize,
    storage_path: Option<PathBuf>,
}

impl DecisionJournal {
    /// Create an in-memory journal bounded to `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
            storage_path: None,
        }
    }

    /// Open a file-backed journal, replaying existing records.
    ///
    /// Corrupt lines are skipped so a torn final write does not take the
    /// journal down.
    pub fn with_storage_path(
        capacity: usize,
        storage_path: impl AsRef<Path>,
    ) -> io::Result<Self> {
        let path = storage_path.as_ref().to_path_buf();
        let mut records = Vec::new();
        if path.exists() {
            let file = std::fs::File::open(&path)?;
            for line in BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                if let Ok(record) = serde_json::from_str::<DecisionRecord>(&line) {
                    records.push(record);
                }
            }
        }
        Ok(Self {
            records,
            capacity,
            storage_path: Some(path),
        })
    }

    /// Path of the backing file, if file-backed.
    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    /// Append a record.
    ///
    /// Fails with `QueueFull` when the bound is reached; the caller
    /// decides whether that blocks anything (it must not block the
    /// teller screen).
    pub fn append(
        &mut self,
        record: DecisionRecord,
        metrics: &mut JournalMetrics,
    ) -> Result<(), JournalAppendError> {
        if self.records.len() >= self.capacity {
            metrics.record_enqueue_failure();
            return Err(JournalAppendError::QueueFull);
        }
        if let Some(path) = &self.storage_path {
            if let Err(e) = append_line(path, &record) {
                metrics.record_write_error();
                return Err(JournalAppendError::WriteFailed(e.to_string()));
            }
        }
        self.records.push(record);
        metrics.record_append();
        Ok(())
    }

    /// Latest record per customer digest.
    pub fn replay(&self) -> HashMap<String, DecisionRecord> {
        let mut latest = HashMap::new();
        for record in &self.records {
            latest.insert(record.customer_digest.clone(), record.clone());
        }
        latest
    }

    /// All records in append order.
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    /// Number of journaled records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured record bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn append_line(path: &Path, record: &DecisionRecord) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(file, "{line}")?;
    Ok(())
}

// ─── Gate adapter ───────────────────────────────────────────────────────

/// Build and append a record for the latest accepted gate decision.
///
/// `seq` is the ticket sequence of the completed lookup; `state` is read
/// after `complete_lookup` returned.
pub fn journal_decision(
    journal: &mut DecisionJournal,
    metrics: &mut JournalMetrics,
    customer_digest: &str,
    seq: u64,
    state: &GateState,
    decided_at_ms: u64,
) -> Result<(), JournalAppendError> {
    let outcome = if state.disable_exchange {
        GateOutcome::Blocked
    } else if state.check_error.is_some() {
        GateOutcome::LookupFailed
    } else {
        GateOutcome::Allowed
    };
    let record = DecisionRecord {
        customer_digest: customer_digest.to_string(),
        seq,
        outcome,
        status: state
            .reservation
            .as_ref()
            .map(|r| r.status.as_wire().to_string()),
        error: state.check_error.as_ref().map(|e| e.to_string()),
        decided_at_ms,
    };
    journal.append(record, metrics)
}
