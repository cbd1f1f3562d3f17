//! Debug trace sinks.
//!
//! One record per (objective, candidate) pair scored in debug mode,
//! appended after scoring completes. Consumers (export/report tooling)
//! read the stream; the pipeline never reads it back.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use matchlink_core::traits::TraceSink;
use matchlink_core::types::TraceRecord;

/// Append-only JSON-lines file, one record per line.
pub struct JsonlTraceSink {
    path: PathBuf,
}

impl JsonlTraceSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TraceSink for JsonlTraceSink {
    fn append(&self, records: &[TraceRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

/// In-process sink for tests and trace inspection.
#[derive(Default)]
pub struct MemoryTraceSink {
    records: Mutex<Vec<TraceRecord>>,
}

impl MemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl TraceSink for MemoryTraceSink {
    fn append(&self, records: &[TraceRecord]) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(records);
        Ok(())
    }
}
