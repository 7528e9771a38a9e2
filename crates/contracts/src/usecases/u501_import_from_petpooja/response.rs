use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The API produced no usable body (client error, retries exhausted, or empty text)
    NoData { reason: String },

    /// The body was processed; rows may still be zero
    Completed(ImportSummary),
}

impl ImportOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            ImportOutcome::NoData { .. } => 1,
            ImportOutcome::Completed(_) => 0,
        }
    }
}

/// Counters reported at the end of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// JSON objects found by the payload locator
    pub candidates: usize,

    /// Objects that could not be turned into a record
    pub skipped: usize,

    /// Rows actually written
    pub inserted: u64,

    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,

    #[serde(rename = "finishedAt")]
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    /// Candidates that were normalised but not written
    pub fn failed_inserts(&self) -> u64 {
        let normalized = self.candidates.saturating_sub(self.skipped) as u64;
        normalized.saturating_sub(self.inserted)
    }
}
