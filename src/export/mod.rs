// src/export/mod.rs

//! Export sink abstractions for assembled reports.
//!
//! The assembler hands its rows to a sink; the engine ships a local JSON
//! backend, and UI layers may provide their own (spreadsheet, share sheet).

pub mod json;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::ReportRow;

// Re-export for convenience
pub use json::JsonExporter;

/// Metadata about a completed export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of rows written
    pub row_count: usize,
    /// Where the document landed
    pub location: String,
}

/// Header wrapper around the exported rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// ISO 8601 timestamp of the export
    pub generated_at: DateTime<Utc>,
    /// Scope label (class / student) the report was assembled for
    pub scope: String,
    /// Total row count
    pub row_count: usize,
    /// The denormalized rows
    pub rows: serde_json::Value,
}

impl ReportDocument {
    /// Wrap assembled rows for serialization.
    pub fn new(scope: &str, rows: &[ReportRow]) -> Result<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            scope: scope.to_string(),
            row_count: rows.len(),
            rows: serde_json::to_value(rows)?,
        })
    }
}

/// Trait for report export backends.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Serialize the assembled rows under the given scope label.
    async fn write_report(&self, scope: &str, rows: &[ReportRow]) -> Result<ExportSummary>;
}
