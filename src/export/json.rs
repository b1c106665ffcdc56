// src/export/json.rs

//! Local JSON export backend.
//!
//! Writes pretty-printed report documents atomically (temp file + rename)
//! under a configurable directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::export::{ExportSummary, ReportDocument, ReportSink};
use crate::report::ReportRow;

/// JSON exporter rooted at a local directory.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    export_dir: PathBuf,
}

impl JsonExporter {
    /// Create an exporter writing into the given directory.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// File name for a scope, with unsafe characters collapsed.
    fn file_name(scope: &str) -> String {
        let slug: String = scope
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let stamp = Utc::now().format("%Y%m%dT%H%M%S");
        format!("report-{slug}-{stamp}.json")
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.export_dir).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportSink for JsonExporter {
    async fn write_report(&self, scope: &str, rows: &[ReportRow]) -> Result<ExportSummary> {
        let document = ReportDocument::new(scope, rows)?;
        let bytes = serde_json::to_vec_pretty(&document)?;

        let path = self.export_dir.join(Self::file_name(scope));
        self.write_bytes(&path, &bytes).await?;

        log::info!("Exported {} rows to {}", rows.len(), path.display());
        Ok(ExportSummary {
            row_count: rows.len(),
            location: path.display().to_string(),
        })
    }
}
