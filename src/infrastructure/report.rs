//! Report artifacts
//!
//! A run's records are written through one or more [`ReportSink`]s. Each sink
//! owns one file format and returns the path it wrote.

pub mod html_table;
pub mod json;

pub use html_table::HtmlTableReportSink;
pub use json::JsonReportSink;

use crate::domain::ProductRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Records of one run plus the metadata reports print alongside them
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub brand: String,
    pub generated_at: DateTime<Local>,
    pub total: usize,
    pub records: Vec<ProductRecord>,
}

impl ProductReport {
    pub fn new(brand: impl Into<String>, records: Vec<ProductRecord>) -> Self {
        Self::at(brand, records, Local::now())
    }

    /// Report with a fixed timestamp
    pub fn at(brand: impl Into<String>, records: Vec<ProductRecord>, generated_at: DateTime<Local>) -> Self {
        Self {
            brand: brand.into(),
            generated_at,
            total: records.len(),
            records,
        }
    }

    /// One-line summary used in logs and message bodies
    pub fn summary_line(&self) -> String {
        format!(
            "Found {} '{}' products on {}",
            self.total,
            self.brand,
            self.generated_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Destination for a finished report
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// Write the report and return the file created
    async fn write(&self, report: &ProductReport) -> Result<PathBuf>;
}

/// `<dir>/<stem>.<extension>`, creating `dir` if needed
pub(crate) async fn prepare_output(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    Ok(dir.join(format!("{stem}.{extension}")))
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_report;
    use super::*;

    #[test]
    fn test_report_counts_records() {
        let report = sample_report();
        assert_eq!(report.total, 2);
        assert_eq!(report.summary_line(), "Found 2 'rosier' products on 2026-10-16 09:30");
    }

    #[tokio::test]
    async fn test_prepare_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = prepare_output(&nested, "stem", "html").await.unwrap();
        assert!(nested.is_dir());
        assert_eq!(path, nested.join("stem.html"));
    }
}
