//! JSON export of a report

use super::{ProductReport, ReportSink, prepare_output};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Writes `<stem>.json`
pub struct JsonReportSink {
    output_dir: PathBuf,
    file_stem: String,
}

impl JsonReportSink {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
        }
    }
}

#[async_trait]
impl ReportSink for JsonReportSink {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn write(&self, report: &ProductReport) -> Result<PathBuf> {
        let path = prepare_output(&self.output_dir, &self.file_stem, "json").await?;
        let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write JSON report {}", path.display()))?;
        info!("Exported {} records to {}", report.total, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::report::fixtures::sample_report;
    use serde_json::Value;

    #[tokio::test]
    async fn test_json_export_shape() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonReportSink::new(dir.path(), "out");
        let path = sink.write(&sample_report()).await.unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["brand"], "rosier");
        assert_eq!(value["total"], 2);
        assert_eq!(value["records"][0]["stock"], "In Stock");
        assert_eq!(value["records"][1]["variant"], "-");
        assert!(value["records"][1].get("url").is_none());
    }
}
