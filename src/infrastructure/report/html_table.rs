//! HTML table report
//!
//! Four columns: Title, Variant, Price, Stock. A linked title renders as a
//! blue underlined hyperlink; an unlinked one renders red and bold so the
//! gap is visible to whoever reads the report.

use super::{ProductReport, ReportSink, prepare_output};
use crate::domain::ProductRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

const LINK_STYLE: &str = "color: #0645ad; text-decoration: underline;";
const MISSING_LINK_STYLE: &str = "color: #c00000; font-weight: bold;";

/// Writes `<stem>.html`
pub struct HtmlTableReportSink {
    output_dir: PathBuf,
    file_stem: String,
}

impl HtmlTableReportSink {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
        }
    }

    /// Render the whole document
    pub fn render(report: &ProductReport) -> String {
        let mut out = String::with_capacity(512 + report.records.len() * 256);
        let title = encode_text(&report.summary_line()).into_owned();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{title}</title>");
        out.push_str(
            "<style>table { border-collapse: collapse; } \
             th, td { border: 1px solid #999; padding: 4px 8px; text-align: left; } \
             th { background: #eee; }</style>\n",
        );
        out.push_str("</head>\n<body>\n");
        let _ = writeln!(out, "<h1>{title}</h1>");
        out.push_str("<table>\n<thead><tr><th>Title</th><th>Variant</th><th>Price</th><th>Stock</th></tr></thead>\n<tbody>\n");
        for record in &report.records {
            out.push_str(&Self::render_row(record));
        }
        out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        out
    }

    fn render_row(record: &ProductRecord) -> String {
        let name = encode_text(&record.name);
        let title_cell = match &record.url {
            Some(url) => format!(
                "<a href=\"{}\" style=\"{LINK_STYLE}\">{name}</a>",
                encode_double_quoted_attribute(url)
            ),
            None => format!("<span style=\"{MISSING_LINK_STYLE}\">{name}</span>"),
        };
        format!(
            "<tr><td>{title_cell}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            encode_text(&record.variant),
            encode_text(&record.price),
            record.stock
        )
    }
}

#[async_trait]
impl ReportSink for HtmlTableReportSink {
    fn name(&self) -> &'static str {
        "html"
    }

    async fn write(&self, report: &ProductReport) -> Result<PathBuf> {
        let path = prepare_output(&self.output_dir, &self.file_stem, "html").await?;
        tokio::fs::write(&path, Self::render(report))
            .await
            .with_context(|| format!("Failed to write HTML report {}", path.display()))?;
        info!("Saved {} products to {}", report.total, path.display());
        Ok(path)
    }
}
