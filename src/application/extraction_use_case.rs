//! Extraction run use case
//!
//! Load the saved page, extract the brand's records, write every enabled
//! report and hand the preferred artifact to the dispatcher.

use crate::domain::ProductRecord;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dispatch::{DispatchOutcome, MailRelayDispatcher, ReportDispatcher};
use crate::infrastructure::document_loader::DocumentLoader;
use crate::infrastructure::parsing::{ContextualParser, ParseContext, ProductListParser};
use crate::infrastructure::report::{
    HtmlTableReportSink, JsonReportSink, ProductReport, ReportSink,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// What one run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Candidate containers on the page
    pub containers: usize,
    /// Brand records in document order
    pub records: Vec<ProductRecord>,
    /// Report files written, in sink order
    pub artifacts: Vec<PathBuf>,
    pub dispatch: DispatchOutcome,
}

/// One configured extraction run
pub struct ExtractionUseCase {
    config: AppConfig,
    parser: ProductListParser,
    sinks: Vec<Box<dyn ReportSink>>,
    dispatcher: Box<dyn ReportDispatcher>,
}

impl ExtractionUseCase {
    /// Build the run from validated settings
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let parser = ProductListParser::with_patterns(&config.extraction.patterns)
            .context("Failed to create product list parser")?;

        // HTML first so it is the artifact that gets dispatched
        let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
        if config.report.html {
            sinks.push(Box::new(HtmlTableReportSink::new(
                &config.report.output_dir,
                &config.report.file_stem,
            )));
        }
        if config.report.json {
            sinks.push(Box::new(JsonReportSink::new(
                &config.report.output_dir,
                &config.report.file_stem,
            )));
        }

        let dispatcher = Box::new(MailRelayDispatcher::new(config.dispatch.clone())?);
        Ok(Self {
            config,
            parser,
            sinks,
            dispatcher,
        })
    }

    /// Replace the delivery step
    pub fn with_dispatcher(mut self, dispatcher: Box<dyn ReportDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Load and extract only; fails when the document is missing or holds no brand records
    pub async fn extract(&self) -> Result<(usize, Vec<ProductRecord>)> {
        let extraction = &self.config.extraction;
        let document = DocumentLoader::load(&extraction.document_path).await?;
        debug!("Parsed {} ({} bytes)", document.path.display(), document.bytes);

        let context = ParseContext::new(&extraction.base_url, &extraction.brand)
            .with_source(document.path.display().to_string());
        let outcome = self.parser.parse_with_context(&document.html, &context)?;
        Ok((outcome.containers, outcome.records))
    }

    /// Run every step and summarize
    pub async fn execute(&self) -> Result<RunSummary> {
        let (containers, records) = self.extract().await?;
        let report = ProductReport::new(&self.config.extraction.brand, records);
        info!("{}", report.summary_line());

        let mut artifacts = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            let path = sink
                .write(&report)
                .await
                .with_context(|| format!("Failed to write {} report", sink.name()))?;
            artifacts.push(path);
        }

        let dispatch = match artifacts.first() {
            Some(attachment) => match self.dispatcher.dispatch(&report, attachment).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Email Failed: {:#}", e);
                    DispatchOutcome::Failed {
                        reason: format!("{e:#}"),
                    }
                }
            },
            None => DispatchOutcome::Skipped {
                reason: "no report artifact written".to_string(),
            },
        };

        let summary = RunSummary {
            containers,
            records: report.records,
            artifacts,
            dispatch,
        };
        info!(
            "Run complete: {} containers, {} records, {} artifacts, dispatch {}",
            summary.containers,
            summary.records.len(),
            summary.artifacts.len(),
            summary.dispatch
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::ParsingError;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::path::Path;

    const PAGE: &str = r#"<html><body>
        <div role="button" tabindex="0">
            <div class="tw-text-300 tw-font-semibold tw-line-clamp-2">Rosier Desi Ghee</div>
            <div>1 L</div>
            <div class="tw-text-200 tw-font-semibold">₹1,099</div>
            <a href="/prn/rosier-desi-ghee/prid/7">View</a>
        </div>
    </body></html>"#;

    struct FailingDispatcher;

    #[async_trait]
    impl ReportDispatcher for FailingDispatcher {
        async fn dispatch(&self, _: &ProductReport, _: &Path) -> Result<DispatchOutcome> {
            Err(anyhow!("relay down"))
        }
    }

    fn config_for(dir: &Path, page: Option<&str>) -> AppConfig {
        let document_path = dir.join("blinkit.html");
        if let Some(page) = page {
            std::fs::write(&document_path, page).unwrap();
        }
        let mut config = AppConfig::default();
        config.extraction.document_path = document_path;
        config.report.output_dir = dir.join("reports");
        config
    }

    #[tokio::test]
    async fn test_missing_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = ExtractionUseCase::from_config(config_for(dir.path(), None)).unwrap();
        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParsingError>(),
            Some(ParsingError::DocumentNotFound { .. })
        ));
        assert!(!dir.path().join("reports").exists());
    }

    #[tokio::test]
    async fn test_dispatch_failure_keeps_reports() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = ExtractionUseCase::from_config(config_for(dir.path(), Some(PAGE)))
            .unwrap()
            .with_dispatcher(Box::new(FailingDispatcher));

        let summary = use_case.execute().await.unwrap();
        assert_eq!(summary.records.len(), 1);
        assert_eq!(summary.artifacts.len(), 2);
        assert!(summary.artifacts[0].ends_with("blinkit_rosier_products.html"));
        assert!(summary.artifacts.iter().all(|p| p.exists()));
        assert!(matches!(summary.dispatch, DispatchOutcome::Failed { reason } if reason.contains("relay down")));
    }

    #[tokio::test]
    async fn test_no_credentials_skips_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = ExtractionUseCase::from_config(config_for(dir.path(), Some(PAGE))).unwrap();
        let summary = use_case.execute().await.unwrap();
        assert!(matches!(summary.dispatch, DispatchOutcome::Skipped { .. }));
    }
}
