//! Report delivery
//!
//! The finished report goes to a fixed recipient through an HTTP mail relay
//! that accepts multipart messages. Delivery is best-effort: a missing
//! credential or endpoint skips it, and a failed send never undoes the
//! report already on disk.

use crate::infrastructure::config::{DispatchConfig, MailCredentials};
use crate::infrastructure::report::ProductReport;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// What happened to the report after it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { recipient: String },
    Skipped { reason: String },
    /// Delivery was attempted and failed; the report files remain
    Failed { reason: String },
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent { recipient } => write!(f, "sent to {recipient}"),
            Self::Skipped { reason } => write!(f, "skipped ({reason})"),
            Self::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

/// Delivers a written report file
#[async_trait]
pub trait ReportDispatcher: Send + Sync {
    async fn dispatch(&self, report: &ProductReport, attachment: &Path) -> Result<DispatchOutcome>;
}

/// Sends reports as multipart messages to a mail relay
pub struct MailRelayDispatcher {
    config: DispatchConfig,
    client: Client,
}

impl MailRelayDispatcher {
    pub fn new(config: DispatchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("shelf-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build relay HTTP client")?;
        Ok(Self { config, client })
    }

    /// Why delivery cannot happen with the current settings, if it cannot
    pub fn skip_reason(&self) -> Option<String> {
        self.target().err()
    }

    /// Credentials and endpoint, or the reason delivery is skipped
    fn target(&self) -> std::result::Result<(&MailCredentials, &str), String> {
        if !self.config.enabled {
            return Err("dispatch disabled".to_string());
        }
        let Some(credentials) = &self.config.credentials else {
            return Err(format!(
                "no credentials ({} / {} not set)",
                MailCredentials::USER_VAR,
                MailCredentials::PASSWORD_VAR
            ));
        };
        match self.config.relay_endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Ok((credentials, endpoint)),
            _ => Err("no relay endpoint configured".to_string()),
        }
    }

    /// Plain-text message body
    pub fn message_body(report: &ProductReport) -> String {
        format!(
            "Hi Automailer PFA {} blinkit products.\nTotal: {}",
            report.brand, report.total
        )
    }

    async fn build_form(
        &self,
        sender: &str,
        report: &ProductReport,
        attachment: &Path,
    ) -> Result<Form> {
        let bytes = tokio::fs::read(attachment)
            .await
            .with_context(|| format!("Failed to read attachment {}", attachment.display()))?;
        let file_name = attachment
            .file_name()
            .map_or_else(|| "report".to_string(), |n| n.to_string_lossy().into_owned());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;

        Ok(Form::new()
            .text("from", sender.to_string())
            .text("to", self.config.recipient.clone())
            .text("subject", self.config.subject.clone())
            .text("text", Self::message_body(report))
            .part("attachment", part))
    }
}

#[async_trait]
impl ReportDispatcher for MailRelayDispatcher {
    async fn dispatch(&self, report: &ProductReport, attachment: &Path) -> Result<DispatchOutcome> {
        let (credentials, endpoint) = match self.target() {
            Ok(target) => target,
            Err(reason) => {
                info!("Skipping report dispatch: {}", reason);
                return Ok(DispatchOutcome::Skipped { reason });
            }
        };

        info!("Sending report to {}", self.config.recipient);
        let form = self.build_form(&credentials.user, report, attachment).await?;
        let response = self
            .client
            .post(endpoint)
            .basic_auth(&credentials.user, Some(&credentials.password))
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Mail relay request to {endpoint} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Mail relay rejected report: {} {}", status, body);
            return Err(anyhow!("Mail relay returned {status}"));
        }

        info!("Report sent to {}", self.config.recipient);
        Ok(DispatchOutcome::Sent {
            recipient: self.config.recipient.clone(),
        })
    }
}
