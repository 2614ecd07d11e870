//! Infrastructure layer: document loading, HTML extraction, configuration,
//! logging, report sinks and report delivery.

pub mod config;
pub mod dispatch;
pub mod document_loader;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod report;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, DispatchConfig, MailCredentials};
pub use dispatch::{DispatchOutcome, MailRelayDispatcher, ReportDispatcher};
pub use document_loader::{DocumentLoader, LoadedDocument};
pub use logging::init_logging_with_config;
pub use parsing::{ContextualParser, ExtractionOutcome, ParseContext, ProductListParser};
pub use parsing_error::{ParsingError, ParsingResult};
pub use report::{HtmlTableReportSink, JsonReportSink, ProductReport, ReportSink};
