//! Shelf Scout command line entry point
//!
//! Usage: `shelf-scout [config.json]`

use shelf_scout::infrastructure::config::ConfigManager;
use shelf_scout::infrastructure::logging::init_logging_with_config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let manager = std::env::args()
        .nth(1)
        .map_or_else(ConfigManager::new, |path| ConfigManager::with_path(path));

    let config = match manager.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging_with_config(&config.logging) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Loaded configuration from {}", manager.source_description());

    match shelf_scout::run(config).await {
        Ok(summary) => {
            println!(
                "Done. {} products saved, email {}.",
                summary.records.len(),
                summary.dispatch
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
