//! Error types for document loading and product extraction
//!
//! Field-level misses never surface here: an exhausted fallback chain yields
//! the undetermined sentinel instead. These errors cover the run-level
//! preconditions and configuration problems.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParsingError {
    #[error("Input document not found: {path}")]
    DocumentNotFound { path: String },

    #[error("HTML parsing failed: {message}")]
    HtmlParsingFailed {
        message: String,
        path: Option<String>,
    },

    #[error("No '{brand}' products found ({containers} product containers scanned)")]
    NoProductsFound { brand: String, containers: usize },

    #[error("Invalid {field} pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },
}

impl ParsingError {
    /// Create a document-not-found error for the given path
    pub fn document_not_found(path: impl Into<String>) -> Self {
        Self::DocumentNotFound { path: path.into() }
    }

    /// Create a no products found error
    pub fn no_products_found(brand: &str, containers: usize) -> Self {
        Self::NoProductsFound {
            brand: brand.to_string(),
            containers,
        }
    }

    /// Create an invalid pattern error for a pattern table field
    pub fn invalid_pattern(field: &str, pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error for a named field
    pub fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            field: field.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
