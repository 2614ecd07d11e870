//! Parsing error re-export
//!
//! The error types live in `infrastructure::parsing_error` so the loader and
//! config layers can share them without depending on the parser.

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
