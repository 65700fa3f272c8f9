//! Quote source orchestration.
//!
//! This module wires a provider to the rest of the pipeline:
//! - Name filling from the shared directory
//! - Quote data validation
//! - Fallback substitution on failure

mod source;
mod validator;

pub use source::QuoteSource;
pub use validator::{QuoteValidator, ValidationIssue, ValidationSeverity, ValidatorConfig};
