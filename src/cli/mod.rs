//! CLI support for sprig-lang
//!
//! Provides programmatic access to the `sprig` CLI functionality for
//! embedding in other tools.

mod check;
mod inspect;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use inspect::{render_ast, render_tokens};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Lexing, parsing or evaluation error
    #[error(transparent)]
    Expression(#[from] crate::Error),

    /// Context was valid JSON but not an object
    #[error("Invalid context: {0}")]
    Context(#[from] crate::ContextError),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Expression(e.into())
    }
}
