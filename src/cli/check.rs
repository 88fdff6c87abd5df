//! Evaluate sprig expressions against a JSON context

use tracing::debug;

use super::CliError;
use crate::{Context, Evaluator, parse_str, value_to_json};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON object whose keys become the variables; empty when absent
    pub context: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated successfully with JSON output
    Success(serde_json::Value),
}

/// Execute a sprig check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse_str(&options.expression)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let context = match &options.context {
        Some(json_str) => {
            let json_value: serde_json::Value = serde_json::from_str(json_str)?;
            Context::from_json(json_value)?
        }
        None => Context::new(),
    };
    debug!(variables = context.len(), "loaded context");

    let result = Evaluator::new(&context)
        .evaluate(&expr)
        .map_err(crate::Error::from)?;

    Ok(CheckResult::Success(value_to_json(result)))
}
