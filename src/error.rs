//! Error types for each pipeline stage.
//!
//! Every error is fatal to the stage that raised it. [`Error`] wraps the three
//! stage errors for the composed entry points.

use thiserror::Error;

/// Errors raised while scanning source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character '{character}' at {position}")]
    UnexpectedCharacter { position: usize, character: char },

    /// `position` is the offset of the opening quote.
    #[error("Unterminated string at {position}")]
    UnterminatedString { position: usize },

    /// `position` is the offset of the first digit.
    #[error("Invalid number at {position}: contains two dots")]
    MalformedNumber { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::MalformedNumber { position } => *position,
        }
    }
}

/// Errors raised while building the syntax tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The token has no prefix rule, so it cannot start an expression.
    #[error("Expected expression at {position}, found {found}")]
    ExpectedExpression { position: usize, found: String },

    #[error("Parsing error at {position}. Expected {expected} found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A complete expression was followed by a token that cannot extend it.
    #[error("Unexpected {found} at {position} after end of expression")]
    TrailingInput { position: usize, found: String },

    /// Nesting at `position` would exceed [`crate::parser::MAX_DEPTH`].
    #[error("Expression nested too deeply at {position}")]
    TooDeep { position: usize },
}

impl ParseError {
    /// Source offset of the offending token, if there was one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::ExpectedExpression { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::TrailingInput { position, .. }
            | ParseError::TooDeep { position } => Some(*position),
            ParseError::UnexpectedEnd { .. } => None,
        }
    }
}

/// Errors raised while evaluating a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Plain `.` access on a null or undefined value.
    #[error("Cannot access property '{field}' of {base} value")]
    NullFieldAccess { field: String, base: &'static str },
}

/// Any error from the lex → parse → evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let e = LexError::UnexpectedCharacter {
            position: 2,
            character: '#',
        };
        assert_eq!(e.to_string(), "Unexpected character '#' at 2");
        assert_eq!(e.position(), 2);
    }

    #[test]
    fn test_error_wraps_stage() {
        let e: Error = RuntimeError::NullFieldAccess {
            field: "name".to_string(),
            base: "null",
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Runtime error: Cannot access property 'name' of null value"
        );
    }
}
