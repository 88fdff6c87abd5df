//! Token and syntax tree dumps for debugging expressions

use super::CliError;
use crate::{parse_str, tokenize};

/// One line per token: byte offset, then the token.
pub fn render_tokens(source: &str) -> Result<String, CliError> {
    let mut out = String::new();
    for token in tokenize(source) {
        let token = token?;
        out.push_str(&format!("{:>4}  {}\n", token.position, token.kind));
    }
    Ok(out)
}

/// The fully parenthesized form of the parsed expression.
pub fn render_ast(source: &str) -> Result<String, CliError> {
    Ok(parse_str(source)?.to_string())
}
