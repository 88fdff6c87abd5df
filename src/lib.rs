pub mod ast;
pub mod cli;
pub mod context;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinOp, Expr, NodeKind, Number, Token, TokenKind, UnaryOp};
pub use context::{Context, ContextError};
pub use convert::{json_to_value, value_to_json};
pub use error::{Error, LexError, ParseError, RuntimeError};
pub use evaluator::{Evaluator, evaluate_str};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse, parse_str};
pub use value::Value;
