//! # Sprig - Abstract Syntax Tree
//!
//! This module defines the tokens and syntax tree of the Sprig predicate
//! language, a tiny expression language for rule and filter predicates over
//! dynamic object graphs.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (identifiers, literals, operations, grouping)
//! - **[operators]** - Unary and binary operators
//!
//! ## Quick Start
//!
//! ```text
//! data.type?.name = 'carlos' && !archived
//! ```
//!
//! ## Operators
//!
//! From loosest to tightest binding:
//!
//! | Operator      | Meaning                                 |
//! |---------------|-----------------------------------------|
//! | `\|\|`        | logical OR                              |
//! | `&&`          | logical AND                             |
//! | `=`           | strict equality                         |
//! | `??`          | null coalescing                         |
//! | `!`           | logical NOT                             |
//! | `.` / `?.`    | field access / nullable field access    |
//!
//! `=`, `&&`, `||` and `??` are left-associative; `!` is a prefix operator.
//!
//! ## Field Access
//!
//! `a.b` fails at evaluation time when `a` is null or undefined, while
//! `a?.b` yields null instead. Chains grow to the left, so `a.b.c` is
//! `(a.b).c`.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, NodeKind};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Number, Token, TokenKind};
