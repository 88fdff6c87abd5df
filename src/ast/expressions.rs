use std::fmt;

use crate::ast::{BinOp, UnaryOp};
use crate::value::Value;

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The tree is built once by the parser and never mutated afterwards; the
/// same tree can be evaluated any number of times against different contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Variable reference, resolved against the execution context
    ///
    /// # Example
    /// ```text
    /// data
    /// ```
    Identifier(String),

    /// Literal string, number, boolean, null or undefined
    ///
    /// # Example
    /// ```text
    /// 'carlos'
    /// 42
    /// undefined
    /// ```
    Literal(Value),

    /// Prefix operation
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation (equality, logical, null-coalescing, field access)
    ///
    /// For [`BinOp::FieldAccess`] and [`BinOp::NullableFieldAccess`] the
    /// right operand is always an [`Expr::Identifier`] naming the field.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Explicit parenthesization, transparent to evaluation
    ///
    /// # Example
    /// ```text
    /// (a || b) && c
    /// ```
    Grouping(Box<Expr>),
}

/// The shape of an [`Expr`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Identifier,
    Literal,
    Unary,
    Binary,
    Grouping,
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Identifier(_) => NodeKind::Identifier,
            Expr::Literal(_) => NodeKind::Literal,
            Expr::Unary { .. } => NodeKind::Unary,
            Expr::Binary { .. } => NodeKind::Binary,
            Expr::Grouping(_) => NodeKind::Grouping,
        }
    }

    /// Operand sub-trees in source order: none for identifiers and literals,
    /// one for unary and grouping nodes, two for binary nodes.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Identifier(_) | Expr::Literal(_) => vec![],
            Expr::Unary { operand, .. } => vec![operand],
            Expr::Grouping(inner) => vec![inner],
            Expr::Binary { left, right, .. } => vec![left, right],
        }
    }
}

/// Renders the fully parenthesized form, e.g. `a || b && c` as `(a || (b && c))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Literal(Value::String(s)) => {
                write!(f, "'")?;
                for ch in s.chars() {
                    if ch == '\'' || ch == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                write!(f, "'")
            }
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Unary { op, operand } => write!(f, "({}{})", op, operand),
            Expr::Binary { op, left, right } if op.is_field_access() => {
                write!(f, "({}{}{})", left, op, right)
            }
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::Grouping(inner) => write!(f, "({})", inner),
        }
    }
}
