use std::borrow::Cow;

use tracing::debug;

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    context::Context,
    error::{Error, RuntimeError},
    parser::parse_str,
    value::Value,
};

/// The expression evaluator.
///
/// Walks a parsed [`Expr`] against a borrowed [`Context`]. Neither the tree
/// nor the context is modified, so one tree can be evaluated repeatedly
/// against different contexts.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'ctx> {
    context: &'ctx Context,
}

impl<'ctx> Evaluator<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Evaluator { context }
    }

    /// Evaluates an expression to a single value.
    ///
    /// # Arguments
    ///
    /// * `expr` - The parsed expression to evaluate
    ///
    /// # Errors
    ///
    /// Fails only when plain field access (`.`) is applied to a null or
    /// undefined value. Missing variables and fields evaluate to
    /// [`Value::Undefined`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig_lang::{Context, Evaluator, Value, parse_str};
    ///
    /// let mut ctx = Context::new();
    /// ctx.insert("a", Value::Null);
    /// ctx.insert("b", 5);
    ///
    /// let expr = parse_str("a ?? b").unwrap();
    /// let result = Evaluator::new(&ctx).evaluate(&expr).unwrap();
    /// assert_eq!(result, Value::Integer(5));
    /// ```
    pub fn evaluate(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        debug!(%expr, "evaluating expression");
        self.eval_expr(expr)
            .map(Cow::into_owned)
            .inspect_err(|e| debug!(error = %e, "evaluation failed"))
    }

    // Values are borrowed from the tree or the context wherever possible; only
    // the final result is cloned.
    fn eval_expr<'a>(&self, expr: &'a Expr) -> Result<Cow<'a, Value>, RuntimeError>
    where
        'ctx: 'a,
    {
        match expr {
            Expr::Literal(value) => Ok(Cow::Borrowed(value)),
            Expr::Grouping(inner) => self.eval_expr(inner),
            Expr::Identifier(name) => Ok(self
                .context
                .lookup(name)
                .map_or(Cow::Owned(Value::Undefined), Cow::Borrowed)),
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => {
                let value = self.eval_expr(operand)?;
                Ok(Cow::Owned(Value::Boolean(!value.is_truthy())))
            }
            Expr::Binary { op, left, right } if op.is_field_access() => {
                let object = self.eval_expr(left)?;
                self.apply_access(*op, object, right)
            }
            Expr::Binary { op, left, right } => {
                // Both operands are always evaluated; `&&`/`||` do not short-circuit.
                let left_val = self.eval_expr(left)?;
                let right_val = self.eval_expr(right)?;
                Ok(apply_binop(*op, left_val, right_val))
            }
        }
    }

    fn apply_access<'a>(
        &self,
        op: BinOp,
        object: Cow<'a, Value>,
        field: &Expr,
    ) -> Result<Cow<'a, Value>, RuntimeError> {
        // The parser only ever puts an identifier on the right of `.`/`?.`.
        let Expr::Identifier(name) = field else {
            return Ok(Cow::Owned(Value::Undefined));
        };

        if object.is_nullish() {
            return match op {
                BinOp::NullableFieldAccess => Ok(Cow::Owned(Value::Null)),
                _ => Err(RuntimeError::NullFieldAccess {
                    field: name.to_string(),
                    base: object.type_name(),
                }),
            };
        }
        Ok(match object {
            Cow::Borrowed(value) => value.lookup(name),
            Cow::Owned(value) => Cow::Owned(value.field(name)),
        })
    }
}

fn apply_binop<'a>(op: BinOp, left: Cow<'a, Value>, right: Cow<'a, Value>) -> Cow<'a, Value> {
    match op {
        BinOp::Equals => Cow::Owned(Value::Boolean(left.strict_equals(&right))),
        BinOp::And => {
            if left.is_truthy() {
                right
            } else {
                left
            }
        }
        BinOp::Or => {
            if left.is_truthy() {
                left
            } else {
                right
            }
        }
        BinOp::NullCoalescing => {
            if left.is_nullish() {
                right
            } else {
                left
            }
        }
        BinOp::FieldAccess | BinOp::NullableFieldAccess => Cow::Owned(Value::Undefined),
    }
}

/// Parse `source` and evaluate it against `context` in one step.
pub fn evaluate_str(source: &str, context: &Context) -> Result<Value, Error> {
    let expr = parse_str(source)?;
    Ok(Evaluator::new(context).evaluate(&expr)?)
}
