//! Compiled plural-forms rules.
//!
//! A rule is parsed once into an [`Expr`] tree and evaluated by walking the
//! tree. Evaluation cannot fail: arithmetic wraps and division or remainder
//! by zero yields 0, so a rule that compiled is safe to call at lookup time.

use serde::{Deserialize, Serialize};

use crate::parser::{BinaryOp, Expr, PluralError, parse_plural};

/// A compiled plural-forms rule mapping a count to a plural-form index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluralRule {
    expr: Expr,
}

impl PluralRule {
    /// Compile a plural-forms expression.
    ///
    /// # Errors
    ///
    /// Returns [`PluralError::ExpressionTooLong`] or
    /// [`PluralError::InvalidExpression`]; see [`parse_plural`].
    ///
    /// # Example
    ///
    /// ```
    /// use jstrans::PluralRule;
    ///
    /// let rule = PluralRule::compile("n != 1").unwrap();
    /// assert_eq!(rule.index(0), 1);
    /// assert_eq!(rule.index(1), 0);
    /// assert_eq!(rule.index(2), 1);
    /// ```
    pub fn compile(source: &str) -> Result<Self, PluralError> {
        parse_plural(source).map(|expr| PluralRule { expr })
    }

    /// Wrap an already-parsed expression.
    pub fn from_expr(expr: Expr) -> Self {
        PluralRule { expr }
    }

    /// The expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the raw expression value for `n`.
    pub fn evaluate(&self, n: u64) -> i64 {
        eval(&self.expr, i64::try_from(n).unwrap_or(i64::MAX))
    }

    /// The plural-form index for `n`. Negative results clamp to 0.
    pub fn index(&self, n: u64) -> usize {
        usize::try_from(self.evaluate(n)).unwrap_or(0)
    }
}

/// The rule used when a catalog declares none: `n == 1 ? 0 : 1`.
pub fn default_plural_index(n: u64) -> usize {
    usize::from(n != 1)
}

fn eval(expr: &Expr, n: i64) -> i64 {
    match expr {
        Expr::N => n,
        Expr::Literal(value) => *value,
        Expr::Not(inner) => i64::from(eval(inner, n) == 0),
        Expr::Conditional(condition, then, otherwise) => {
            if eval(condition, n) != 0 {
                eval(then, n)
            } else {
                eval(otherwise, n)
            }
        }
        Expr::Binary(BinaryOp::And, lhs, rhs) => i64::from(eval(lhs, n) != 0 && eval(rhs, n) != 0),
        Expr::Binary(BinaryOp::Or, lhs, rhs) => i64::from(eval(lhs, n) != 0 || eval(rhs, n) != 0),
        Expr::Binary(op, lhs, rhs) => apply(*op, eval(lhs, n), eval(rhs, n)),
    }
}

fn apply(op: BinaryOp, a: i64, b: i64) -> i64 {
    match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Subtract => a.wrapping_sub(b),
        BinaryOp::Multiply => a.wrapping_mul(b),
        BinaryOp::Divide => a.checked_div(b).unwrap_or(0),
        BinaryOp::Remainder => a.checked_rem(b).unwrap_or(0),
        BinaryOp::Equal => i64::from(a == b),
        BinaryOp::NotEqual => i64::from(a != b),
        BinaryOp::Less => i64::from(a < b),
        BinaryOp::LessOrEqual => i64::from(a <= b),
        BinaryOp::Greater => i64::from(a > b),
        BinaryOp::GreaterOrEqual => i64::from(a >= b),
        BinaryOp::And => i64::from(a != 0 && b != 0),
        BinaryOp::Or => i64::from(a != 0 || b != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_yields_zero() {
        let rule = PluralRule::compile("10 / (n - 1) + 10 % (n - 1)").unwrap();
        assert_eq!(rule.evaluate(1), 0);
        assert_eq!(rule.evaluate(3), 5);
    }

    #[test]
    fn negative_results_clamp_to_zero() {
        let rule = PluralRule::compile("n - 5").unwrap();
        assert_eq!(rule.evaluate(2), -3);
        assert_eq!(rule.index(2), 0);
    }

    #[test]
    fn logical_operators_short_circuit_to_booleans() {
        let rule = PluralRule::compile("(n && 7) + (0 || n) * 10").unwrap();
        assert_eq!(rule.evaluate(3), 11);
        assert_eq!(rule.evaluate(0), 0);
    }
}
