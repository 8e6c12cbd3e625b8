//! Plural-forms expression parser using winnow.
//!
//! Parses the C-like expression found after `plural=` in a catalog header.
//! Precedence, lowest first:
//! - `?:` (right-associative)
//! - `||`
//! - `&&`
//! - `==` `!=`
//! - `<` `<=` `>` `>=`
//! - `+` `-`
//! - `*` `/` `%`
//! - unary `!`
//! - integer literals, `n`, parenthesized expressions

use winnow::ascii::digit1;
use winnow::combinator::{cut_err, delimited, opt};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{BinaryOp, Expr};
use super::error::{PluralError, calculate_position};

/// Longest accepted expression, in characters.
pub const MAX_EXPRESSION_LENGTH: usize = 1000;

/// Deepest accepted parenthesis nesting.
const MAX_NESTING: usize = 64;

const OR_OPS: &[(&str, BinaryOp)] = &[("||", BinaryOp::Or)];
const AND_OPS: &[(&str, BinaryOp)] = &[("&&", BinaryOp::And)];
const EQUALITY_OPS: &[(&str, BinaryOp)] =
    &[("==", BinaryOp::Equal), ("!=", BinaryOp::NotEqual)];
const RELATIONAL_OPS: &[(&str, BinaryOp)] = &[
    ("<=", BinaryOp::LessOrEqual),
    (">=", BinaryOp::GreaterOrEqual),
    ("<", BinaryOp::Less),
    (">", BinaryOp::Greater),
];
const ADDITIVE_OPS: &[(&str, BinaryOp)] = &[("+", BinaryOp::Add), ("-", BinaryOp::Subtract)];
const MULTIPLICATIVE_OPS: &[(&str, BinaryOp)] = &[
    ("*", BinaryOp::Multiply),
    ("/", BinaryOp::Divide),
    ("%", BinaryOp::Remainder),
];

/// Parse a plural-forms expression into an expression tree.
///
/// The length limit is checked before any parsing work.
///
/// # Errors
///
/// - [`PluralError::ExpressionTooLong`] for input over
///   [`MAX_EXPRESSION_LENGTH`] characters.
/// - [`PluralError::InvalidExpression`] for anything outside the grammar.
///
/// # Example
///
/// ```
/// use jstrans::parser::{BinaryOp, Expr, parse_plural};
///
/// let expr = parse_plural("n != 1").unwrap();
/// assert_eq!(
///     expr,
///     Expr::Binary(BinaryOp::NotEqual, Box::new(Expr::N), Box::new(Expr::Literal(1)))
/// );
/// ```
pub fn parse_plural(source: &str) -> Result<Expr, PluralError> {
    let length = source.chars().count();
    if length > MAX_EXPRESSION_LENGTH {
        return Err(PluralError::ExpressionTooLong {
            length,
            limit: MAX_EXPRESSION_LENGTH,
        });
    }
    check_nesting(source)?;

    let mut remaining = source;
    match expression(&mut remaining) {
        Ok(expr) => {
            let _ = ws(&mut remaining);
            if remaining.is_empty() {
                Ok(expr)
            } else {
                let (_, column) = calculate_position(source, remaining);
                Err(PluralError::InvalidExpression {
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(e) => {
            let (_, column) = calculate_position(source, remaining);
            let message = match &e {
                ErrMode::Backtrack(context) | ErrMode::Cut(context)
                    if context.context().next().is_some() =>
                {
                    context.to_string()
                }
                _ if remaining.is_empty() => "unexpected end of expression".to_string(),
                _ => format!(
                    "unexpected character: '{}'",
                    remaining.chars().next().unwrap_or('?')
                ),
            };
            Err(PluralError::InvalidExpression { column, message })
        }
    }
}

/// Reject pathological parenthesis nesting before recursing into it.
fn check_nesting(source: &str) -> Result<(), PluralError> {
    let mut depth = 0usize;
    for (index, c) in source.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(PluralError::InvalidExpression {
                        column: source[..index].chars().count() + 1,
                        message: format!("parentheses nested deeper than {MAX_NESTING} levels"),
                    });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// `or_expr ('?' expression ':' expression)?`
fn expression(input: &mut &str) -> ModalResult<Expr> {
    let condition = or_expr(input)?;
    ws(input)?;
    if opt('?').parse_next(input)?.is_none() {
        return Ok(condition);
    }
    let then = cut_err(expression).parse_next(input)?;
    ws(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    let otherwise = cut_err(expression).parse_next(input)?;
    Ok(Expr::Conditional(
        Box::new(condition),
        Box::new(then),
        Box::new(otherwise),
    ))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, and_expr, OR_OPS)
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, equality, AND_OPS)
}

fn equality(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, relational, EQUALITY_OPS)
}

fn relational(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, additive, RELATIONAL_OPS)
}

fn additive(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, multiplicative, ADDITIVE_OPS)
}

fn multiplicative(input: &mut &str) -> ModalResult<Expr> {
    left_assoc(input, unary, MULTIPLICATIVE_OPS)
}

/// Fold `operand (op operand)*` to the left.
fn left_assoc<'i>(
    input: &mut &'i str,
    operand: fn(&mut &'i str) -> ModalResult<Expr>,
    operators: &[(&'static str, BinaryOp)],
) -> ModalResult<Expr> {
    let mut lhs = operand(input)?;
    loop {
        ws(input)?;
        let Some(op) = operator(input, operators) else {
            return Ok(lhs);
        };
        let rhs = cut_err(operand).parse_next(input)?;
        lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
    }
}

/// Consume the first operator token in `operators` that prefixes the input.
fn operator<'i>(
    input: &mut &'i str,
    operators: &[(&'static str, BinaryOp)],
) -> Option<BinaryOp> {
    let current: &'i str = *input;
    let (rest, op) = operators
        .iter()
        .find_map(|&(token, op)| current.strip_prefix(token).map(|rest| (rest, op)))?;
    *input = rest;
    Some(op)
}

/// `'!' unary | primary`
fn unary(input: &mut &str) -> ModalResult<Expr> {
    ws(input)?;
    if input.starts_with('!') && !input.starts_with("!=") {
        '!'.parse_next(input)?;
        let inner = cut_err(unary).parse_next(input)?;
        return Ok(Expr::Not(Box::new(inner)));
    }
    primary(input)
}

/// Integer literal, `n`, or a parenthesized expression.
fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws(input)?;
    match input.chars().next() {
        Some('n') => 'n'.value(Expr::N).parse_next(input),
        Some('(') => delimited(
            '(',
            cut_err(expression),
            (
                ws,
                cut_err(')').context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
            ),
        )
        .parse_next(input),
        Some(c) if c.is_ascii_digit() => digit1
            .try_map(|digits: &str| digits.parse::<i64>())
            .map(Expr::Literal)
            .context(StrContext::Label("integer literal"))
            .parse_next(input),
        _ => Err(ErrMode::Backtrack(ContextError::new())),
    }
}

/// Skip optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
