//! Public AST types for format strings and plural-forms expressions.
//!
//! These types are public so tooling can inspect parsed templates and rules.

use serde::{Deserialize, Serialize};

/// A parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub segments: Vec<Segment>,
}

/// A segment within a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied verbatim.
    Literal(String),
    /// A `%(name)[width]kind` directive.
    Directive(Directive),
}

/// A placeholder naming a variable, optional width and conversion kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Variable name inside the parentheses.
    pub name: String,
    /// Minimum rendered width.
    pub width: Option<usize>,
    /// Width token started with `0`.
    pub zero_pad: bool,
    /// Conversion applied to the bound value.
    pub kind: Conversion,
}

/// Conversion kinds accepted in directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `s`
    String,
    /// `d`
    Integer,
    /// `f`
    Float,
}

impl Conversion {
    /// Map a type letter to a conversion.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            's' => Some(Conversion::String),
            'd' => Some(Conversion::Integer),
            'f' => Some(Conversion::Float),
            _ => None,
        }
    }

    /// Whether a leading `0` in the width pads with zeros for this kind.
    pub fn is_numeric(self) -> bool {
        matches!(self, Conversion::Integer | Conversion::Float)
    }
}

/// A plural-forms expression tree.
///
/// Serializes to adjacently tagged JSON (`{"op":"n"}`,
/// `{"op":"literal","args":1}`, `{"op":"binary","args":["%",lhs,rhs]}`)
/// which the embedded JavaScript runtime interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "lowercase")]
pub enum Expr {
    /// The count variable `n`.
    N,
    /// An integer literal.
    Literal(i64),
    /// Logical negation `!e`.
    Not(Box<Expr>),
    /// A binary operation.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `cond ? then : else`
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

/// Binary operators of the plural-forms grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Remainder,
}

impl BinaryOp {
    /// The operator's source token.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::N => write!(f, "n"),
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Not(inner) => write!(f, "!{inner}"),
            Expr::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Conditional(cond, then, otherwise) => {
                write!(f, "({cond} ? {then} : {otherwise})")
            }
        }
    }
}
