use crate::interpreter::number;

/// A runtime value bound to a `%(name)` directive.
///
/// Mirrors the three kinds of value a JavaScript caller can hand to the
/// compiled runtime: strings, integral numbers, and floating-point numbers.
///
/// # Example
///
/// ```
/// use jstrans::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let ratio: Value = 0.5.into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.to_string(), "Alice");
/// assert_eq!(ratio.to_string(), "0.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),

    /// An integer number.
    Integer(i64),

    /// A floating-point number.
    Float(f64),
}

impl Value {
    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of this value, following JavaScript `ToNumber`.
    ///
    /// Strings that do not parse as a number become `NaN`; the empty string
    /// becomes `0`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::String(s) => number::string_to_number(s),
            Value::Integer(n) => *n as f64,
            Value::Float(f) => *f,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{}", number::number_to_string(*n)),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
