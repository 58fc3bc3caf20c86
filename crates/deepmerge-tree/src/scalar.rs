use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::TreeKind;

/// A leaf value.
///
/// The merge engine treats scalars as opaque beyond their type identity:
/// `Int(1)` and `Float(1.0)` are different values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// The concrete kind of this scalar.
    pub fn kind(&self) -> TreeKind {
        match self {
            Self::Bool(_) => TreeKind::Bool,
            Self::Int(_) => TreeKind::Int,
            Self::Float(_) => TreeKind::Float,
            Self::String(_) => TreeKind::String,
        }
    }

    /// Borrow the string payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Plain-text rendering: strings unquoted, numbers and booleans as literals.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
