use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TreeError;
use crate::kind::TreeKind;
use crate::scalar::Scalar;

/// String-keyed mapping of trees.
///
/// Keys are unique. Insertion order is preserved so that merged output is
/// deterministic, but equality ignores order.
pub type Mapping = IndexMap<String, Tree>;

/// A recursive tree value.
///
/// Any JSON document maps onto this model losslessly. Ownership follows the
/// value: functions that consume a `Tree` and return one hand back the sole
/// valid handle to the result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    #[default]
    Nil,
    Scalar(Scalar),
    Sequence(Vec<Tree>),
    Mapping(Mapping),
}

impl Tree {
    /// An empty mapping.
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// An empty sequence.
    pub fn empty_sequence() -> Self {
        Self::Sequence(Vec::new())
    }

    /// The concrete kind of this node.
    pub fn kind(&self) -> TreeKind {
        match self {
            Self::Nil => TreeKind::Nil,
            Self::Scalar(s) => s.kind(),
            Self::Sequence(_) => TreeKind::Sequence,
            Self::Mapping(_) => TreeKind::Mapping,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::String(_)))
    }

    /// Borrow the string payload, if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Tree]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a value by key if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Unwrap a mapping, or report what was found instead.
    pub fn into_mapping(self) -> Result<Mapping, TreeError> {
        match self {
            Self::Mapping(m) => Ok(m),
            other => Err(TreeError::NotAMapping {
                found: other.kind(),
            }),
        }
    }

    /// Unwrap a sequence, or report what was found instead.
    pub fn into_sequence(self) -> Result<Vec<Tree>, TreeError> {
        match self {
            Self::Sequence(items) => Ok(items),
            other => Err(TreeError::NotASequence {
                found: other.kind(),
            }),
        }
    }
}

impl From<Scalar> for Tree {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::from(s))
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Tree {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for Tree {
    fn from(i: i32) -> Self {
        Self::Scalar(Scalar::from(i))
    }
}

impl From<f64> for Tree {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Tree {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl FromIterator<Tree> for Tree {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Nil,
            Value::Bool(b) => Self::from(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::from(i),
                // u64 beyond i64::MAX and every non-integer land here.
                None => Self::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::from(s),
            Value::Array(items) => items.into_iter().map(Tree::from).collect(),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Tree::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        match tree {
            Tree::Nil => Value::Null,
            Tree::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            Tree::Scalar(Scalar::Int(i)) => Value::from(i),
            // Non-finite floats have no JSON form.
            Tree::Scalar(Scalar::Float(x)) => serde_json::Number::from_f64(x)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Tree::Scalar(Scalar::String(s)) => Value::String(s),
            Tree::Sequence(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Tree::Mapping(m) => Value::Object(
                m.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
