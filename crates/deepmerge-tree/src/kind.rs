use std::fmt;

use serde::{Deserialize, Serialize};

/// The concrete kind of a tree node.
///
/// Scalars are split by their primitive type so that sequences can be checked
/// for homogeneity before sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeKind {
    Nil,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl TreeKind {
    /// Returns `true` for kinds with a natural total order usable for sorting.
    pub fn is_naturally_ordered(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::String)
    }

    /// Lower-case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
