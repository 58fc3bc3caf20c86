use thiserror::Error;

use crate::kind::TreeKind;

/// Errors produced by tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: TreeKind },

    #[error("expected a sequence, found {found}")]
    NotASequence { found: TreeKind },
}
