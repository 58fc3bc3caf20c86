//! Error types for the merge engine.

use deepmerge_tree::TreeKind;

/// Errors that can occur during a merge.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// The configuration combines options that cannot be honoured together.
    /// Raised before any tree data is touched.
    #[error("invalid merge configuration: {0}")]
    InvalidConfiguration(String),

    /// A document-level merge produced something other than a mapping.
    #[error("unexpected merge result: expected mapping, got {found}")]
    UnexpectedResultShape { found: TreeKind },

    /// A serialized merge configuration could not be parsed.
    #[error("failed to parse merge configuration: {0}")]
    ConfigParse(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
