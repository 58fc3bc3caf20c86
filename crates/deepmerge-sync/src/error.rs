use std::path::PathBuf;

use deepmerge_engine::MergeError;
use deepmerge_store::StoreError;
use deepmerge_tree::TreeError;

/// Errors from document loading, folder merges, and store sync.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Reading or writing a file or directory failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed. `origin` names the file or input.
    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// A document root was not a mapping.
    #[error("document root must be a mapping: {0}")]
    NotAMapping(#[from] TreeError),

    /// The file extension does not name a supported format.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),

    /// An app directory has no base layer.
    #[error("no default layer found in {dir}")]
    MissingDefault { dir: PathBuf },

    /// A document could not be rendered.
    #[error("failed to render document: {0}")]
    Render(String),

    /// The merge engine rejected a layer.
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),

    /// The key-value store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
