//! Recursive tree merge engine.
//!
//! Combines a source [`Tree`] into a destination tree under an explicit
//! [`MergeConfig`]: mappings merge key-wise, sequences are reconciled
//! (union, positional merge, overwrite, sort, de-duplication), and strings
//! carrying a knockout prefix delete destination content instead of adding
//! to it.
//!
//! Every call is pure and synchronous. The destination is taken by value and
//! the merged tree is returned; use the returned value as the only handle to
//! the result.
//!
//! Recursion depth equals tree depth. Documents parsed from JSON stay within
//! serde_json's nesting limit of 128; trees nested several hundred levels deep
//! that are built in code should be merged on a thread with a larger stack
//! (see [`std::thread::Builder::stack_size`]).
//!
//! # Key Types
//!
//! - [`MergeConfig`] -- Per-call options with chaining builders and presets
//! - [`MergeError`] -- Invalid configuration or unexpected result shape
//!
//! # Example
//!
//! ```
//! use deepmerge_engine::{merge_with_config, MergeConfig};
//! use deepmerge_tree::Tree;
//!
//! let src = Tree::from(serde_json::json!({"p": ["1", "3"]}));
//! let dest = Tree::from(serde_json::json!({"p": ["2", "4"]}));
//! let merged = merge_with_config(src, dest, &MergeConfig::new()).unwrap();
//! assert_eq!(merged, Tree::from(serde_json::json!({"p": ["2", "4", "1", "3"]})));
//! ```

pub mod config;
mod engine;
pub mod error;
mod knockout;
mod sequence;
mod trace;
pub mod utils;

#[cfg(test)]
mod scenarios;

pub use config::{MergeConfig, DEFAULT_KNOCKOUT_PREFIX};
pub use error::{MergeError, MergeResult};

use deepmerge_tree::{Mapping, Tree};
use tracing::debug;

use crate::trace::Trace;

/// Merge `src` into `dest` with the default configuration.
pub fn merge_default(src: Tree, dest: Tree) -> Tree {
    // The default configuration always validates, so this never fails.
    merge_with_config(src, dest, &MergeConfig::default()).unwrap_or_default()
}

/// Merge `src` into `dest` under `config`.
///
/// Fails with [`MergeError::InvalidConfiguration`] before touching either
/// tree when the configuration is inconsistent.
pub fn merge_with_config(src: Tree, dest: Tree, config: &MergeConfig) -> MergeResult<Tree> {
    debug!(
        src = %src.kind(),
        dest = %dest.kind(),
        "merging trees"
    );
    engine::merge_node(src, dest, config, Trace::root(config))
}

/// Merge two documents whose roots are mappings.
///
/// Any non-mapping result is reported as
/// [`MergeError::UnexpectedResultShape`].
pub fn merge_documents(src: Mapping, dest: Mapping, config: &MergeConfig) -> MergeResult<Mapping> {
    match merge_with_config(Tree::Mapping(src), Tree::Mapping(dest), config)? {
        Tree::Mapping(merged) => Ok(merged),
        other => Err(MergeError::UnexpectedResultShape {
            found: other.kind(),
        }),
    }
}
