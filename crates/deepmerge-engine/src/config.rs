use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// Knockout prefix used by [`MergeConfig::deeper_merge_ko`] and
/// [`MergeConfig::with_default_knockout_prefix`].
pub const DEFAULT_KNOCKOUT_PREFIX: &str = "--";

/// Options controlling a single merge call.
///
/// Builders set one field each and return the config for chaining. Nothing is
/// validated while building; [`MergeConfig::validate`] runs at every step of
/// the merge and aborts the whole call before any tree data is touched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Discard a source value that cannot merge into a structurally
    /// incompatible destination instead of overwriting the destination.
    pub preserve_unmergeables: bool,
    /// Marks source strings and sequence elements that delete rather than add.
    pub knockout_prefix: Option<String>,
    /// Replace sequences wholesale instead of reconciling them.
    pub overwrite_arrays: bool,
    /// Append a source value to a destination sequence of incompatible shape.
    pub extend_existing_arrays: bool,
    /// Sort every reconciled sequence.
    pub sort_merged_arrays: bool,
    /// Join then re-split string sequences on this separator before
    /// reconciling them. An empty separator disables unpacking.
    pub unpack_arrays: Option<String>,
    /// Merge sequences of mappings element-by-element by position.
    pub merge_hash_arrays: bool,
    /// Append sequence elements without de-duplication.
    pub keep_array_duplicates: bool,
    /// Merge `Nil` source values instead of treating them as no-ops.
    pub merge_nil_values: bool,
    /// Emit `tracing` debug events for every merge step.
    pub debug: bool,
    /// Starting depth for debug event indentation.
    pub debug_indent: usize,
}

impl MergeConfig {
    /// Default options: overwrite unmergeables, union sequences, no knockout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep destination values that the source cannot merge into.
    pub fn deeper_merge() -> Self {
        Self::new().with_preserve_unmergeables(true)
    }

    /// Overwrite destination values that the source cannot merge into.
    pub fn deeper_merge_bang() -> Self {
        Self::new().with_overwrite_unmergeables(true)
    }

    /// Overwrite unmergeables and honour the `--` knockout prefix.
    pub fn deeper_merge_ko() -> Self {
        Self::new()
            .with_default_knockout_prefix()
            .with_overwrite_unmergeables(true)
    }

    /// Parse a config from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        toml::from_str(s).map_err(|e| MergeError::ConfigParse(e.to_string()))
    }

    pub fn with_preserve_unmergeables(mut self, preserve: bool) -> Self {
        self.preserve_unmergeables = preserve;
        self
    }

    pub fn with_overwrite_unmergeables(mut self, overwrite: bool) -> Self {
        self.preserve_unmergeables = !overwrite;
        self
    }

    pub fn with_knockout(mut self, prefix: impl Into<String>) -> Self {
        self.knockout_prefix = Some(prefix.into());
        self
    }

    pub fn with_default_knockout_prefix(self) -> Self {
        self.with_knockout(DEFAULT_KNOCKOUT_PREFIX)
    }

    pub fn with_overwrite_arrays(mut self, overwrite: bool) -> Self {
        self.overwrite_arrays = overwrite;
        self
    }

    pub fn with_extend_existing_arrays(mut self, extend: bool) -> Self {
        self.extend_existing_arrays = extend;
        self
    }

    pub fn with_sort_merged_arrays(mut self, sort: bool) -> Self {
        self.sort_merged_arrays = sort;
        self
    }

    pub fn with_unpack_arrays(mut self, separator: impl Into<String>) -> Self {
        self.unpack_arrays = Some(separator.into());
        self
    }

    pub fn with_merge_hash_arrays(mut self, merge: bool) -> Self {
        self.merge_hash_arrays = merge;
        self
    }

    pub fn with_keep_array_duplicates(mut self, keep: bool) -> Self {
        self.keep_array_duplicates = keep;
        self
    }

    pub fn with_merge_nil_values(mut self, merge: bool) -> Self {
        self.merge_nil_values = merge;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn enable_debug(self) -> Self {
        self.with_debug(true)
    }

    pub fn with_debug_indent(mut self, indent: usize) -> Self {
        self.debug_indent = indent;
        self
    }

    /// The unpack separator, if unpacking is enabled.
    pub fn unpack_separator(&self) -> Option<&str> {
        self.unpack_arrays.as_deref().filter(|sep| !sep.is_empty())
    }

    /// Check option combinations.
    ///
    /// - A knockout prefix, when present, must be non-empty.
    /// - A knockout prefix requires `preserve_unmergeables == false`.
    pub fn validate(&self) -> MergeResult<()> {
        match self.knockout_prefix.as_deref() {
            Some("") => Err(MergeError::InvalidConfiguration(
                "knockout prefix cannot be an empty string".into(),
            )),
            Some(_) if self.preserve_unmergeables => Err(MergeError::InvalidConfiguration(
                "knockout prefix requires preserve_unmergeables to be false".into(),
            )),
            _ => Ok(()),
        }
    }
}
