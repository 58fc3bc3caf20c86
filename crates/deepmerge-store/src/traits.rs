use std::collections::BTreeMap;

use crate::error::StoreResult;

/// A string-keyed, string-valued store.
///
/// All implementations must satisfy these invariants:
/// - `get_value` on a missing key returns `StoreError::NotFound`.
/// - `get_value_tree` returns every key starting with the prefix, including
///   the prefix itself when it is a key.
/// - `set_value` is an upsert; the new value is visible to later reads.
pub trait KeyValueStore: Send + Sync {
    /// Read a single value.
    fn get_value(&self, key: &str) -> StoreResult<String>;

    /// Read every key/value pair under `prefix`.
    fn get_value_tree(&self, prefix: &str) -> StoreResult<BTreeMap<String, String>>;

    /// Create or replace a value.
    fn set_value(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Reject empty keys.
pub(crate) fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(crate::error::StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Every entry of `map` whose key starts with `prefix`.
pub(crate) fn select_prefix(
    map: &BTreeMap<String, String>,
    prefix: &str,
) -> BTreeMap<String, String> {
    map.range(prefix.to_string()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
