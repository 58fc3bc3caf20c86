//! Reconciling flattened merge results with a key-value store.

use std::collections::BTreeMap;

use deepmerge_store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SyncResult;
use crate::flatten::flatten;
use crate::folder::AppLayers;

/// Separator used for store keys.
pub const KEY_SEPARATOR: &str = "/";

/// What happened to a single key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "reason", rename_all = "snake_case")]
pub enum SyncAction {
    /// The store already holds the desired value.
    InSync,
    /// The value differs but this was a dry run.
    NeedsUpdate,
    /// The store was updated.
    Updated,
    /// The update failed.
    Failed(String),
}

/// Outcome for one desired key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySync {
    pub key: String,
    pub new_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(flatten)]
    pub action: SyncAction,
}

/// The result of a store sync, ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub dry_run: bool,
    pub keys: Vec<KeySync>,
}

impl SyncReport {
    /// Returns `true` if no keys were considered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of keys considered.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Number of keys already in sync.
    pub fn in_sync(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::InSync))
    }

    /// Number of keys that a real run would update.
    pub fn needs_update(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::NeedsUpdate))
    }

    /// Number of keys updated.
    pub fn updated(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Updated))
    }

    /// Number of keys whose update failed.
    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&SyncAction) -> bool) -> usize {
        self.keys.iter().filter(|k| pred(&k.action)).count()
    }
}

/// Flatten folder-merge results into store keys.
///
/// Each document lands under `<prefix><app>/<slug>/`.
pub fn desired_state(results: &[AppLayers], prefix: &str) -> BTreeMap<String, String> {
    let mut desired = BTreeMap::new();
    for layers in results {
        for (slug, doc) in &layers.merged_by_slug {
            for (key, value) in flatten(doc, KEY_SEPARATOR) {
                let full = format!(
                    "{prefix}{app}{sep}{slug}{sep}{key}",
                    app = layers.app,
                    sep = KEY_SEPARATOR
                );
                desired.insert(full, value);
            }
        }
    }
    desired
}

/// Bring `store` in line with `desired`.
///
/// Remote values under `prefix` are read once; keys match case-insensitively.
/// A failed write is recorded in the report and the sync continues; a failed
/// read of the remote tree aborts.
pub fn sync_to_store(
    desired: &BTreeMap<String, String>,
    store: &dyn KeyValueStore,
    prefix: &str,
    dry_run: bool,
) -> SyncResult<SyncReport> {
    let remote = store.get_value_tree(prefix)?;
    debug!(prefix, remote = remote.len(), desired = desired.len(), "syncing store");

    let mut keys = Vec::with_capacity(desired.len());
    for (key, value) in desired {
        let old_value = lookup_ignore_case(&remote, key).cloned();
        let action = if old_value.as_deref() == Some(value.as_str()) {
            SyncAction::InSync
        } else if dry_run {
            SyncAction::NeedsUpdate
        } else {
            match store.set_value(key, value) {
                Ok(()) => {
                    info!(key = %key, "updated");
                    SyncAction::Updated
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "update failed");
                    SyncAction::Failed(e.to_string())
                }
            }
        };
        keys.push(KeySync {
            key: key.clone(),
            new_value: value.clone(),
            old_value,
            action,
        });
    }

    Ok(SyncReport { dry_run, keys })
}

fn lookup_ignore_case<'a>(remote: &'a BTreeMap<String, String>, key: &str) -> Option<&'a String> {
    remote.get(key).or_else(|| {
        let folded = key.to_lowercase();
        remote
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(_, v)| v)
    })
}
