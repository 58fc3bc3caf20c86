//! Layered merge of a folder of per-app configuration files.
//!
//! ```text
//! source/
//!   billing/
//!     default.json      base layer
//!     prod.json         default <- prod
//!     prod.eu.json      default <- prod <- prod.eu
//!     qa.toml           default <- qa
//!     qa.us.yml         default <- qa <- qa.us
//! ```
//!
//! Every immediate sub-directory of the source folder is an app. Within an
//! app, the document whose file stem ends with `default` is the base layer and
//! every other document is an override. A dotted override stem stacks onto the
//! merged result of the part before the first dot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use deepmerge_engine::{merge_documents, MergeConfig};
use deepmerge_tree::Mapping;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::{is_document, load_document, write_document, DocumentFormat};
use crate::error::{SyncError, SyncResult};

/// Merged documents for one app, keyed by override slug.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppLayers {
    /// App directory name.
    pub app: String,
    /// Merged document per override file stem.
    pub merged_by_slug: BTreeMap<String, Mapping>,
}

/// The merge policy used for layered folders: overwrite unmergeables and merge
/// sequences of mappings by position. `debug` traces every merge step.
pub fn folder_merge_config(debug: bool) -> MergeConfig {
    MergeConfig::deeper_merge_bang()
        .with_merge_hash_arrays(true)
        .with_debug(debug)
}

/// Merge every app under `root`. Apps are returned sorted by name.
pub fn merge_folder(root: &Path, config: &MergeConfig) -> SyncResult<Vec<AppLayers>> {
    let mut app_dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| SyncError::io(root, e))? {
        let path = entry.map_err(|e| SyncError::io(root, e))?.path();
        if path.is_dir() {
            app_dirs.push(path);
        }
    }
    app_dirs.sort();

    app_dirs
        .iter()
        .map(|dir| merge_app(dir, config))
        .collect()
}

/// Merge the layers of a single app directory.
pub fn merge_app(dir: &Path, config: &MergeConfig) -> SyncResult<AppLayers> {
    let app = file_name(dir);
    let (default_file, overrides) = classify_layers(dir)?;
    let base = load_document(&default_file)?;
    debug!(app = %app, base = %default_file.display(), overrides = overrides.len(), "merging app");

    let mut merged_by_slug: BTreeMap<String, Mapping> = BTreeMap::new();
    for path in &overrides {
        let slug = file_stem(path);
        let mut dest = base.clone();

        if let Some((base_slug, _)) = slug.split_once('.') {
            match merged_by_slug.get(base_slug) {
                Some(parent) => {
                    debug!(slug = %slug, base_slug, "stacking onto base slug");
                    dest = merge_documents(parent.clone(), dest, config)?;
                }
                None => warn!(
                    app = %app,
                    slug = %slug,
                    base_slug,
                    "base slug not found; merging onto default only"
                ),
            }
        }

        let src = load_document(path)?;
        let merged = merge_documents(src, dest, config)?;
        merged_by_slug.insert(slug, merged);
    }

    info!(app = %app, layers = merged_by_slug.len(), "merged app");
    Ok(AppLayers {
        app,
        merged_by_slug,
    })
}

/// Split an app directory into its base layer and its overrides.
///
/// Overrides are ordered by ascending path length, ties by name, so a slug is
/// always merged before the dotted slugs that stack on it.
fn classify_layers(dir: &Path) -> SyncResult<(PathBuf, Vec<PathBuf>)> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))? {
        let path = entry.map_err(|e| SyncError::io(dir, e))?.path();
        if path.is_file() && is_document(&path) {
            documents.push(path);
        }
    }
    documents.sort();

    let mut default_file = None;
    let mut overrides = Vec::new();
    for path in documents {
        if file_stem(&path).ends_with("default") {
            if default_file.is_none() {
                default_file = Some(path);
            } else {
                warn!(ignored = %path.display(), "multiple default layers; ignoring extra");
            }
        } else {
            overrides.push(path);
        }
    }
    overrides.sort_by_key(|p| p.as_os_str().len());

    let default_file = default_file.ok_or_else(|| SyncError::MissingDefault {
        dir: dir.to_path_buf(),
    })?;
    Ok((default_file, overrides))
}

/// Write every merged document to `out_dir/<app>/<slug>.<ext>`.
///
/// Returns the written paths in app then slug order.
pub fn write_merged(
    results: &[AppLayers],
    out_dir: &Path,
    format: DocumentFormat,
) -> SyncResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for layers in results {
        let app_dir = out_dir.join(&layers.app);
        for (slug, doc) in &layers.merged_by_slug {
            let path = app_dir.join(format!("{slug}.{}", format.extension()));
            write_document(&path, doc, format)?;
            info!(path = %path.display(), "wrote merged document");
            written.push(path);
        }
    }
    Ok(written)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
