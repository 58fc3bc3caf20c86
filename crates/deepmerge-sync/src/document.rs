//! Loading and rendering mapping-rooted documents.
//!
//! JSON, TOML and YAML are supported; the format is chosen from the file
//! extension. Mapping key order is preserved in both directions.

use std::fmt;
use std::fs;
use std::path::Path;

use deepmerge_tree::{Mapping, Tree};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SyncError, SyncResult};

/// Serialization format of a document file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Every supported format.
    pub const ALL: [DocumentFormat; 3] = [
        DocumentFormat::Json,
        DocumentFormat::Toml,
        DocumentFormat::Yaml,
    ];

    /// Format for a file extension (without the dot), case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format for a path, or [`SyncError::UnsupportedFormat`].
    pub fn from_path(path: &Path) -> SyncResult<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| SyncError::UnsupportedFormat(path.to_path_buf()))
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Returns `true` if `path` has a supported document extension.
pub fn is_document(path: &Path) -> bool {
    DocumentFormat::from_path(path).is_ok()
}

/// Parse `text` as a mapping-rooted document.
pub fn parse_document(text: &str, format: DocumentFormat) -> SyncResult<Mapping> {
    parse_with_origin(text, format, &format!("{format} input"))
}

fn parse_with_origin(text: &str, format: DocumentFormat, origin: &str) -> SyncResult<Mapping> {
    let parsed: Result<Tree, String> = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_saphyr::from_str(text).map_err(|e| e.to_string()),
    };
    let tree = parsed.map_err(|message| SyncError::Parse {
        origin: origin.to_string(),
        message,
    })?;
    Ok(tree.into_mapping()?)
}

/// Read and parse the document at `path`.
pub fn load_document(path: &Path) -> SyncResult<Mapping> {
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    debug!(path = %path.display(), %format, "loaded document");
    parse_with_origin(&text, format, &path.display().to_string())
}

/// Render a document. JSON is pretty-printed; every format ends with a newline.
///
/// TOML has no null, so nil values are omitted from TOML output.
pub fn render_document(doc: &Mapping, format: DocumentFormat) -> SyncResult<String> {
    match format {
        DocumentFormat::Json => {
            let mut out = serde_json::to_string_pretty(doc)
                .map_err(|e| SyncError::Render(e.to_string()))?;
            out.push('\n');
            Ok(out)
        }
        DocumentFormat::Toml => {
            toml::to_string_pretty(&without_nils(doc)).map_err(|e| SyncError::Render(e.to_string()))
        }
        DocumentFormat::Yaml => {
            let mut out =
                serde_saphyr::to_string(doc).map_err(|e| SyncError::Render(e.to_string()))?;
            if !out.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Render `doc` and write it to `path`, creating parent directories.
pub fn write_document(path: &Path, doc: &Mapping, format: DocumentFormat) -> SyncResult<()> {
    let rendered = render_document(doc, format)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }
    fs::write(path, rendered).map_err(|e| SyncError::io(path, e))?;
    debug!(path = %path.display(), %format, "wrote document");
    Ok(())
}

fn without_nils(doc: &Mapping) -> Mapping {
    doc.iter()
        .filter(|(_, v)| !v.is_nil())
        .map(|(k, v)| (k.clone(), strip_nil(v)))
        .collect()
}

fn strip_nil(tree: &Tree) -> Tree {
    match tree {
        Tree::Mapping(m) => Tree::Mapping(without_nils(m)),
        Tree::Sequence(items) => items
            .iter()
            .filter(|t| !t.is_nil())
            .map(strip_nil)
            .collect(),
        other => other.clone(),
    }
}
