//! Converting between nested documents and flat key/value maps.

use std::collections::BTreeMap;

use deepmerge_tree::{Mapping, Tree};

/// Flatten a document into `path -> text` pairs.
///
/// Nested keys are joined with `separator`. Scalars render as plain text and
/// nil as `""`. A sequence of scalars becomes one comma-joined value; a
/// sequence holding mappings or sequences is flattened by element index.
/// Empty mappings produce no entries.
pub fn flatten(doc: &Mapping, separator: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (key, value) in doc {
        flatten_into(&mut out, key.clone(), value, separator);
    }
    out
}

fn flatten_into(out: &mut BTreeMap<String, String>, path: String, value: &Tree, sep: &str) {
    match value {
        Tree::Nil => {
            out.insert(path, String::new());
        }
        Tree::Scalar(s) => {
            out.insert(path, s.to_string());
        }
        Tree::Mapping(m) => {
            for (key, child) in m {
                flatten_into(out, format!("{path}{sep}{key}"), child, sep);
            }
        }
        Tree::Sequence(items) if items.iter().all(is_leaf) => {
            let joined = items.iter().map(leaf_text).collect::<Vec<_>>().join(",");
            out.insert(path, joined);
        }
        Tree::Sequence(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten_into(out, format!("{path}{sep}{idx}"), child, sep);
            }
        }
    }
}

fn is_leaf(tree: &Tree) -> bool {
    matches!(tree, Tree::Nil | Tree::Scalar(_))
}

fn leaf_text(tree: &Tree) -> String {
    match tree {
        Tree::Scalar(s) => s.to_string(),
        _ => String::new(),
    }
}

/// Rebuild nested mappings of string leaves from flat pairs.
///
/// Empty path segments (such as the one before a leading separator) are
/// skipped. When a key is both a value and the parent of other keys, the
/// children win.
pub fn unflatten(values: &BTreeMap<String, String>, separator: &str) -> Mapping {
    let mut root = Mapping::new();
    for (key, value) in values {
        let segments: Vec<&str> = key.split(separator).filter(|s| !s.is_empty()).collect();
        insert_path(&mut root, &segments, value);
    }
    root
}

fn insert_path(map: &mut Mapping, segments: &[&str], value: &str) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        if !map.get(*first).is_some_and(Tree::is_mapping) {
            map.insert(first.to_string(), Tree::from(value));
        }
        return;
    }
    let entry = map
        .entry(first.to_string())
        .or_insert_with(Tree::empty_mapping);
    if !entry.is_mapping() {
        *entry = Tree::empty_mapping();
    }
    if let Tree::Mapping(child) = entry {
        insert_path(child, rest, value);
    }
}
