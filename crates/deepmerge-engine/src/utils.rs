//! Pure helpers over trees and sequences.
//!
//! None of these depend on merge configuration.

use std::cmp::Ordering;

use deepmerge_tree::{Scalar, Tree, TreeKind};

/// Returns `true` if every element satisfies `test` (vacuously true when empty).
pub fn all_of(items: &[Tree], test: impl Fn(&Tree) -> bool) -> bool {
    items.iter().all(test)
}

/// Every element is a string scalar.
pub fn all_strings(items: &[Tree]) -> bool {
    all_of(items, Tree::is_string)
}

/// Every element is a mapping.
pub fn all_mappings(items: &[Tree]) -> bool {
    all_of(items, Tree::is_mapping)
}

/// The single kind shared by every element, or `None` for an empty or mixed
/// sequence.
pub fn homogeneous_kind(items: &[Tree]) -> Option<TreeKind> {
    let first = items.first()?.kind();
    items.iter().all(|t| t.kind() == first).then_some(first)
}

/// Equality by value and shape.
///
/// Mapping key order is ignored. Floats compare equal when their bit patterns
/// match, so a `NaN` element still de-duplicates against itself.
pub fn structurally_equal(a: &Tree, b: &Tree) -> bool {
    match (a, b) {
        (Tree::Nil, Tree::Nil) => true,
        (Tree::Scalar(Scalar::Float(x)), Tree::Scalar(Scalar::Float(y))) => {
            x == y || x.to_bits() == y.to_bits()
        }
        (Tree::Scalar(x), Tree::Scalar(y)) => x == y,
        (Tree::Sequence(xs), Tree::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structurally_equal(x, y))
        }
        (Tree::Mapping(xm), Tree::Mapping(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| structurally_equal(xv, yv)))
        }
        _ => false,
    }
}

/// Index of the first element structurally equal to `needle`.
pub fn position_of(items: &[Tree], needle: &Tree) -> Option<usize> {
    items.iter().position(|t| structurally_equal(t, needle))
}

/// Index of the first string element equal to `needle`, ignoring case.
pub fn position_of_str_ignore_case(items: &[Tree], needle: &str) -> Option<usize> {
    let needle = needle.to_lowercase();
    items
        .iter()
        .position(|t| t.as_str().is_some_and(|s| s.to_lowercase() == needle))
}

/// Remove the first string element equal to `needle`, ignoring case.
/// Returns `true` if an element was removed.
pub fn remove_first_str_ignore_case(items: &mut Vec<Tree>, needle: &str) -> bool {
    match position_of_str_ignore_case(items, needle) {
        Some(idx) => {
            items.remove(idx);
            true
        }
        None => false,
    }
}

/// Append each element of `src` to `dest` unless a structurally equal element
/// is already present.
///
/// `[3, 4, 5]` into `[1, 2, 3]` gives `[1, 2, 3, 4, 5]`.
pub fn combine_without_duplicates(src: Vec<Tree>, mut dest: Vec<Tree>) -> Vec<Tree> {
    for item in src {
        if position_of(&dest, &item).is_none() {
            dest.push(item);
        }
    }
    dest
}

/// Join string elements with `separator`, then split on it again.
///
/// `["1", "2,3"]` with `","` gives `["1", "2", "3"]`. Non-string elements
/// are skipped; callers check [`all_strings`] first.
pub fn unpack_strings(items: &[Tree], separator: &str) -> Vec<String> {
    let parts: Vec<&str> = items.iter().filter_map(Tree::as_str).collect();
    parts
        .join(separator)
        .split(separator)
        .map(str::to_string)
        .collect()
}

/// Deterministic, type-aware text form used by the fallback sort order.
pub fn canonical_string(tree: &Tree) -> String {
    format!("{tree:?}")
}

/// Sort a sequence in place.
///
/// Homogeneous int, float, and string sequences use their natural order;
/// anything else is ordered by [`canonical_string`].
pub fn sort_sequence(items: &mut [Tree]) {
    match homogeneous_kind(items) {
        Some(kind) if kind.is_naturally_ordered() => items.sort_by(natural_order),
        _ => items.sort_by_cached_key(canonical_string),
    }
}

fn natural_order(a: &Tree, b: &Tree) -> Ordering {
    match (a, b) {
        (Tree::Scalar(Scalar::Int(x)), Tree::Scalar(Scalar::Int(y))) => x.cmp(y),
        (Tree::Scalar(Scalar::Float(x)), Tree::Scalar(Scalar::Float(y))) => x.total_cmp(y),
        (Tree::Scalar(Scalar::String(x)), Tree::Scalar(Scalar::String(y))) => x.cmp(y),
        _ => canonical_string(a).cmp(&canonical_string(b)),
    }
}
