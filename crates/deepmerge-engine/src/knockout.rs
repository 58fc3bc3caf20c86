//! Knockout prefix handling.
//!
//! A source string carrying the configured prefix deletes matching destination
//! content instead of adding to it. Two forms exist:
//!
//! - When a source value overwrites an unmergeable destination, a prefixed
//!   string (or a sequence holding one) wipes the destination to `""`.
//! - Inside sequence reconciliation, each prefixed element removes both its
//!   prefixed and unprefixed forms from the destination sequence.

use deepmerge_tree::{Scalar, Tree};

use crate::config::MergeConfig;
use crate::trace::Trace;
use crate::utils::remove_first_str_ignore_case;

/// Write `src` over `dest` where a structural merge does not apply.
///
/// 1. With a knockout prefix (and therefore overwriting): strip the prefix
///    from `src`; if anything was stripped the destination is wiped to `""`,
///    otherwise `src` replaces it.
/// 2. Overwriting without a prefix: `src` replaces the destination.
/// 3. Preserving: the destination is kept and `src` is discarded.
pub(crate) fn overwrite_unmergeables(
    src: Tree,
    dest: Tree,
    config: &MergeConfig,
    trace: Trace,
) -> Tree {
    trace.emit(format_args!("overwrite: {src:?} :: {dest:?}"));
    if config.preserve_unmergeables {
        trace.emit(format_args!("preserving destination"));
        return dest;
    }
    let Some(prefix) = config.knockout_prefix.as_deref() else {
        return src;
    };

    let (stripped, knocked_out) = strip_knockout(src, prefix);
    if knocked_out {
        trace.emit(format_args!("knockout found; wiping {dest:?}"));
        Tree::from("")
    } else {
        stripped
    }
}

/// Remove the knockout prefix from `src`.
///
/// A string loses a leading prefix; a sequence drops every prefixed string
/// element (other elements pass through); anything else is unchanged. The
/// flag reports whether a prefix was found.
pub(crate) fn strip_knockout(src: Tree, prefix: &str) -> (Tree, bool) {
    match src {
        Tree::Scalar(Scalar::String(s)) => {
            if let Some(rest) = s.strip_prefix(prefix) {
                return (Tree::from(rest), true);
            }
            (Tree::Scalar(Scalar::String(s)), false)
        }
        Tree::Sequence(items) => {
            let before = items.len();
            let kept: Vec<Tree> = items
                .into_iter()
                .filter(|t| !t.as_str().is_some_and(|s| s.starts_with(prefix)))
                .collect();
            let changed = kept.len() != before;
            (Tree::Sequence(kept), changed)
        }
        other => (other, false),
    }
}

/// Apply per-element knockouts from `src` to `dest`.
///
/// Every prefixed string in `src` removes the first case-insensitive match of
/// its prefixed form and of its unprefixed form from `dest`, and is itself
/// dropped. The remaining source elements are returned as merge candidates.
pub(crate) fn knock_out_elements(
    src: Vec<Tree>,
    dest: &mut Vec<Tree>,
    prefix: &str,
    trace: Trace,
) -> Vec<Tree> {
    let mut candidates = Vec::with_capacity(src.len());
    for item in src {
        if let Some(prefixed) = item.as_str().filter(|s| s.starts_with(prefix)) {
            let target = &prefixed[prefix.len()..];
            trace.emit(format_args!("found {prefixed:?}; knocking out {target:?}"));
            remove_first_str_ignore_case(dest, prefixed);
            remove_first_str_ignore_case(dest, target);
            continue;
        }
        candidates.push(item);
    }
    candidates
}
