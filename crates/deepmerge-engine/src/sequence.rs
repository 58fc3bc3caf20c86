//! Sequence × sequence reconciliation.

use deepmerge_tree::Tree;

use crate::config::MergeConfig;
use crate::engine::merge_node;
use crate::error::MergeResult;
use crate::knockout::{knock_out_elements, overwrite_unmergeables};
use crate::trace::Trace;
use crate::utils::{
    all_mappings, all_strings, combine_without_duplicates, sort_sequence, unpack_strings,
};

/// Merge a source sequence into `dest`.
///
/// Steps, in order:
/// 1. `overwrite_arrays` returns the source untouched.
/// 2. String sequences are unpacked on the configured separator; a naked
///    knockout element (exactly the prefix) is removed and flags truncation.
/// 3. A non-sequence destination is handed to the overwrite rule.
/// 4. Truncation empties the destination.
/// 5. Prefixed source elements knock their targets out of the destination.
/// 6. Remaining elements are merged positionally (all mappings with
///    `merge_hash_arrays`), appended (`keep_array_duplicates`), or unioned.
/// 7. `sort_merged_arrays` sorts the result.
pub(crate) fn merge_sequence(
    mut src: Vec<Tree>,
    dest: Tree,
    config: &MergeConfig,
    trace: Trace,
) -> MergeResult<Tree> {
    trace.emit(format_args!("sequences: {src:?} :: {dest:?}"));
    if config.overwrite_arrays {
        trace.emit(format_args!("overwriting sequence"));
        return Ok(Tree::Sequence(src));
    }

    let knockout = config.knockout_prefix.as_deref();
    let separator = config.unpack_separator();
    let mut truncate = false;

    if let Some(sep) = separator {
        if !src.is_empty() && all_strings(&src) {
            let mut tokens = unpack_strings(&src, sep);
            if let Some(prefix) = knockout {
                let before = tokens.len();
                tokens.retain(|t| t != prefix);
                truncate = tokens.len() != before;
            }
            trace.emit(format_args!("unpacked source: {tokens:?}"));
            src = tokens.into_iter().map(Tree::from).collect();
        }
    }

    let mut dest = match dest {
        Tree::Sequence(items) => items,
        other => {
            return Ok(overwrite_unmergeables(
                Tree::Sequence(src),
                other,
                config,
                trace,
            ))
        }
    };

    if truncate {
        trace.emit(format_args!("naked knockout; truncating {dest:?}"));
        dest.clear();
    }

    if let Some(sep) = separator {
        if !dest.is_empty() && all_strings(&dest) {
            dest = unpack_strings(&dest, sep)
                .into_iter()
                .map(Tree::from)
                .collect();
            trace.emit(format_args!("unpacked destination: {dest:?}"));
        }
    }

    if let Some(prefix) = knockout {
        src = knock_out_elements(src, &mut dest, prefix, trace);
    }

    let mut merged = if config.merge_hash_arrays && all_mappings(&src) && all_mappings(&dest) {
        trace.emit(format_args!("merging mappings by position"));
        merge_by_position(src, dest, config, trace)?
    } else if config.keep_array_duplicates {
        dest.extend(src);
        dest
    } else {
        combine_without_duplicates(src, dest)
    };

    if config.sort_merged_arrays {
        sort_sequence(&mut merged);
    }
    Ok(Tree::Sequence(merged))
}

/// Merge `src[i]` into `dest[i]` for overlapping indices, keep unmatched
/// destination elements, then append any extra source elements.
fn merge_by_position(
    src: Vec<Tree>,
    dest: Vec<Tree>,
    config: &MergeConfig,
    trace: Trace,
) -> MergeResult<Vec<Tree>> {
    let mut merged = Vec::with_capacity(src.len().max(dest.len()));
    let mut src = src.into_iter();
    for (idx, dv) in dest.into_iter().enumerate() {
        match src.next() {
            Some(sv) => {
                trace.emit(format_args!("index {idx}"));
                merged.push(merge_node(sv, dv, config, trace.child())?);
            }
            None => merged.push(dv),
        }
    }
    merged.extend(src);
    Ok(merged)
}
