//! Recursive type dispatch.
//!
//! | source   | destination | behaviour                                      |
//! |----------|-------------|------------------------------------------------|
//! | mapping  | mapping     | key-wise recursive merge into the destination  |
//! | mapping  | sequence    | append when extending, else overwrite rule     |
//! | sequence | any         | sequence reconciliation                        |
//! | other    | sequence    | append when extending, else overwrite rule     |
//! | other    | other       | overwrite rule                                 |

use deepmerge_tree::{Mapping, Tree};

use crate::config::MergeConfig;
use crate::error::MergeResult;
use crate::knockout::overwrite_unmergeables;
use crate::sequence::merge_sequence;
use crate::trace::Trace;

/// Merge `src` into `dest`, consuming both.
///
/// The configuration is validated on every call so that a bad combination
/// fails the whole merge no matter where recursion reaches.
///
/// Recursion depth equals tree depth. Only the mapping path recurses through
/// this frame; every other pairing is handed to [`merge_unlike`].
pub(crate) fn merge_node(
    src: Tree,
    dest: Tree,
    config: &MergeConfig,
    trace: Trace,
) -> MergeResult<Tree> {
    config.validate()?;

    match (src, dest) {
        (Tree::Mapping(src), Tree::Mapping(dest)) => {
            merge_mappings(src, dest, config, trace).map(Tree::Mapping)
        }
        (src, dest) => merge_unlike(src, dest, config, trace),
    }
}

/// Nil rules, then the rest of the dispatch table.
///
/// A mapping pair never reaches here, so applying the nil rules after the
/// mapping arm gives the same result as applying them first.
#[inline(never)]
fn merge_unlike(src: Tree, dest: Tree, config: &MergeConfig, trace: Trace) -> MergeResult<Tree> {
    if src.is_nil() && !config.merge_nil_values {
        trace.emit(format_args!("nil source; keeping {dest:?}"));
        return Ok(dest);
    }
    if dest.is_nil() && !config.preserve_unmergeables {
        trace.emit(format_args!("nil destination; adopting {src:?}"));
        return Ok(src);
    }

    match (src, dest) {
        (Tree::Sequence(src), dest) => merge_sequence(src, dest, config, trace),
        (src, Tree::Sequence(mut items)) => {
            if config.extend_existing_arrays {
                trace.emit(format_args!("appending {src:?} to sequence"));
                items.push(src);
                Ok(Tree::Sequence(items))
            } else {
                Ok(overwrite_unmergeables(src, Tree::Sequence(items), config, trace))
            }
        }
        (src, dest) => Ok(overwrite_unmergeables(src, dest, config, trace)),
    }
}

/// Merge every source entry into `dest`.
///
/// Existing keys are merged in place. New keys are seeded with a copy of the
/// source value (or an empty sequence when keeping duplicates) and merged
/// against it, so sorting, de-duplication, and knockout stripping apply to
/// inserted values as well.
fn merge_mappings(
    src: Mapping,
    mut dest: Mapping,
    config: &MergeConfig,
    trace: Trace,
) -> MergeResult<Mapping> {
    for (key, sv) in src {
        trace.emit(format_args!("key {key:?}"));
        let child = trace.child();
        match dest.get_mut(&key) {
            Some(slot) => {
                let current = std::mem::take(slot);
                *slot = merge_node(sv, current, config, child)?;
            }
            None => {
                let seed = if sv.is_sequence() && config.keep_array_duplicates {
                    Tree::empty_sequence()
                } else {
                    sv.clone()
                };
                let merged = merge_node(sv, seed, config, child)?;
                dest.insert(key, merged);
            }
        }
    }
    Ok(dest)
}
