//! Line diff of a rendered document before and after a merge.

use colored::Colorize;
use similar::{ChangeTag, TextDiff};

/// Lines of context kept around each change.
const CONTEXT_LINES: usize = 3;

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// First old line in this hunk (1-based).
    pub old_start: usize,
    pub old_count: usize,
    /// First new line in this hunk (1-based).
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Diff `old` against `new` line by line. Identical inputs yield no hunks.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffHunk> {
    if old == new {
        return Vec::new();
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();
    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }

        hunks.push(DiffHunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
            lines,
        });
    }
    hunks
}

/// Count of added and removed lines across `hunks`.
pub fn line_counts(hunks: &[DiffHunk]) -> (usize, usize) {
    hunks
        .iter()
        .flat_map(|h| &h.lines)
        .fold((0, 0), |(add, del), line| match line {
            DiffLine::Added(_) => (add + 1, del),
            DiffLine::Removed(_) => (add, del + 1),
            DiffLine::Context(_) => (add, del),
        })
}

/// Render hunks in unified style with colored markers.
pub fn render(hunks: &[DiffHunk]) -> String {
    let mut out = String::new();
    for hunk in hunks {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        out.push_str(&header.cyan().to_string());
        out.push('\n');
        for line in &hunk.lines {
            let rendered = match line {
                DiffLine::Context(text) => format!(" {text}"),
                DiffLine::Added(text) => format!("+{text}").green().to_string(),
                DiffLine::Removed(text) => format!("-{text}").red().to_string(),
            };
            out.push_str(&rendered);
            out.push('\n');
        }
    }
    out
}
