//! Per-call diagnostic context threaded through the recursion.
//!
//! Each recursive step derives a child context with one more level of
//! indentation; nothing is shared between calls.

use std::fmt;

use tracing::debug;

use crate::config::MergeConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Trace {
    enabled: bool,
    depth: usize,
}

impl Trace {
    pub(crate) fn root(config: &MergeConfig) -> Self {
        Self {
            enabled: config.debug,
            depth: config.debug_indent,
        }
    }

    pub(crate) fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    #[inline(never)]
    pub(crate) fn emit(&self, message: fmt::Arguments<'_>) {
        if self.enabled {
            debug!(
                depth = self.depth,
                "{:indent$}{}",
                "",
                message,
                indent = self.depth * 2
            );
        }
    }
}
