//! File and store adapters around the deepmerge engine.
//!
//! This crate turns folders of layered configuration documents into merged
//! documents and keeps a key-value store in line with them.
//!
//! # Key Types
//!
//! - [`DocumentFormat`] -- JSON, TOML or YAML, chosen by file extension
//! - [`AppLayers`] -- Merged documents of one app, keyed by override slug
//! - [`SyncReport`] -- Per-key outcome of a store sync
//!
//! # Pipeline
//!
//! 1. [`merge_folder`] merges every app's override layers onto its default.
//! 2. [`write_merged`] renders the results to an output folder, or
//! 3. [`desired_state`] flattens them into store keys and [`sync_to_store`]
//!    writes the keys whose values differ.

pub mod document;
pub mod error;
pub mod flatten;
pub mod folder;
pub mod plan;

pub use document::{
    is_document, load_document, parse_document, render_document, write_document, DocumentFormat,
};
pub use error::{SyncError, SyncResult};
pub use flatten::{flatten, unflatten};
pub use folder::{folder_merge_config, merge_app, merge_folder, write_merged, AppLayers};
pub use plan::{desired_state, sync_to_store, KeySync, SyncAction, SyncReport, KEY_SEPARATOR};
