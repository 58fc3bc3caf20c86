//! Key-value stores for flattened merge results.
//!
//! A store holds string values under slash- or dot-separated string keys, the
//! shape a parameter-store service exposes. The sync tooling reads a subtree
//! of keys, compares it against a flattened merge result, and writes back the
//! keys that differ.
//!
//! # Storage Backends
//!
//! All backends implement the [`KeyValueStore`] trait:
//!
//! - [`InMemoryKeyValueStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`JsonFileStore`] -- flat JSON object on disk, rewritten atomically
//!
//! # Design Rules
//!
//! 1. Values are opaque strings; the store never interprets them.
//! 2. A missing key is an error on point reads, never an empty string.
//! 3. Prefix reads return every key that starts with the prefix, sorted.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
