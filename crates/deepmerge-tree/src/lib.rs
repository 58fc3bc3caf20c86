//! Tree value model for deepmerge.
//!
//! This crate provides the recursive value type every other deepmerge crate
//! operates on. A [`Tree`] is the shape JSON, TOML and YAML documents naturally
//! produce: nil, scalars, ordered sequences, and string-keyed mappings.
//!
//! # Key Types
//!
//! - [`Tree`] -- Recursive value (`Nil | Scalar | Sequence | Mapping`)
//! - [`Scalar`] -- Opaque leaf value (bool, integer, float, string)
//! - [`Mapping`] -- Insertion-ordered string-keyed map of trees
//! - [`TreeKind`] -- Concrete kind of a node, used for dispatch and diagnostics

pub mod error;
pub mod kind;
pub mod scalar;
pub mod tree;

pub use error::TreeError;
pub use kind::TreeKind;
pub use scalar::Scalar;
pub use tree::{Mapping, Tree};
