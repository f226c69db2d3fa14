//! Reweave - Graph-grammar rewriting engine
//!
//! This crate re-exports all layers of the Reweave system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: reweave_confluence  — invalidation analysis, empirical fallback
//! Layer 1: reweave_grammar     — rules, options, candidates, collaborators
//! Layer 0: reweave_foundation  — labels, graph elements, host graph, errors
//! ```

pub use reweave_confluence as confluence;
pub use reweave_foundation as foundation;
pub use reweave_grammar as grammar;
