//! Core data model for Reweave.
//!
//! This crate provides:
//! - [`LabelSet`] - Persistent label sets with structural sharing
//! - [`ElementId`] - Generational element identifiers
//! - [`Node`], [`Arc`], [`Hyperarc`] - Graph elements
//! - [`Graph`] - The host graph, with O(1) independent snapshots
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod element;
pub mod error;
pub mod graph;
pub mod label;

pub use element::{Arc, ElementId, ElementKind, Hyperarc, Node};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use graph::{ArcEnd, Graph};
pub use label::LabelSet;
