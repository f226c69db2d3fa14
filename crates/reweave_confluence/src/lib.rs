//! Option confluence and invalidation analysis for Reweave.
//!
//! This crate provides:
//! - [`ConfluenceAnalyzer`] - Pairwise invalidation analysis over an option set
//! - [`InvalidationMatrix`] / [`Invalidation`] - The ternary NxN result
//! - [`empirical_check`] - The simulate-and-compare fallback
//! - [`AnalysisTrace`] - Per-cell decision records

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
pub mod empirical;
pub mod matrix;
pub mod trace;

pub use analyzer::{derive_confluence, AnalysisMode, ConfluenceAnalyzer, ConfluenceReport};
pub use empirical::empirical_check;
pub use matrix::{Invalidation, InvalidationMatrix};
pub use trace::{AnalysisTrace, CellTrace, Verdict};
