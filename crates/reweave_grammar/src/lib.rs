//! Rule model, options, and candidates for Reweave.
//!
//! This crate provides:
//! - [`Pattern`] - One side (L or R) of a rule, with match-policy flags
//! - [`Rule`] - A graph-grammar rule with computed K-element queries
//! - [`MatchOption`] - One validated candidate application of a rule
//! - [`Candidate`] - A host snapshot plus its applicable options
//! - [`Recognizer`], [`Applicator`], [`ShapeSolver`] - Collaborator contracts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod candidate;
pub mod collab;
pub mod option;
pub mod pattern;
pub mod rule;

pub use candidate::Candidate;
pub use collab::{Applicator, PositionShapeSolver, Recognizer, ShapeSolver};
pub use option::{MatchOption, SharedRule, Transform};
pub use pattern::{GlobalLabelQuery, Pattern, PatternArc, PatternHyperarc, PatternNode};
pub use rule::{
    ApplyHook, EmbeddingRule, RecognizeHook, Rule, ShapePolicy, SharedApplyHook,
    SharedRecognizeHook,
};
