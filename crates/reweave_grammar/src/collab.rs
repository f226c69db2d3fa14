//! Collaborator contracts.
//!
//! The confluence analyzer treats subgraph matching, rule application, and
//! shape comparison as external collaborators behind these traits. Closures
//! with the matching signatures implement them directly, which keeps test
//! doubles and embedding engines lightweight.

use reweave_foundation::{Graph, Result};

use crate::option::MatchOption;
use crate::pattern::PatternNode;
use crate::rule::Rule;

/// Subgraph recognition: finds all applications of a rule against a graph.
///
/// Must be deterministic for a given graph snapshot; the empirical confluence
/// fallback compares rediscovered bindings against an original one.
pub trait Recognizer {
    /// Returns every option for `rule` against `graph`.
    fn recognize(&self, rule: &Rule, graph: &Graph) -> Vec<MatchOption>;
}

impl<F> Recognizer for F
where
    F: Fn(&Rule, &Graph) -> Vec<MatchOption>,
{
    fn recognize(&self, rule: &Rule, graph: &Graph) -> Vec<MatchOption> {
        self(rule, graph)
    }
}

/// Rule application: rewrites the graph it is given, in place.
pub trait Applicator {
    /// Applies `option` to `graph` with the given free parameters.
    ///
    /// # Errors
    /// Returns an error if the rewrite cannot be carried out.
    fn apply(&self, option: &MatchOption, graph: &mut Graph, parameters: &[f64]) -> Result<()>;
}

impl<F> Applicator for F
where
    F: Fn(&MatchOption, &mut Graph, &[f64]) -> Result<()>,
{
    fn apply(&self, option: &MatchOption, graph: &mut Graph, parameters: &[f64]) -> Result<()> {
        self(option, graph, parameters)
    }
}

/// Shape comparison, supplied by the geometric transform solver.
///
/// Treated as a black box: the only contract is a stable boolean for a given
/// pair of pattern nodes.
pub trait ShapeSolver {
    /// Returns true if the two pattern nodes agree in position and shape.
    fn shapes_match(&self, left: &PatternNode, right: &PatternNode) -> bool;
}

impl<F> ShapeSolver for F
where
    F: Fn(&PatternNode, &PatternNode) -> bool,
{
    fn shapes_match(&self, left: &PatternNode, right: &PatternNode) -> bool {
        self(left, right)
    }
}

/// Position-only shape solver: two pattern nodes match when their positions
/// agree componentwise within an epsilon. Lets the analyzer run without a
/// geometry engine.
#[derive(Clone, Copy, Debug)]
pub struct PositionShapeSolver {
    /// Componentwise position tolerance.
    pub epsilon: f64,
}

impl Default for PositionShapeSolver {
    fn default() -> Self {
        Self { epsilon: 1e-9 }
    }
}

impl ShapeSolver for PositionShapeSolver {
    fn shapes_match(&self, left: &PatternNode, right: &PatternNode) -> bool {
        left.position
            .iter()
            .zip(right.position.iter())
            .all(|(l, r)| (l - r).abs() <= self.epsilon)
    }
}
