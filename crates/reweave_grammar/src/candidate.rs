//! Candidates.
//!
//! A [`Candidate`] is a host-graph snapshot together with the options computed
//! to be applicable against it. The candidate owns its snapshot; an option
//! list is only ever valid against its owning candidate's graph.

use reweave_foundation::Graph;

use crate::option::MatchOption;

/// A host-graph snapshot plus its applicable options.
#[derive(Clone, Debug, Default)]
pub struct Candidate {
    graph: Graph,
    options: Vec<MatchOption>,
}

impl Candidate {
    /// Creates a candidate around a graph snapshot with no options yet.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            options: Vec::new(),
        }
    }

    /// The owned graph snapshot.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The options recognized against this candidate's graph.
    #[must_use]
    pub fn options(&self) -> &[MatchOption] {
        &self.options
    }

    /// Mutable access to the options, for confluence assignment.
    #[must_use]
    pub fn options_mut(&mut self) -> &mut [MatchOption] {
        &mut self.options
    }

    /// Adds an option.
    pub fn push_option(&mut self, option: MatchOption) {
        self.options.push(option);
    }

    /// Replaces the full option list.
    pub fn set_options(&mut self, options: Vec<MatchOption>) {
        self.options = options;
    }
}
