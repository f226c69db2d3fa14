//! Match options.
//!
//! A [`MatchOption`] is one candidate application of one rule at one location:
//! an index-aligned binding from each element of the rule's L pattern to a
//! concrete host element, plus chosen free parameters and a placement
//! transform. The alignment invariant is validated once at construction
//! rather than re-trusted at every lookup.

use std::sync::Arc;

use reweave_foundation::{ElementId, ElementKind, Error, Result};

use crate::rule::Rule;

/// Shared handle to a rule.
pub type SharedRule = Arc<Rule>;

/// A row-major 4x4 placement transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(pub [[f64; 4]; 4]);

impl Transform {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self(m)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// One candidate application of a rule at a specific location in a host graph.
///
/// Slot `i` of each binding array holds the host element bound to element `i`
/// of the rule's L pattern, or the null id for an unbound slot (a negative
/// element with no witness). Options are immutable once produced, except for
/// the confluence list, which the analyzer populates.
#[derive(Clone, Debug)]
pub struct MatchOption {
    rule: SharedRule,
    nodes: Vec<ElementId>,
    arcs: Vec<ElementId>,
    hyperarcs: Vec<ElementId>,
    parameters: Vec<f64>,
    position_transform: Transform,
    rule_number: usize,
    rule_set_index: usize,
    confluence: Vec<usize>,
}

impl MatchOption {
    /// Creates an option from a rule and its host bindings.
    ///
    /// # Errors
    /// Returns [`Error::invalid_option`] if a binding array's length does not
    /// equal the corresponding L-pattern array's length.
    pub fn new(
        rule: SharedRule,
        nodes: Vec<ElementId>,
        arcs: Vec<ElementId>,
        hyperarcs: Vec<ElementId>,
    ) -> Result<Self> {
        let option = Self {
            rule,
            nodes,
            arcs,
            hyperarcs,
            parameters: Vec::new(),
            position_transform: Transform::identity(),
            rule_number: 0,
            rule_set_index: 0,
            confluence: Vec::new(),
        };
        option.validate()?;
        Ok(option)
    }

    /// Sets the chosen free parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<f64>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the placement transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.position_transform = transform;
        self
    }

    /// Sets the rule's number within its rule set.
    #[must_use]
    pub fn with_rule_number(mut self, rule_number: usize) -> Self {
        self.rule_number = rule_number;
        self
    }

    /// Sets the index of the rule set the rule came from.
    #[must_use]
    pub fn with_rule_set_index(mut self, rule_set_index: usize) -> Self {
        self.rule_set_index = rule_set_index;
        self
    }

    /// Re-checks the alignment invariant.
    ///
    /// # Errors
    /// Returns [`Error::invalid_option`] on misalignment.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (ElementKind::Node, self.rule.left.nodes.len(), self.nodes.len()),
            (ElementKind::Arc, self.rule.left.arcs.len(), self.arcs.len()),
            (
                ElementKind::Hyperarc,
                self.rule.left.hyperarcs.len(),
                self.hyperarcs.len(),
            ),
        ];
        for (kind, expected, actual) in checks {
            if expected != actual {
                return Err(Error::invalid_option(kind, expected, actual));
            }
        }
        Ok(())
    }

    /// The rule this option applies.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Shared handle to the rule.
    #[must_use]
    pub fn shared_rule(&self) -> &SharedRule {
        &self.rule
    }

    /// Host nodes bound to the L pattern's nodes, by position.
    #[must_use]
    pub fn nodes(&self) -> &[ElementId] {
        &self.nodes
    }

    /// Host arcs bound to the L pattern's arcs, by position.
    #[must_use]
    pub fn arcs(&self) -> &[ElementId] {
        &self.arcs
    }

    /// Host hyperarcs bound to the L pattern's hyperarcs, by position.
    #[must_use]
    pub fn hyperarcs(&self) -> &[ElementId] {
        &self.hyperarcs
    }

    /// Chosen free parameters.
    #[must_use]
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Computed placement transform.
    #[must_use]
    pub fn position_transform(&self) -> &Transform {
        &self.position_transform
    }

    /// The rule's number within its rule set.
    #[must_use]
    pub fn rule_number(&self) -> usize {
        self.rule_number
    }

    /// The index of the rule set the rule came from.
    #[must_use]
    pub fn rule_set_index(&self) -> usize {
        self.rule_set_index
    }

    /// Returns the host node bound to the named L node.
    ///
    /// # Errors
    /// Returns [`Error::unbound_element`] if the name is not in the rule's
    /// L pattern. This is a programming-contract error, not a recoverable one.
    pub fn mapped_node(&self, name: &str) -> Result<ElementId> {
        self.rule
            .left
            .node_index(name)
            .map(|i| self.nodes[i])
            .ok_or_else(|| Error::unbound_element(name))
    }

    /// Returns the host arc bound to the named L arc.
    ///
    /// # Errors
    /// Returns [`Error::unbound_element`] if the name is not in the rule's
    /// L pattern.
    pub fn mapped_arc(&self, name: &str) -> Result<ElementId> {
        self.rule
            .left
            .arc_index(name)
            .map(|i| self.arcs[i])
            .ok_or_else(|| Error::unbound_element(name))
    }

    /// Returns the host hyperarc bound to the named L hyperarc.
    ///
    /// # Errors
    /// Returns [`Error::unbound_element`] if the name is not in the rule's
    /// L pattern.
    pub fn mapped_hyperarc(&self, name: &str) -> Result<ElementId> {
        self.rule
            .left
            .hyperarc_index(name)
            .map(|i| self.hyperarcs[i])
            .ok_or_else(|| Error::unbound_element(name))
    }

    /// Returns true if this option binds the given host node.
    #[must_use]
    pub fn binds_node(&self, id: ElementId) -> bool {
        !id.is_null() && self.nodes.contains(&id)
    }

    /// Returns true if this option binds the given host arc.
    #[must_use]
    pub fn binds_arc(&self, id: ElementId) -> bool {
        !id.is_null() && self.arcs.contains(&id)
    }

    /// Returns true if this option binds the given host hyperarc.
    #[must_use]
    pub fn binds_hyperarc(&self, id: ElementId) -> bool {
        !id.is_null() && self.hyperarcs.contains(&id)
    }

    /// Returns true if the two options bind any host element in common.
    #[must_use]
    pub fn shares_elements_with(&self, other: &Self) -> bool {
        self.nodes.iter().any(|&n| other.binds_node(n))
            || self.arcs.iter().any(|&a| other.binds_arc(a))
            || self.hyperarcs.iter().any(|&h| other.binds_hyperarc(h))
    }

    /// The positional binding signature, used for exact rebinding comparison
    /// in the empirical confluence check.
    #[must_use]
    pub fn bound_signature(&self) -> (&[ElementId], &[ElementId], &[ElementId]) {
        (&self.nodes, &self.arcs, &self.hyperarcs)
    }

    /// Indices of options (within the same option set) this option has been
    /// found confluent with. Populated only by the confluence analyzer.
    #[must_use]
    pub fn confluence(&self) -> &[usize] {
        &self.confluence
    }

    /// Records a confluent partner. Called by the analyzer for both ends of a
    /// pair together, keeping confluence commutative.
    pub fn record_confluent(&mut self, index: usize) {
        if !self.confluence.contains(&index) {
            self.confluence.push(index);
        }
    }

    /// Clears the confluence list ahead of a fresh analysis.
    pub fn clear_confluence(&mut self) {
        self.confluence.clear();
    }
}
