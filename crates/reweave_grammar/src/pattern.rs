//! Rule patterns.
//!
//! A [`Pattern`] is one side (L or R) of a rule: pattern nodes, pattern arcs,
//! and pattern hyperarcs, plus a query against the host's global labels.
//! Pattern elements carry the match-policy flags that matter on the L side;
//! on the R side only names, labels, connectivity, and direction flags are
//! meaningful.

use reweave_foundation::LabelSet;

/// A node in a rule pattern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternNode {
    /// Element name. Names shared between L and R identify preserved
    /// (K) elements.
    pub name: String,
    /// Labels the host node must carry (L) or will carry (R).
    pub labels: LabelSet,
    /// Labels whose presence on the host node disqualifies the match.
    pub negate_labels: LabelSet,
    /// The match was accepted only because the host node held every label
    /// in `labels` and nothing more, so label additions elsewhere can
    /// retroactively invalidate it.
    pub contains_all_labels: bool,
    /// The match is only valid while the host node's arc degree is exactly
    /// preserved.
    pub strict_degree_match: bool,
    /// This element's absence was required for the match.
    pub not_exist: bool,
    /// Pattern-space position, compared by the shape solver.
    pub position: [f64; 3],
}

impl PatternNode {
    /// Creates a pattern node with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the required labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the disqualifying labels.
    #[must_use]
    pub fn with_negate_labels(mut self, labels: LabelSet) -> Self {
        self.negate_labels = labels;
        self
    }

    /// Sets the contains-all policy.
    #[must_use]
    pub fn with_contains_all(mut self, contains_all: bool) -> Self {
        self.contains_all_labels = contains_all;
        self
    }

    /// Sets the strict-degree policy.
    #[must_use]
    pub fn with_strict_degree(mut self, strict: bool) -> Self {
        self.strict_degree_match = strict;
        self
    }

    /// Marks this as a negative (absence-required) element.
    #[must_use]
    pub fn with_not_exist(mut self, not_exist: bool) -> Self {
        self.not_exist = not_exist;
        self
    }

    /// Sets the pattern-space position.
    #[must_use]
    pub fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }
}

/// An arc in a rule pattern.
///
/// Ends name pattern nodes; `None` means the end is unspecified in the
/// pattern (a dangling end).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternArc {
    /// Element name.
    pub name: String,
    /// Labels the host arc must carry (L) or will carry (R).
    pub labels: LabelSet,
    /// Labels whose presence on the host arc disqualifies the match.
    pub negate_labels: LabelSet,
    /// See [`PatternNode::contains_all_labels`].
    pub contains_all_labels: bool,
    /// This element's absence was required for the match.
    pub not_exist: bool,
    /// Name of the tail-end pattern node, or `None` for unspecified.
    pub from: Option<String>,
    /// Name of the head-end pattern node, or `None` for unspecified.
    pub to: Option<String>,
    /// An unspecified end must be strictly dangling on the host: `None`
    /// matches only a null end, not "any end".
    pub null_means_null: bool,
    /// Whether the arc is directed from→to.
    pub directed: bool,
    /// Whether the arc is directed both ways.
    pub doubly_directed: bool,
    /// The host arc's direction flags must equal this pattern arc's flags
    /// exactly, rather than merely satisfying them.
    pub direction_is_equal: bool,
}

impl PatternArc {
    /// Creates a pattern arc between two named pattern nodes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        from: Option<impl Into<String>>,
        to: Option<impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            from: from.map(Into::into),
            to: to.map(Into::into),
            ..Self::default()
        }
    }

    /// Sets the required labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the disqualifying labels.
    #[must_use]
    pub fn with_negate_labels(mut self, labels: LabelSet) -> Self {
        self.negate_labels = labels;
        self
    }

    /// Sets the contains-all policy.
    #[must_use]
    pub fn with_contains_all(mut self, contains_all: bool) -> Self {
        self.contains_all_labels = contains_all;
        self
    }

    /// Marks this as a negative (absence-required) element.
    #[must_use]
    pub fn with_not_exist(mut self, not_exist: bool) -> Self {
        self.not_exist = not_exist;
        self
    }

    /// Sets the strictly-dangling policy for unspecified ends.
    #[must_use]
    pub fn with_null_means_null(mut self, null_means_null: bool) -> Self {
        self.null_means_null = null_means_null;
        self
    }

    /// Sets the direction flags.
    #[must_use]
    pub fn with_direction(mut self, directed: bool, doubly_directed: bool) -> Self {
        self.directed = directed;
        self.doubly_directed = doubly_directed;
        self
    }

    /// Requires exact direction-flag equality on the host.
    #[must_use]
    pub fn with_direction_is_equal(mut self, exact: bool) -> Self {
        self.direction_is_equal = exact;
        self
    }

    /// Returns true if the named node is one of this arc's ends.
    #[must_use]
    pub fn touches(&self, node_name: &str) -> bool {
        self.from.as_deref() == Some(node_name) || self.to.as_deref() == Some(node_name)
    }
}

/// A hyperarc in a rule pattern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternHyperarc {
    /// Element name.
    pub name: String,
    /// Labels the host hyperarc must carry (L) or will carry (R).
    pub labels: LabelSet,
    /// Labels whose presence on the host hyperarc disqualifies the match.
    pub negate_labels: LabelSet,
    /// See [`PatternNode::contains_all_labels`].
    pub contains_all_labels: bool,
    /// The match is only valid while the host hyperarc connects exactly
    /// this many nodes.
    pub strict_node_count_match: bool,
    /// This element's absence was required for the match.
    pub not_exist: bool,
    /// Names of the connected pattern nodes.
    pub nodes: Vec<String>,
}

impl PatternHyperarc {
    /// Creates a pattern hyperarc over the named pattern nodes.
    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            nodes,
            ..Self::default()
        }
    }

    /// Sets the required labels.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the disqualifying labels.
    #[must_use]
    pub fn with_negate_labels(mut self, labels: LabelSet) -> Self {
        self.negate_labels = labels;
        self
    }

    /// Sets the contains-all policy.
    #[must_use]
    pub fn with_contains_all(mut self, contains_all: bool) -> Self {
        self.contains_all_labels = contains_all;
        self
    }

    /// Sets the strict-node-count policy.
    #[must_use]
    pub fn with_strict_node_count(mut self, strict: bool) -> Self {
        self.strict_node_count_match = strict;
        self
    }

    /// Marks this as a negative (absence-required) element.
    #[must_use]
    pub fn with_not_exist(mut self, not_exist: bool) -> Self {
        self.not_exist = not_exist;
        self
    }
}

/// The L side's requirement on the host graph's global labels.
///
/// On the R side only `labels` is meaningful: it is the global label set the
/// rewrite leaves behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalLabelQuery {
    /// Global labels the host must carry (L) or will carry (R).
    pub labels: LabelSet,
    /// Global labels whose presence disqualifies the match.
    pub negate_labels: LabelSet,
    /// The match was accepted only because the host's global labels were
    /// exactly covered, so any global addition invalidates it.
    pub contains_all_labels: bool,
}

impl GlobalLabelQuery {
    /// Creates a query requiring the given labels.
    #[must_use]
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    /// Sets the disqualifying labels.
    #[must_use]
    pub fn with_negate_labels(mut self, labels: LabelSet) -> Self {
        self.negate_labels = labels;
        self
    }

    /// Sets the contains-all policy.
    #[must_use]
    pub fn with_contains_all(mut self, contains_all: bool) -> Self {
        self.contains_all_labels = contains_all;
        self
    }
}

/// One side of a rule: nodes, arcs, hyperarcs, and a global-label query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pattern {
    /// Pattern nodes, in binding order.
    pub nodes: Vec<PatternNode>,
    /// Pattern arcs, in binding order.
    pub arcs: Vec<PatternArc>,
    /// Pattern hyperarcs, in binding order.
    pub hyperarcs: Vec<PatternHyperarc>,
    /// Requirement on (L) or effect on (R) the host's global labels.
    pub global_labels: GlobalLabelQuery,
}

impl Pattern {
    /// Creates an empty pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern node.
    #[must_use]
    pub fn with_node(mut self, node: PatternNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a pattern arc.
    #[must_use]
    pub fn with_arc(mut self, arc: PatternArc) -> Self {
        self.arcs.push(arc);
        self
    }

    /// Adds a pattern hyperarc.
    #[must_use]
    pub fn with_hyperarc(mut self, hyperarc: PatternHyperarc) -> Self {
        self.hyperarcs.push(hyperarc);
        self
    }

    /// Sets the global-label query.
    #[must_use]
    pub fn with_global_labels(mut self, query: GlobalLabelQuery) -> Self {
        self.global_labels = query;
        self
    }

    /// Finds a pattern node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&PatternNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Finds a pattern arc by name.
    #[must_use]
    pub fn arc(&self, name: &str) -> Option<&PatternArc> {
        self.arcs.iter().find(|a| a.name == name)
    }

    /// Finds a pattern hyperarc by name.
    #[must_use]
    pub fn hyperarc(&self, name: &str) -> Option<&PatternHyperarc> {
        self.hyperarcs.iter().find(|h| h.name == name)
    }

    /// Returns the binding index of the named pattern node.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Returns the binding index of the named pattern arc.
    #[must_use]
    pub fn arc_index(&self, name: &str) -> Option<usize> {
        self.arcs.iter().position(|a| a.name == name)
    }

    /// Returns the binding index of the named pattern hyperarc.
    #[must_use]
    pub fn hyperarc_index(&self, name: &str) -> Option<usize> {
        self.hyperarcs.iter().position(|h| h.name == name)
    }

    /// Returns the arc degree of a named node within this pattern: the number
    /// of pattern-arc ends attached to it.
    #[must_use]
    pub fn arc_degree_of(&self, node_name: &str) -> usize {
        self.arcs
            .iter()
            .map(|a| {
                usize::from(a.from.as_deref() == Some(node_name))
                    + usize::from(a.to.as_deref() == Some(node_name))
            })
            .sum()
    }

    /// Returns the number of pattern hyperarcs connected to a named node.
    #[must_use]
    pub fn hyperarc_count_of(&self, node_name: &str) -> usize {
        self.hyperarcs
            .iter()
            .filter(|h| h.nodes.iter().any(|n| n == node_name))
            .count()
    }
}
