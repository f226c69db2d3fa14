//! Grammar rules.
//!
//! A [`Rule`] rewrites a host graph: its left pattern (L) is matched, its
//! right pattern (R) replaces the matched subgraph. The preserved context
//! (K = L∩R by element name) is computed on demand, never stored. Rules also
//! carry matching policy that the confluence analyzer reads as immutable
//! configuration: the induced flag, embedding side-rules, shape policy, and
//! opaque recognize/apply hooks.

use std::fmt;
use std::sync::Arc;

use reweave_foundation::{Graph, LabelSet, Result};

use crate::option::MatchOption;
use crate::pattern::{Pattern, PatternArc};

/// A side-rule describing how a dangling ("free") arc end is reattached when
/// its original endpoint is deleted by a rewrite.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddingRule {
    /// Name of the L node whose deletion frees the arc end.
    pub deleted_node: String,
    /// Name of the L/R element the freed end is reattached to.
    pub reattach_to: String,
}

impl EmbeddingRule {
    /// Creates an embedding rule.
    #[must_use]
    pub fn new(deleted_node: impl Into<String>, reattach_to: impl Into<String>) -> Self {
        Self {
            deleted_node: deleted_node.into(),
            reattach_to: reattach_to.into(),
        }
    }
}

/// Shape-restriction policy flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShapePolicy {
    /// The rule's matches are only valid while the matched shape holds.
    pub use_shape_restrictions: bool,
    /// Matches additionally required per-node shape agreement.
    pub restrict_to_node_shape_match: bool,
    /// Applying the rule resizes node shapes.
    pub transform_node_shapes: bool,
    /// Applying the rule moves node positions.
    pub transform_node_positions: bool,
}

impl ShapePolicy {
    /// Returns true if this rule's matches depend on shape agreement.
    #[must_use]
    pub fn restricts(&self) -> bool {
        self.use_shape_restrictions || self.restrict_to_node_shape_match
    }

    /// Returns true if applying this rule can move or resize nodes.
    #[must_use]
    pub fn transforms(&self) -> bool {
        self.transform_node_shapes || self.transform_node_positions
    }
}

/// Opaque screening hook consulted during recognition.
///
/// The confluence analyzer never introspects or invokes hooks; their presence
/// forces escalation to the empirical check.
pub trait RecognizeHook: Send + Sync {
    /// Returns true if the located option should be accepted.
    fn screen(&self, option: &MatchOption, graph: &Graph) -> bool;
}

/// Opaque rewrite hook invoked during application.
pub trait ApplyHook: Send + Sync {
    /// Performs the hook's extra rewriting.
    ///
    /// # Errors
    /// Returns an error if the rewrite cannot be carried out.
    fn rewrite(&self, option: &MatchOption, graph: &mut Graph) -> Result<()>;
}

/// Shared handle to a recognize hook.
pub type SharedRecognizeHook = Arc<dyn RecognizeHook>;

/// Shared handle to an apply hook.
pub type SharedApplyHook = Arc<dyn ApplyHook>;

/// A graph-grammar rule with matching policy.
#[derive(Clone)]
pub struct Rule {
    /// Rule name.
    pub name: String,
    /// The match pattern (L).
    pub left: Pattern,
    /// The replacement pattern (R).
    pub right: Pattern,
    /// The match additionally required that no arcs exist between the matched
    /// nodes beyond those in L.
    pub induced: bool,
    /// Side-rules for reattaching freed arc ends.
    pub embedding_rules: Vec<EmbeddingRule>,
    /// Shape-restriction policy.
    pub shape: ShapePolicy,
    /// Opaque recognition hooks.
    pub recognize_hooks: Vec<SharedRecognizeHook>,
    /// Opaque application hooks.
    pub apply_hooks: Vec<SharedApplyHook>,
}

impl Rule {
    /// Creates a rule from its left and right patterns.
    #[must_use]
    pub fn new(name: impl Into<String>, left: Pattern, right: Pattern) -> Self {
        Self {
            name: name.into(),
            left,
            right,
            induced: false,
            embedding_rules: Vec::new(),
            shape: ShapePolicy::default(),
            recognize_hooks: Vec::new(),
            apply_hooks: Vec::new(),
        }
    }

    /// Sets the induced flag.
    #[must_use]
    pub fn with_induced(mut self, induced: bool) -> Self {
        self.induced = induced;
        self
    }

    /// Adds an embedding side-rule.
    #[must_use]
    pub fn with_embedding_rule(mut self, rule: EmbeddingRule) -> Self {
        self.embedding_rules.push(rule);
        self
    }

    /// Sets the shape policy.
    #[must_use]
    pub fn with_shape(mut self, shape: ShapePolicy) -> Self {
        self.shape = shape;
        self
    }

    /// Adds an opaque recognize hook.
    #[must_use]
    pub fn with_recognize_hook(mut self, hook: SharedRecognizeHook) -> Self {
        self.recognize_hooks.push(hook);
        self
    }

    /// Adds an opaque apply hook.
    #[must_use]
    pub fn with_apply_hook(mut self, hook: SharedApplyHook) -> Self {
        self.apply_hooks.push(hook);
        self
    }

    // =========================================================================
    // K-element queries (computed, never stored)
    // =========================================================================

    /// Names of nodes present in both L and R, in L order.
    #[must_use]
    pub fn preserved_node_names(&self) -> Vec<&str> {
        self.left
            .nodes
            .iter()
            .filter(|n| self.right.node(&n.name).is_some())
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Names of arcs present in both L and R, in L order.
    #[must_use]
    pub fn preserved_arc_names(&self) -> Vec<&str> {
        self.left
            .arcs
            .iter()
            .filter(|a| self.right.arc(&a.name).is_some())
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Names of hyperarcs present in both L and R, in L order.
    #[must_use]
    pub fn preserved_hyperarc_names(&self) -> Vec<&str> {
        self.left
            .hyperarcs
            .iter()
            .filter(|h| self.right.hyperarc(&h.name).is_some())
            .map(|h| h.name.as_str())
            .collect()
    }

    /// Returns true if the named node is preserved: present in both L and R.
    #[must_use]
    pub fn preserves_node(&self, name: &str) -> bool {
        self.left.node(name).is_some() && self.right.node(name).is_some()
    }

    /// Returns true if the rule deletes the named node: it appears in L, is
    /// not a negative element, and has no R counterpart.
    #[must_use]
    pub fn deletes_node(&self, name: &str) -> bool {
        self.left
            .node(name)
            .is_some_and(|n| !n.not_exist && self.right.node(name).is_none())
    }

    /// Returns true if the rule deletes the named arc.
    #[must_use]
    pub fn deletes_arc(&self, name: &str) -> bool {
        self.left
            .arc(name)
            .is_some_and(|a| !a.not_exist && self.right.arc(name).is_none())
    }

    /// Returns true if the rule deletes the named hyperarc.
    #[must_use]
    pub fn deletes_hyperarc(&self, name: &str) -> bool {
        self.left
            .hyperarc(name)
            .is_some_and(|h| !h.not_exist && self.right.hyperarc(name).is_none())
    }

    /// Arcs the rule creates: present in R with no L counterpart.
    pub fn created_arcs(&self) -> impl Iterator<Item = &PatternArc> {
        self.right
            .arcs
            .iter()
            .filter(|a| self.left.arc(&a.name).is_none())
    }

    // =========================================================================
    // Global label effects
    // =========================================================================

    /// Global labels the rule removes: in L's query but not in R's.
    #[must_use]
    pub fn removed_global_labels(&self) -> LabelSet {
        self.left
            .global_labels
            .labels
            .difference(&self.right.global_labels.labels)
    }

    /// Global labels the rule adds: in R's query but not in L's.
    #[must_use]
    pub fn added_global_labels(&self) -> LabelSet {
        self.right
            .global_labels
            .labels
            .difference(&self.left.global_labels.labels)
    }

    // =========================================================================
    // Dynamic-behavior capability
    // =========================================================================

    /// Returns true if this rule's recognition cannot be statically analyzed:
    /// it carries recognize hooks, or its L pattern has negative elements
    /// whose absence condition is invisible to symbolic reasoning.
    #[must_use]
    pub fn has_dynamic_recognize(&self) -> bool {
        !self.recognize_hooks.is_empty()
            || self.left.nodes.iter().any(|n| n.not_exist)
            || self.left.arcs.iter().any(|a| a.not_exist)
            || self.left.hyperarcs.iter().any(|h| h.not_exist)
    }

    /// Returns true if this rule's application cannot be statically analyzed.
    #[must_use]
    pub fn has_dynamic_apply(&self) -> bool {
        !self.apply_hooks.is_empty()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("induced", &self.induced)
            .field("embedding_rules", &self.embedding_rules)
            .field("shape", &self.shape)
            .field("recognize_hooks", &self.recognize_hooks.len())
            .field("apply_hooks", &self.apply_hooks.len())
            .finish()
    }
}
