//! The confluence analyzer.
//!
//! Given a candidate's option set, the analyzer computes an NxN ternary
//! invalidation matrix, where cell (p, q) answers "does applying option p
//! invalidate option q's match preconditions?", and derives the set of
//! confluent (order-independent) option pairs from it.
//!
//! The per-cell analysis is a sequence of static checks over label sets,
//! degrees, connectivity, and policy flags. Rules carrying behavior the
//! static steps cannot see (negative elements, opaque hooks) escalate:
//! `Full` mode runs the empirical simulate-and-compare fallback, while
//! `OptimisticSimple` mode records the cell undecided.

use std::collections::BTreeSet;

use reweave_foundation::{ElementId, LabelSet, Result};
use reweave_grammar::{
    Applicator, Candidate, MatchOption, PatternArc, Recognizer, ShapeSolver,
};

use crate::empirical::empirical_check;
use crate::matrix::{Invalidation, InvalidationMatrix};
use crate::trace::{AnalysisTrace, CellTrace, Verdict};

/// How undecidable cells are handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Cheap and approximate: undecidable cells stay `Undecided` and count
    /// as safe when deriving confluence.
    OptimisticSimple,
    /// Ground truth: undecidable cells run the empirical fallback, and only
    /// proven-safe cells count as confluent.
    Full,
}

/// The result of one analysis run: the full matrix, the derived confluent
/// pairs, and (optionally) the per-cell trace.
#[derive(Clone, Debug)]
pub struct ConfluenceReport {
    /// The NxN invalidation matrix.
    pub matrix: InvalidationMatrix,
    /// Unordered confluent pairs, stored as (i, j) with i < j.
    pub pairs: BTreeSet<(usize, usize)>,
    /// Per-cell decisions, when tracing was enabled.
    pub trace: Option<AnalysisTrace>,
}

impl ConfluenceReport {
    /// Returns true if the unordered pair {i, j} was found confluent.
    #[must_use]
    pub fn is_confluent(&self, i: usize, j: usize) -> bool {
        let key = if i < j { (i, j) } else { (j, i) };
        self.pairs.contains(&key)
    }
}

/// Derives the confluent pairs from a finished matrix.
///
/// Under [`AnalysisMode::OptimisticSimple`], {i, j} is confluent iff neither
/// directed cell is `Unsafe`. Under [`AnalysisMode::Full`], both cells must
/// be `Safe`. Confluence is commutative by construction and explicitly not
/// transitive: callers must not treat the pair set as cliques.
#[must_use]
pub fn derive_confluence(
    matrix: &InvalidationMatrix,
    mode: AnalysisMode,
) -> BTreeSet<(usize, usize)> {
    let mut pairs = BTreeSet::new();
    for i in 0..matrix.len() {
        for j in (i + 1)..matrix.len() {
            let ij = matrix.get(i, j);
            let ji = matrix.get(j, i);
            let confluent = match mode {
                AnalysisMode::OptimisticSimple => {
                    ij != Invalidation::Unsafe && ji != Invalidation::Unsafe
                }
                AnalysisMode::Full => ij == Invalidation::Safe && ji == Invalidation::Safe,
            };
            if confluent {
                pairs.insert((i, j));
            }
        }
    }
    pairs
}

/// Host elements bound by both options, with their positions in each
/// option's binding arrays.
struct SharedBindings {
    /// (index in P's bindings, index in Q's bindings).
    nodes: Vec<(usize, usize)>,
    arcs: Vec<(usize, usize)>,
    hyperarcs: Vec<(usize, usize)>,
}

fn overlap(ps: &[ElementId], qs: &[ElementId]) -> Vec<(usize, usize)> {
    ps.iter()
        .enumerate()
        .filter(|(_, id)| !id.is_null())
        .filter_map(|(pi, id)| qs.iter().position(|x| x == id).map(|qi| (pi, qi)))
        .collect()
}

impl SharedBindings {
    fn between(p: &MatchOption, q: &MatchOption) -> Self {
        Self {
            nodes: overlap(p.nodes(), q.nodes()),
            arcs: overlap(p.arcs(), q.arcs()),
            hyperarcs: overlap(p.hyperarcs(), q.hyperarcs()),
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.arcs.is_empty() && self.hyperarcs.is_empty()
    }
}

/// True if rewriting an element's labels from `p_left` to `p_right` breaks a
/// match that required `q_required`, rejected `q_negated`, or was accepted
/// under the contains-all policy.
fn label_rewrite_conflict(
    p_left: &LabelSet,
    p_right: &LabelSet,
    q_required: &LabelSet,
    q_negated: &LabelSet,
    q_contains_all: bool,
) -> bool {
    let removed = p_left.difference(p_right);
    let added = p_right.difference(p_left);
    removed.intersects(q_required)
        || (q_contains_all && !added.is_empty())
        || added.intersects(q_negated)
}

fn arc_end(arc: &PatternArc, head: bool) -> Option<&str> {
    if head {
        arc.to.as_deref()
    } else {
        arc.from.as_deref()
    }
}

/// Computes invalidation matrices and confluence pairs for a candidate's
/// option set.
pub struct ConfluenceAnalyzer<'a> {
    recognizer: &'a dyn Recognizer,
    applicator: &'a dyn Applicator,
    shapes: &'a dyn ShapeSolver,
    mode: AnalysisMode,
    trace_enabled: bool,
}

impl<'a> ConfluenceAnalyzer<'a> {
    /// Creates an analyzer around the three external collaborators.
    #[must_use]
    pub fn new(
        mode: AnalysisMode,
        recognizer: &'a dyn Recognizer,
        applicator: &'a dyn Applicator,
        shapes: &'a dyn ShapeSolver,
    ) -> Self {
        Self {
            recognizer,
            applicator,
            shapes,
            mode,
            trace_enabled: false,
        }
    }

    /// Enables or disables per-cell tracing.
    #[must_use]
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace_enabled = enabled;
        self
    }

    /// The active analysis mode.
    #[must_use]
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Runs the full analysis for a candidate: builds the invalidation
    /// matrix, derives the confluent pairs, and populates each option's
    /// confluence list (both ends of a pair together).
    ///
    /// The candidate's graph and the options' bindings are not mutated; the
    /// empirical fallback operates on disposable snapshots only.
    ///
    /// # Errors
    /// Returns [`reweave_foundation::ErrorKind::InvalidOption`] if any
    /// option's binding arrays are misaligned with its rule's L pattern. A
    /// failed run establishes no confluence: no partial matrix is returned.
    pub fn analyze(&self, candidate: &mut Candidate) -> Result<ConfluenceReport> {
        let (matrix, trace) = self.matrix_with_trace(candidate)?;
        let pairs = derive_confluence(&matrix, self.mode);

        let options = candidate.options_mut();
        for option in options.iter_mut() {
            option.clear_confluence();
        }
        for &(i, j) in &pairs {
            options[i].record_confluent(j);
            options[j].record_confluent(i);
        }

        Ok(ConfluenceReport {
            matrix,
            pairs,
            trace: self.trace_enabled.then_some(trace),
        })
    }

    /// Builds the NxN invalidation matrix for a candidate's options.
    ///
    /// # Errors
    /// Returns an error if any option fails validation.
    pub fn invalidation_matrix(
        &self,
        candidate: &Candidate,
    ) -> Result<InvalidationMatrix> {
        self.matrix_with_trace(candidate).map(|(matrix, _)| matrix)
    }

    /// Derives confluent pairs from a finished matrix and records them into
    /// the options' confluence lists.
    pub fn assign_confluence(
        &self,
        matrix: &InvalidationMatrix,
        options: &mut [MatchOption],
    ) -> BTreeSet<(usize, usize)> {
        let pairs = derive_confluence(matrix, self.mode);
        for option in options.iter_mut() {
            option.clear_confluence();
        }
        for &(i, j) in &pairs {
            options[i].record_confluent(j);
            options[j].record_confluent(i);
        }
        pairs
    }

    fn matrix_with_trace(
        &self,
        candidate: &Candidate,
    ) -> Result<(InvalidationMatrix, AnalysisTrace)> {
        let options = candidate.options();
        for option in options {
            option.validate()?;
        }

        let n = options.len();
        let mut matrix = InvalidationMatrix::diagonal(n);
        let mut trace = AnalysisTrace::new();

        for p in 0..n {
            for q in 0..n {
                if p == q {
                    continue;
                }
                let (outcome, verdict) =
                    self.invalidation_cell(&options[p], &options[q], candidate);
                matrix.set(p, q, outcome);
                trace.record(CellTrace {
                    p,
                    q,
                    outcome,
                    verdict,
                });
            }
        }

        Ok((matrix, trace))
    }

    /// Decides whether applying P invalidates Q's match preconditions.
    ///
    /// # Errors
    /// Returns an error only for malformed options; for well-formed input
    /// every outcome, including an empirical-fallback failure, is encoded in
    /// the returned value.
    pub fn does_p_invalidate_q(
        &self,
        p: &MatchOption,
        q: &MatchOption,
        candidate: &Candidate,
    ) -> Result<(Invalidation, Verdict)> {
        p.validate()?;
        q.validate()?;
        Ok(self.invalidation_cell(p, q, candidate))
    }

    fn invalidation_cell(
        &self,
        p: &MatchOption,
        q: &MatchOption,
        candidate: &Candidate,
    ) -> (Invalidation, Verdict) {
        // Shared bindings are computed once; when the options are fully
        // disjoint, the structural steps below iterate nothing, which is the
        // quick-reject path.
        let shared = SharedBindings::between(p, q);

        if let Some(verdict) = Self::global_label_conflict(p, q) {
            return (Invalidation::Unsafe, verdict);
        }

        if !shared.is_empty() {
            if let Some(verdict) = Self::shared_node_conflict(p, q, &shared) {
                return (Invalidation::Unsafe, verdict);
            }
            if let Some(verdict) = Self::shared_arc_conflict(p, q, &shared) {
                return (Invalidation::Unsafe, verdict);
            }
            if let Some(verdict) = Self::shared_hyperarc_conflict(p, q, &shared) {
                return (Invalidation::Unsafe, verdict);
            }
            if let Some(verdict) = Self::induced_conflict(p, q) {
                return (Invalidation::Unsafe, verdict);
            }
        }

        if let Some(verdict) = self.shape_conflict(p, q) {
            return (Invalidation::Unsafe, verdict);
        }

        // Negative elements and opaque hooks are invisible to the steps
        // above; escalate or leave the cell undecided.
        if q.rule().has_dynamic_recognize() || p.rule().has_dynamic_apply() {
            return match self.mode {
                AnalysisMode::OptimisticSimple => (Invalidation::Undecided, Verdict::Undecided),
                AnalysisMode::Full => {
                    match empirical_check(self.recognizer, self.applicator, p, q, candidate) {
                        Ok(outcome) => (outcome, Verdict::Empirical),
                        // The copy is discarded either way; record the pair as
                        // conservatively invalidating and keep going.
                        Err(_) => (Invalidation::Unsafe, Verdict::EmpiricalFailure),
                    }
                }
            };
        }

        if shared.is_empty() {
            (Invalidation::Safe, Verdict::Disjoint)
        } else {
            (Invalidation::Safe, Verdict::Safe)
        }
    }

    /// Step 1: conflicts through the graph's global label set.
    fn global_label_conflict(p: &MatchOption, q: &MatchOption) -> Option<Verdict> {
        let removed = p.rule().removed_global_labels();
        let added = p.rule().added_global_labels();
        let q_query = &q.rule().left.global_labels;

        let conflict = removed.intersects(&q_query.labels)
            || (q_query.contains_all_labels && !added.is_empty())
            || added.intersects(&q_query.negate_labels);
        conflict.then_some(Verdict::GlobalLabels)
    }

    /// Step 2: conflicts on host nodes bound by both options.
    fn shared_node_conflict(
        p: &MatchOption,
        q: &MatchOption,
        shared: &SharedBindings,
    ) -> Option<Verdict> {
        for &(pi, qi) in &shared.nodes {
            let p_left = &p.rule().left.nodes[pi];
            let q_left = &q.rule().left.nodes[qi];

            if p.rule().deletes_node(&p_left.name) {
                return Some(Verdict::DeletedNode);
            }
            let Some(p_right) = p.rule().right.node(&p_left.name) else {
                continue;
            };

            if label_rewrite_conflict(
                &p_left.labels,
                &p_right.labels,
                &q_left.labels,
                &q_left.negate_labels,
                q_left.contains_all_labels,
            ) {
                return Some(Verdict::NodeLabels);
            }

            if q_left.strict_degree_match {
                let left_degree = p.rule().left.arc_degree_of(&p_left.name);
                let right_degree = p.rule().right.arc_degree_of(&p_left.name);
                let reattached = p
                    .rule()
                    .embedding_rules
                    .iter()
                    .any(|e| e.reattach_to == p_left.name);
                if left_degree != right_degree || reattached {
                    return Some(Verdict::NodeDegree);
                }
            }
        }
        None
    }

    /// Step 3: conflicts on host arcs bound by both options.
    fn shared_arc_conflict(
        p: &MatchOption,
        q: &MatchOption,
        shared: &SharedBindings,
    ) -> Option<Verdict> {
        for &(pi, qi) in &shared.arcs {
            let p_left = &p.rule().left.arcs[pi];
            let q_left = &q.rule().left.arcs[qi];

            if p.rule().deletes_arc(&p_left.name) {
                return Some(Verdict::DeletedArc);
            }
            let Some(p_right) = p.rule().right.arc(&p_left.name) else {
                continue;
            };

            if label_rewrite_conflict(
                &p_left.labels,
                &p_right.labels,
                &q_left.labels,
                &q_left.negate_labels,
                q_left.contains_all_labels,
            ) {
                return Some(Verdict::ArcLabels);
            }

            for head in [false, true] {
                let p_l_end = arc_end(p_left, head);
                let p_r_end = arc_end(p_right, head);
                let q_l_end = arc_end(q_left, head);
                let attaches = p_l_end.is_none() && p_r_end.is_some();

                // (a) Q required the end strictly dangling, P attaches to it.
                if attaches && q_l_end.is_none() && q_left.null_means_null {
                    return Some(Verdict::ArcEnds);
                }
                // (b) Q expected the end already bound, P attaches to it.
                if attaches && q_l_end.is_some() {
                    return Some(Verdict::ArcEnds);
                }
                // (c) P rebinds a shared connectivity point: an end moves from
                // a preserved node to a differently named one. Kept as
                // always-unsafe; see DESIGN.md.
                if let (Some(before), Some(after)) = (p_l_end, p_r_end) {
                    if before != after && p.rule().preserves_node(before) {
                        return Some(Verdict::ArcEnds);
                    }
                }
            }

            // (d) Direction policy.
            if q_left.direction_is_equal
                && (p_right.directed != p_left.directed
                    || p_right.doubly_directed != p_left.doubly_directed)
            {
                return Some(Verdict::ArcDirection);
            }
            if (q_left.directed && p_left.directed && !p_right.directed)
                || (q_left.doubly_directed && p_left.doubly_directed && !p_right.doubly_directed)
            {
                return Some(Verdict::ArcDirection);
            }
        }
        None
    }

    /// Step 4: conflicts on host hyperarcs bound by both options.
    fn shared_hyperarc_conflict(
        p: &MatchOption,
        q: &MatchOption,
        shared: &SharedBindings,
    ) -> Option<Verdict> {
        for &(pi, qi) in &shared.hyperarcs {
            let p_left = &p.rule().left.hyperarcs[pi];
            let q_left = &q.rule().left.hyperarcs[qi];

            if p.rule().deletes_hyperarc(&p_left.name) {
                return Some(Verdict::DeletedHyperarc);
            }
            let Some(p_right) = p.rule().right.hyperarc(&p_left.name) else {
                continue;
            };

            if label_rewrite_conflict(
                &p_left.labels,
                &p_right.labels,
                &q_left.labels,
                &q_left.negate_labels,
                q_left.contains_all_labels,
            ) {
                return Some(Verdict::HyperarcLabels);
            }

            if q_left.strict_node_count_match && p_left.nodes.len() != p_right.nodes.len() {
                return Some(Verdict::HyperarcNodeCount);
            }
        }
        None
    }

    /// Step 5: P introduces an arc inside Q's induced match.
    fn induced_conflict(p: &MatchOption, q: &MatchOption) -> Option<Verdict> {
        if !q.rule().induced {
            return None;
        }
        for created in p.rule().created_arcs() {
            let (Some(from), Some(to)) = (created.from.as_deref(), created.to.as_deref()) else {
                continue;
            };
            if !(p.rule().preserves_node(from) && p.rule().preserves_node(to)) {
                continue;
            }
            let (Ok(from_id), Ok(to_id)) = (p.mapped_node(from), p.mapped_node(to)) else {
                continue;
            };
            if q.binds_node(from_id) && q.binds_node(to_id) {
                return Some(Verdict::Induced);
            }
        }
        None
    }

    /// Step 6: P displaces a node Q's shape restriction relied on.
    fn shape_conflict(&self, p: &MatchOption, q: &MatchOption) -> Option<Verdict> {
        if !(q.rule().shape.restricts() && p.rule().shape.transforms()) {
            return None;
        }
        for name in p.rule().preserved_node_names() {
            let Ok(id) = p.mapped_node(name) else {
                continue;
            };
            // Nodes shared with Q are covered by the structural steps.
            if q.binds_node(id) {
                continue;
            }
            let (Some(left), Some(right)) = (p.rule().left.node(name), p.rule().right.node(name))
            else {
                continue;
            };
            if !self.shapes.shapes_match(left, right) {
                return Some(Verdict::Shape);
            }
        }
        None
    }
}
