//! Static invalidation analysis: the per-cell checks over labels, degrees,
//! connectivity, direction, induced matches, and shapes.

use std::sync::Arc;

use reweave_confluence::{AnalysisMode, ConfluenceAnalyzer, Invalidation, Verdict};
use reweave_foundation::{ElementId, Graph, LabelSet, Node, Result};
use reweave_grammar::{
    Candidate, EmbeddingRule, GlobalLabelQuery, MatchOption, Pattern, PatternArc, PatternHyperarc,
    PatternNode, PositionShapeSolver, Rule, ShapePolicy, SharedRule,
};

fn labels(items: &[&str]) -> LabelSet {
    items.iter().copied().collect()
}

fn no_recognize(_: &Rule, _: &Graph) -> Vec<MatchOption> {
    Vec::new()
}

fn no_apply(_: &MatchOption, _: &mut Graph, _: &[f64]) -> Result<()> {
    Ok(())
}

fn option(rule: &SharedRule, nodes: Vec<ElementId>, arcs: Vec<ElementId>) -> MatchOption {
    MatchOption::new(rule.clone(), nodes, arcs, vec![]).unwrap()
}

fn cell(
    p: &MatchOption,
    q: &MatchOption,
    candidate: &Candidate,
) -> (Invalidation, Verdict) {
    let shapes = PositionShapeSolver::default();
    let analyzer =
        ConfluenceAnalyzer::new(AnalysisMode::Full, &no_recognize, &no_apply, &shapes);
    analyzer.does_p_invalidate_q(p, q, candidate).unwrap()
}

// =============================================================================
// Step 1: global labels
// =============================================================================

#[test]
fn removing_a_required_global_label_conflicts() {
    let p_rule: SharedRule = Arc::new(Rule::new(
        "consume-x",
        Pattern::new().with_global_labels(GlobalLabelQuery::new(labels(&["x"]))),
        Pattern::new(),
    ));
    let q_rule: SharedRule = Arc::new(Rule::new(
        "need-x",
        Pattern::new().with_global_labels(GlobalLabelQuery::new(labels(&["x"]))),
        Pattern::new().with_global_labels(GlobalLabelQuery::new(labels(&["x"]))),
    ));

    let mut graph = Graph::new();
    graph.add_global_label("x");
    let candidate = Candidate::new(graph);

    let p = option(&p_rule, vec![], vec![]);
    let q = option(&q_rule, vec![], vec![]);

    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::GlobalLabels));
    // Q leaves the label in place, so the other direction is clean.
    assert_eq!(cell(&q, &p, &candidate), (Invalidation::Safe, Verdict::Disjoint));
}

#[test]
fn global_contains_all_and_negation_conflicts() {
    let adder: SharedRule = Arc::new(Rule::new(
        "announce",
        Pattern::new(),
        Pattern::new().with_global_labels(GlobalLabelQuery::new(labels(&["done"]))),
    ));
    let exact: SharedRule = Arc::new(Rule::new(
        "exact",
        Pattern::new().with_global_labels(
            GlobalLabelQuery::new(labels(&["phase"])).with_contains_all(true),
        ),
        Pattern::new().with_global_labels(GlobalLabelQuery::new(labels(&["phase"]))),
    ));
    let averse: SharedRule = Arc::new(Rule::new(
        "averse",
        Pattern::new().with_global_labels(
            GlobalLabelQuery::new(LabelSet::new()).with_negate_labels(labels(&["done"])),
        ),
        Pattern::new(),
    ));

    let mut graph = Graph::new();
    graph.add_global_label("phase");
    let candidate = Candidate::new(graph);

    let p = option(&adder, vec![], vec![]);
    let exact_q = option(&exact, vec![], vec![]);
    let averse_q = option(&averse, vec![], vec![]);

    // Any global addition breaks an exactly-covered match.
    assert_eq!(
        cell(&p, &exact_q, &candidate),
        (Invalidation::Unsafe, Verdict::GlobalLabels)
    );
    // Adding a label the other match negated breaks it too.
    assert_eq!(
        cell(&p, &averse_q, &candidate),
        (Invalidation::Unsafe, Verdict::GlobalLabels)
    );
}

// =============================================================================
// Step 2: shared nodes
// =============================================================================

/// Host with three free-standing nodes.
fn three_nodes() -> (Graph, [ElementId; 3]) {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1").with_labels(labels(&["x"])));
    let n2 = g.add_node(Node::new("n2"));
    let n3 = g.add_node(Node::new("n3"));
    (g, [n1, n2, n3])
}

fn preserve_rule(name: &str) -> SharedRule {
    Arc::new(Rule::new(
        name,
        Pattern::new().with_node(PatternNode::new("m")),
        Pattern::new().with_node(PatternNode::new("m")),
    ))
}

#[test]
fn deleting_a_node_the_other_binds_conflicts() {
    let (graph, [n1, _, _]) = three_nodes();
    let candidate = Candidate::new(graph);

    let deleter: SharedRule = Arc::new(Rule::new(
        "drop",
        Pattern::new().with_node(PatternNode::new("a")),
        Pattern::new(),
    ));
    let p = option(&deleter, vec![n1], vec![]);
    let q = option(&preserve_rule("keep"), vec![n1], vec![]);

    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::DeletedNode));
    // Q only reads the node, so Q never invalidates P.
    assert_eq!(cell(&q, &p, &candidate), (Invalidation::Safe, Verdict::Safe));
}

#[test]
fn node_label_rewrite_breaks_requirements() {
    let (graph, [n1, _, _]) = three_nodes();
    let candidate = Candidate::new(graph);

    // P strips "x" from its preserved node.
    let stripper: SharedRule = Arc::new(Rule::new(
        "strip-x",
        Pattern::new().with_node(PatternNode::new("a").with_labels(labels(&["x"]))),
        Pattern::new().with_node(PatternNode::new("a")),
    ));
    // Q requires "x" on the same node.
    let requires: SharedRule = Arc::new(Rule::new(
        "need-x",
        Pattern::new().with_node(PatternNode::new("m").with_labels(labels(&["x"]))),
        Pattern::new().with_node(PatternNode::new("m").with_labels(labels(&["x"]))),
    ));

    let p = option(&stripper, vec![n1], vec![]);
    let q = option(&requires, vec![n1], vec![]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::NodeLabels));
}

#[test]
fn node_contains_all_and_negation_policies() {
    let (graph, [n1, _, _]) = three_nodes();
    let candidate = Candidate::new(graph);

    // P adds a label to its preserved node.
    let adder: SharedRule = Arc::new(Rule::new(
        "tag",
        Pattern::new().with_node(PatternNode::new("a").with_labels(labels(&["x"]))),
        Pattern::new().with_node(PatternNode::new("a").with_labels(labels(&["x", "tagged"]))),
    ));

    let exact: SharedRule = Arc::new(Rule::new(
        "exact",
        Pattern::new().with_node(
            PatternNode::new("m")
                .with_labels(labels(&["x"]))
                .with_contains_all(true),
        ),
        Pattern::new().with_node(PatternNode::new("m").with_labels(labels(&["x"]))),
    ));
    let averse: SharedRule = Arc::new(Rule::new(
        "averse",
        Pattern::new().with_node(PatternNode::new("m").with_negate_labels(labels(&["tagged"]))),
        Pattern::new().with_node(PatternNode::new("m")),
    ));

    let p = option(&adder, vec![n1], vec![]);
    let exact_q = option(&exact, vec![n1], vec![]);
    let averse_q = option(&averse, vec![n1], vec![]);

    assert_eq!(
        cell(&p, &exact_q, &candidate),
        (Invalidation::Unsafe, Verdict::NodeLabels)
    );
    assert_eq!(
        cell(&p, &averse_q, &candidate),
        (Invalidation::Unsafe, Verdict::NodeLabels)
    );
}

#[test]
fn strict_degree_conflicts_with_arc_deletion() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let n2 = g.add_node(Node::new("n2"));
    let e1 = g
        .add_arc(reweave_foundation::Arc::new("e1", n1, n2))
        .unwrap();
    let candidate = Candidate::new(g);

    // P keeps both nodes but deletes the arc between them.
    let unlink: SharedRule = Arc::new(Rule::new(
        "unlink",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_arc(PatternArc::new("ab", Some("a"), Some("b"))),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b")),
    ));
    // Q pinned its node's degree.
    let pinned: SharedRule = Arc::new(Rule::new(
        "pinned",
        Pattern::new().with_node(PatternNode::new("m").with_strict_degree(true)),
        Pattern::new().with_node(PatternNode::new("m")),
    ));

    let p = option(&unlink, vec![n1, n2], vec![e1]);
    let q = option(&pinned, vec![n1], vec![]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::NodeDegree));
}

#[test]
fn strict_degree_conflicts_with_embedding_reattachment() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let n2 = g.add_node(Node::new("n2"));
    let e1 = g
        .add_arc(reweave_foundation::Arc::new("e1", n1, n2))
        .unwrap();
    let candidate = Candidate::new(g);

    // P swings the arc from b over to a fresh node, keeping a's own pattern
    // degree unchanged, but its embedding rule reattaches freed arcs to a.
    let swing: SharedRule = Arc::new(
        Rule::new(
            "swing",
            Pattern::new()
                .with_node(PatternNode::new("a"))
                .with_node(PatternNode::new("b"))
                .with_arc(PatternArc::new("ab", Some("a"), Some("b"))),
            Pattern::new()
                .with_node(PatternNode::new("a"))
                .with_node(PatternNode::new("c"))
                .with_arc(PatternArc::new("ac", Some("a"), Some("c"))),
        )
        .with_embedding_rule(EmbeddingRule::new("b", "a")),
    );
    let pinned: SharedRule = Arc::new(Rule::new(
        "pinned",
        Pattern::new().with_node(PatternNode::new("m").with_strict_degree(true)),
        Pattern::new().with_node(PatternNode::new("m")),
    ));

    let p = option(&swing, vec![n1, n2], vec![e1]);
    let q = option(&pinned, vec![n1], vec![]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::NodeDegree));
}

// =============================================================================
// Step 3: shared arcs
// =============================================================================

#[test]
fn attaching_to_a_strictly_dangling_end_conflicts() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let e1 = g
        .add_arc(reweave_foundation::Arc::new(
            "e1",
            n1,
            ElementId::null(),
        ))
        .unwrap();
    let candidate = Candidate::new(g);

    // P grows a new node onto the dangling end.
    let grow: SharedRule = Arc::new(Rule::new(
        "grow",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_arc(PatternArc::new("f", Some("a"), None::<&str>)),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("tip"))
            .with_arc(PatternArc::new("f", Some("a"), Some("tip"))),
    ));
    // Q required that end to stay dangling.
    let dangling: SharedRule = Arc::new(Rule::new(
        "dangling",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_arc(PatternArc::new("free", Some("m"), None::<&str>).with_null_means_null(true)),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_arc(PatternArc::new("free", Some("m"), None::<&str>)),
    ));

    let p = option(&grow, vec![n1], vec![e1]);
    let q = option(&dangling, vec![n1], vec![e1]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::ArcEnds));
}

#[test]
fn rebinding_a_preserved_end_conflicts() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let n2 = g.add_node(Node::new("n2"));
    let e1 = g
        .add_arc(reweave_foundation::Arc::new("e1", n1, n2))
        .unwrap();
    let candidate = Candidate::new(g);

    // P reconnects the arc's head from b to a fresh node c.
    let redirect: SharedRule = Arc::new(Rule::new(
        "redirect",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_arc(PatternArc::new("ab", Some("a"), Some("b"))),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_node(PatternNode::new("c"))
            .with_arc(PatternArc::new("ab", Some("a"), Some("c"))),
    ));
    let watcher: SharedRule = Arc::new(Rule::new(
        "watcher",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(PatternArc::new("e", Some("m"), Some("k"))),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(PatternArc::new("e", Some("m"), Some("k"))),
    ));

    let p = option(&redirect, vec![n1, n2], vec![e1]);
    let q = option(&watcher, vec![n1, n2], vec![e1]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::ArcEnds));
}

#[test]
fn direction_rewrites_break_direction_policies() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let n2 = g.add_node(Node::new("n2"));
    let e1 = g
        .add_arc(reweave_foundation::Arc::new("e1", n1, n2).with_direction(true, false))
        .unwrap();
    let candidate = Candidate::new(g);

    // P un-directs the arc.
    let undirect: SharedRule = Arc::new(Rule::new(
        "undirect",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_arc(PatternArc::new("ab", Some("a"), Some("b")).with_direction(true, false)),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_arc(PatternArc::new("ab", Some("a"), Some("b"))),
    ));
    // Q demanded exact direction-flag equality.
    let exacting: SharedRule = Arc::new(Rule::new(
        "exacting",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(
                PatternArc::new("e", Some("m"), Some("k"))
                    .with_direction(true, false)
                    .with_direction_is_equal(true),
            ),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(PatternArc::new("e", Some("m"), Some("k")).with_direction(true, false)),
    ));
    // Q merely assumed the direction exists.
    let assuming: SharedRule = Arc::new(Rule::new(
        "assuming",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(PatternArc::new("e", Some("m"), Some("k")).with_direction(true, false)),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k"))
            .with_arc(PatternArc::new("e", Some("m"), Some("k")).with_direction(true, false)),
    ));

    let p = option(&undirect, vec![n1, n2], vec![e1]);
    let exact_q = option(&exacting, vec![n1, n2], vec![e1]);
    let assume_q = option(&assuming, vec![n1, n2], vec![e1]);

    assert_eq!(
        cell(&p, &exact_q, &candidate),
        (Invalidation::Unsafe, Verdict::ArcDirection)
    );
    assert_eq!(
        cell(&p, &assume_q, &candidate),
        (Invalidation::Unsafe, Verdict::ArcDirection)
    );
}

// =============================================================================
// Step 4: shared hyperarcs
// =============================================================================

#[test]
fn hyperarc_node_count_strictness() {
    let mut g = Graph::new();
    let n1 = g.add_node(Node::new("n1"));
    let n2 = g.add_node(Node::new("n2"));
    let h1 = g
        .add_hyperarc(reweave_foundation::Hyperarc::new("h1", vec![n1, n2]))
        .unwrap();
    let candidate = Candidate::new(g);

    // P shrinks the hyperarc from two nodes to one.
    let shrink: SharedRule = Arc::new(Rule::new(
        "shrink",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_hyperarc(PatternHyperarc::new("h", vec!["a".into(), "b".into()])),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_hyperarc(PatternHyperarc::new("h", vec!["a".into()])),
    ));
    let counted: SharedRule = Arc::new(Rule::new(
        "counted",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_hyperarc(
                PatternHyperarc::new("g", vec!["m".into()]).with_strict_node_count(true),
            ),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_hyperarc(PatternHyperarc::new("g", vec!["m".into()])),
    ));

    let p = MatchOption::new(shrink, vec![n1, n2], vec![], vec![h1]).unwrap();
    let q = MatchOption::new(counted, vec![n1], vec![], vec![h1]).unwrap();
    assert_eq!(
        cell(&p, &q, &candidate),
        (Invalidation::Unsafe, Verdict::HyperarcNodeCount)
    );
}

// =============================================================================
// Step 5: induced matches
// =============================================================================

#[test]
fn new_arc_inside_an_induced_match_conflicts() {
    let (graph, [n1, n2, _]) = three_nodes();
    let candidate = Candidate::new(graph);

    // P bridges its two preserved nodes.
    let bridge: SharedRule = Arc::new(Rule::new(
        "bridge",
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b")),
        Pattern::new()
            .with_node(PatternNode::new("a"))
            .with_node(PatternNode::new("b"))
            .with_arc(PatternArc::new("link", Some("a"), Some("b"))),
    ));
    // Q's match required no arcs between its nodes beyond those in L.
    let sparse: SharedRule = Arc::new(
        Rule::new(
            "sparse",
            Pattern::new()
                .with_node(PatternNode::new("m"))
                .with_node(PatternNode::new("k")),
            Pattern::new()
                .with_node(PatternNode::new("m"))
                .with_node(PatternNode::new("k")),
        )
        .with_induced(true),
    );

    let p = option(&bridge, vec![n1, n2], vec![]);
    let q = option(&sparse, vec![n1, n2], vec![]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::Induced));
    // Without the induced flag the same bridge is harmless.
    let relaxed: SharedRule = Arc::new(Rule::new(
        "relaxed",
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k")),
        Pattern::new()
            .with_node(PatternNode::new("m"))
            .with_node(PatternNode::new("k")),
    ));
    let q2 = option(&relaxed, vec![n1, n2], vec![]);
    assert_eq!(cell(&p, &q2, &candidate), (Invalidation::Safe, Verdict::Safe));
}

// =============================================================================
// Step 6: shape restrictions
// =============================================================================

fn shape_mover() -> SharedRule {
    Arc::new(
        Rule::new(
            "shift",
            Pattern::new().with_node(PatternNode::new("a").with_position([0.0, 0.0, 0.0])),
            Pattern::new().with_node(PatternNode::new("a").with_position([1.0, 0.0, 0.0])),
        )
        .with_shape(ShapePolicy {
            transform_node_positions: true,
            ..ShapePolicy::default()
        }),
    )
}

fn shape_sensitive() -> SharedRule {
    Arc::new(
        Rule::new(
            "sensitive",
            Pattern::new().with_node(PatternNode::new("m")),
            Pattern::new().with_node(PatternNode::new("m")),
        )
        .with_shape(ShapePolicy {
            use_shape_restrictions: true,
            ..ShapePolicy::default()
        }),
    )
}

#[test]
fn moving_a_node_breaks_a_shape_restricted_match() {
    let (graph, [n1, _, n3]) = three_nodes();
    let candidate = Candidate::new(graph);

    // Disjoint bindings: the shape interaction still applies.
    let p = option(&shape_mover(), vec![n3], vec![]);
    let q = option(&shape_sensitive(), vec![n1], vec![]);

    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Unsafe, Verdict::Shape));
    // Q moves nothing, so Q never disturbs P.
    assert_eq!(cell(&q, &p, &candidate), (Invalidation::Safe, Verdict::Disjoint));
}

#[test]
fn shared_nodes_are_left_to_the_structural_steps() {
    let (graph, [n1, _, _]) = three_nodes();
    let candidate = Candidate::new(graph);

    // Same node: shape check skips it, structural steps find no conflict.
    let p = option(&shape_mover(), vec![n1], vec![]);
    let q = option(&shape_sensitive(), vec![n1], vec![]);
    assert_eq!(cell(&p, &q, &candidate), (Invalidation::Safe, Verdict::Safe));
}

// =============================================================================
// Disjointness and non-transitivity
// =============================================================================

#[test]
fn disjoint_options_are_safe_and_confluent_under_both_modes() {
    let (graph, [n1, n2, _]) = three_nodes();

    let keep = preserve_rule("keep");
    let p = option(&keep, vec![n1], vec![]);
    let q = option(&keep, vec![n2], vec![]);

    let mut candidate = Candidate::new(graph);
    candidate.push_option(p);
    candidate.push_option(q);

    for mode in [AnalysisMode::OptimisticSimple, AnalysisMode::Full] {
        let shapes = PositionShapeSolver::default();
        let analyzer = ConfluenceAnalyzer::new(mode, &no_recognize, &no_apply, &shapes);
        let report = analyzer.analyze(&mut candidate).unwrap();

        assert_eq!(report.matrix.get(0, 1), Invalidation::Safe);
        assert_eq!(report.matrix.get(1, 0), Invalidation::Safe);
        assert!(report.is_confluent(0, 1));
        assert_eq!(candidate.options()[0].confluence(), &[1]);
        assert_eq!(candidate.options()[1].confluence(), &[0]);
    }
}

#[test]
fn confluence_is_not_transitive() {
    let (graph, [n1, n2, _]) = three_nodes();

    // A strips "x" from n1; C requires "x" on n1; B is unrelated on n2.
    let a_rule: SharedRule = Arc::new(Rule::new(
        "strip-x",
        Pattern::new().with_node(PatternNode::new("a").with_labels(labels(&["x"]))),
        Pattern::new().with_node(PatternNode::new("a")),
    ));
    let b_rule = preserve_rule("bystander");
    let c_rule: SharedRule = Arc::new(Rule::new(
        "need-x",
        Pattern::new().with_node(PatternNode::new("c").with_labels(labels(&["x"]))),
        Pattern::new().with_node(PatternNode::new("c").with_labels(labels(&["x"]))),
    ));

    let mut candidate = Candidate::new(graph);
    candidate.push_option(option(&a_rule, vec![n1], vec![])); // 0: A
    candidate.push_option(option(&b_rule, vec![n2], vec![])); // 1: B
    candidate.push_option(option(&c_rule, vec![n1], vec![])); // 2: C

    let shapes = PositionShapeSolver::default();
    let analyzer =
        ConfluenceAnalyzer::new(AnalysisMode::Full, &no_recognize, &no_apply, &shapes);
    let report = analyzer.analyze(&mut candidate).unwrap();

    // A–B and B–C are confluent, but A–C is not: no transitive closure.
    assert!(report.is_confluent(0, 1));
    assert!(report.is_confluent(1, 2));
    assert!(!report.is_confluent(0, 2));

    // The matrix is asymmetric: A breaks C, C leaves A alone.
    assert_eq!(report.matrix.get(0, 2), Invalidation::Unsafe);
    assert_eq!(report.matrix.get(2, 0), Invalidation::Safe);
}
