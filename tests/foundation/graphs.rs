//! Host graph behavior: element management, dangling semantics, and the
//! snapshot-copy contract the empirical fallback relies on.

use reweave_foundation::{Arc, ArcEnd, ElementId, ErrorKind, Graph, Hyperarc, LabelSet, Node};

fn labels(items: &[&str]) -> LabelSet {
    items.iter().copied().collect()
}

/// A small host: a - b - c in a line, with a hyperarc over all three.
fn line_graph() -> (Graph, [ElementId; 3], [ElementId; 2], ElementId) {
    let mut g = Graph::new();
    let a = g.add_node(Node::new("a").with_labels(labels(&["end"])));
    let b = g.add_node(Node::new("b"));
    let c = g.add_node(Node::new("c").with_labels(labels(&["end"])));
    let ab = g.add_arc(Arc::new("ab", a, b)).unwrap();
    let bc = g.add_arc(Arc::new("bc", b, c)).unwrap();
    let h = g
        .add_hyperarc(Hyperarc::new("span", vec![a, b, c]))
        .unwrap();
    (g, [a, b, c], [ab, bc], h)
}

#[test]
fn degrees_reflect_connectivity() {
    let (g, [a, b, c], _, _) = line_graph();
    assert_eq!(g.degree(a), 1);
    assert_eq!(g.degree(b), 2);
    assert_eq!(g.degree(c), 1);
    assert_eq!(g.hyper_degree(b), 1);
}

#[test]
fn removing_a_node_detaches_rather_than_cascades() {
    let (mut g, [a, b, c], [ab, bc], h) = line_graph();
    g.remove_node(b).unwrap();

    // Arcs survive with dangling ends.
    assert_eq!(g.arc_count(), 2);
    assert!(g.arc(ab).unwrap().to.is_null());
    assert!(g.arc(bc).unwrap().from.is_null());
    assert_eq!(g.arc(ab).unwrap().from, a);

    // The hyperarc drops the node from its list.
    assert_eq!(g.hyperarc(h).unwrap().nodes, vec![a, c]);
}

#[test]
fn dangling_ends_can_be_reattached() {
    let (mut g, [a, _, c], [ab, _], _) = line_graph();
    let b = g.node_named("b").unwrap().id;
    g.remove_node(b).unwrap();

    // Reattach the freed end to c, the embedding-rule move.
    g.set_arc_end(ab, ArcEnd::Head, c).unwrap();
    let arc = g.arc(ab).unwrap();
    assert_eq!(arc.from, a);
    assert_eq!(arc.to, c);
    assert_eq!(g.degree(c), 2);
}

#[test]
fn stale_ids_do_not_resolve_after_reuse() {
    let (mut g, [a, _, _], _, _) = line_graph();
    g.remove_node(a).unwrap();
    let fresh = g.add_node(Node::new("fresh"));

    // The index is reused but the generation advanced.
    assert_eq!(fresh.index, a.index);
    assert_ne!(fresh, a);
    assert!(g.node(a).is_none());
    assert_eq!(g.node(fresh).unwrap().name, "fresh");
}

#[test]
fn unknown_elements_error() {
    let (mut g, _, _, _) = line_graph();
    let ghost = ElementId::new(404, 0);

    let err = g.remove_node(ghost).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ElementNotFound(_)));
    assert!(g.relabel_arc(ghost, LabelSet::new()).is_err());
    assert!(g.add_arc(Arc::new("bad", ghost, ghost)).is_err());
}

#[test]
fn global_labels_round_trip() {
    let (mut g, _, _, _) = line_graph();
    g.add_global_label("phase-one");
    g.add_global_label("checked");
    g.remove_global_label("phase-one");

    assert!(!g.global_labels().contains("phase-one"));
    assert!(g.global_labels().contains("checked"));
}

#[test]
fn snapshot_copies_are_fully_independent() {
    let (mut g, [a, b, _], [ab, _], h) = line_graph();
    let snapshot = g.clone();

    // Mutate every element kind on the original.
    g.remove_node(b).unwrap();
    g.relabel_node(a, labels(&["rewritten"])).unwrap();
    g.set_node_position(a, [5.0, 0.0, 0.0]).unwrap();
    g.add_global_label("mutated");

    // The snapshot still sees the pre-mutation state everywhere.
    assert!(snapshot.node(b).is_some());
    assert_eq!(snapshot.arc(ab).unwrap().to, b);
    assert_eq!(snapshot.hyperarc(h).unwrap().nodes.len(), 3);
    assert!(snapshot.node(a).unwrap().labels.contains("end"));
    assert_eq!(snapshot.node(a).unwrap().position, [0.0, 0.0, 0.0]);
    assert!(snapshot.global_labels().is_empty());
}
