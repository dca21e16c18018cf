//! Unit tests for roadmap storage.

use rstest::{fixture, rstest};

use super::{RoadmapGraph, VertexId, VertexKind};
use crate::{Configuration, PrmError};

#[fixture]
fn triangle() -> (RoadmapGraph, [VertexId; 3]) {
    let mut graph = RoadmapGraph::new();
    let a = graph.add_vertex(Configuration::from([0.0]), VertexKind::Roadmap);
    let b = graph.add_vertex(Configuration::from([1.0]), VertexKind::Roadmap);
    let c = graph.add_vertex(Configuration::from([2.0]), VertexKind::Roadmap);
    graph.add_edge(a, b, 1.0).expect("a-b is new");
    graph.add_edge(b, c, 1.0).expect("b-c is new");
    graph.add_edge(a, c, 2.0).expect("a-c is new");
    (graph, [a, b, c])
}

#[rstest]
fn counts_track_insertions(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (graph, [a, b, c]) = triangle;
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degree(a), 2);
    assert_eq!(graph.weight(c, a), Some(2.0));
    assert!(graph.has_edge(b, a));
}

#[rstest]
fn parallel_edges_are_not_added(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, [a, b, _]) = triangle;
    let added = graph.add_edge(b, a, 5.0).expect("vertices are live");
    assert!(!added);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.weight(a, b), Some(1.0));
}

#[rstest]
fn self_loops_are_rejected(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, [a, _, _]) = triangle;
    let err = graph.add_edge(a, a, 0.0).expect_err("self-loop");
    assert!(matches!(err, PrmError::GraphInvariantViolation { .. }));
}

#[rstest]
fn edges_are_listed_once_in_canonical_order(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (graph, _) = triangle;
    let edges: Vec<_> = graph
        .edges()
        .map(|edge| (edge.source.index(), edge.target.index(), edge.weight))
        .collect();
    assert_eq!(edges, vec![(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.0)]);
}

#[rstest]
fn removal_drops_incident_edges_and_keeps_other_handles(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, [a, b, c]) = triangle;
    let removed = graph.remove_vertex(b).expect("b is live");
    assert_eq!(removed, 2);
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.contains(b));
    assert_eq!(graph.configuration(c), Some(&Configuration::from([2.0])));
    assert_eq!(graph.neighbours(a).collect::<Vec<_>>(), vec![(c, 2.0)]);
}

#[rstest]
fn removed_slots_are_reused(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, [_, b, _]) = triangle;
    graph.remove_vertex(b).expect("b is live");
    let reused = graph.add_vertex(Configuration::from([9.0]), VertexKind::Transient);
    assert_eq!(reused, b);
    assert_eq!(graph.kind(reused), Some(VertexKind::Transient));
    assert_eq!(graph.degree(reused), 0);
}

#[rstest]
fn detached_slots_wait_for_release(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, [a, b, _]) = triangle;
    assert_eq!(graph.detach_vertex(b).expect("b is live"), 2);
    assert!(!graph.contains(b));
    let fresh = graph.add_vertex(Configuration::from([9.0]), VertexKind::Roadmap);
    assert_eq!(fresh.index(), 3);

    graph.release_slot(b);
    graph.release_slot(b);
    graph.release_slot(a);
    let reused = graph.add_vertex(Configuration::from([8.0]), VertexKind::Roadmap);
    assert_eq!(reused, b);
    let appended = graph.add_vertex(Configuration::from([7.0]), VertexKind::Roadmap);
    assert_eq!(appended.index(), 4);
}

#[rstest]
fn removing_a_missing_vertex_is_an_invariant_violation(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, _) = triangle;
    let err = graph
        .remove_vertex(VertexId::new(42))
        .expect_err("vertex 42 was never created");
    assert_eq!(err.code().as_str(), "PRM_GRAPH_INVARIANT_VIOLATION");
}

#[rstest]
fn clear_empties_everything(triangle: (RoadmapGraph, [VertexId; 3])) {
    let (mut graph, _) = triangle;
    graph.clear();
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.vertices().count(), 0);
}
