//! Query reports and the connectivity check run before searching.

use crate::{
    builder::SearchStrategy,
    connectivity::DisjointSet,
    insert::component_roots,
    roadmap::{RoadmapGraph, VertexId},
};

/// How the most recent query ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryOutcome {
    /// Start and goal were in different components; no search was run.
    Disconnected,
    /// A path was found.
    Found {
        /// Sum of the edge weights along the path.
        cost: f64,
    },
    /// The search ran without reaching the goal.
    ///
    /// The connectivity check is exact, so this only occurs if the tracker
    /// and the graph disagree.
    Exhausted,
}

impl QueryOutcome {
    /// Returns whether a path was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Instrumentation recorded for the most recent query.
///
/// # Examples
/// ```
/// use prm_core::{QueryOutcome, QueryReport, SearchStrategy};
///
/// let report = QueryReport {
///     outcome: QueryOutcome::Disconnected,
///     expanded: 0,
///     construct_steps: 0,
///     strategy: SearchStrategy::AStar,
/// };
/// assert!(!report.outcome.is_found());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryReport {
    /// How the query ended.
    pub outcome: QueryOutcome,
    /// Number of vertices closed by the search; zero when it failed fast.
    pub expanded: usize,
    /// Construction attempts made while the endpoints were disconnected.
    pub construct_steps: usize,
    /// Strategy used for the search.
    pub strategy: SearchStrategy,
}

/// Returns whether a roadmap route can join two transient endpoints.
///
/// Transient vertices never share an edge, so a route exists iff some
/// roadmap neighbour of `start` and some roadmap neighbour of `goal` share a
/// component. The persistent tracker is read, never extended.
pub(crate) fn endpoints_connected(
    graph: &RoadmapGraph,
    components: &mut DisjointSet,
    start: VertexId,
    goal: VertexId,
) -> bool {
    let start_roots = component_roots(graph, components, start);
    if start_roots.is_empty() {
        return false;
    }
    let goal_roots = component_roots(graph, components, goal);
    goal_roots
        .iter()
        .any(|root| start_roots.binary_search(root).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Configuration, roadmap::VertexKind};

    fn vertex(graph: &mut RoadmapGraph, x: f64, kind: VertexKind) -> VertexId {
        graph.add_vertex(Configuration::from([x]), kind)
    }

    #[test]
    fn endpoints_without_roadmap_neighbours_are_disconnected() {
        let mut graph = RoadmapGraph::new();
        let mut components = DisjointSet::new();
        let start = vertex(&mut graph, 0.0, VertexKind::Transient);
        let goal = vertex(&mut graph, 0.0, VertexKind::Transient);
        assert!(!endpoints_connected(&graph, &mut components, start, goal));
    }

    #[test]
    fn shared_component_connects_the_endpoints() {
        let mut graph = RoadmapGraph::new();
        let mut components = DisjointSet::new();
        let a = vertex(&mut graph, 0.0, VertexKind::Roadmap);
        let b = vertex(&mut graph, 1.0, VertexKind::Roadmap);
        let c = vertex(&mut graph, 5.0, VertexKind::Roadmap);
        for id in [a, b, c] {
            components.make_set(id);
        }
        graph.add_edge(a, b, 1.0).expect("edge is new");
        components.union(a, b);

        let start = vertex(&mut graph, 0.1, VertexKind::Transient);
        let goal = vertex(&mut graph, 0.9, VertexKind::Transient);
        graph.add_edge(start, a, 0.1).expect("edge is new");
        graph.add_edge(goal, c, 4.1).expect("edge is new");
        assert!(!endpoints_connected(&graph, &mut components, start, goal));

        graph.add_edge(goal, b, 0.1).expect("edge is new");
        assert!(endpoints_connected(&graph, &mut components, start, goal));
        assert_eq!(components.component_count(), 2);
    }
}
