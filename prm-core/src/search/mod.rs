//! Best-first shortest-path search over the roadmap.
//!
//! A single procedure serves both strategies: Dijkstra runs it with
//! [`ZeroHeuristic`], A* with [`MetricHeuristic`]. Vertices are reopened when
//! a cheaper route is found after they were closed, so the returned cost is
//! minimal for any admissible heuristic, consistent or not.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    collaborators::Metric,
    configuration::Configuration,
    error::{PrmError, Result},
    roadmap::{Colour, RoadmapGraph, VertexId},
    validate::validate_distance,
};

/// Lower bound on the remaining cost from a configuration to the goal.
pub(crate) trait Heuristic {
    fn estimate(&self, configuration: &Configuration) -> Result<f64>;
}

/// Heuristic that turns best-first search into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &Configuration) -> Result<f64> {
        Ok(0.0)
    }
}

/// Metric distance to the goal configuration.
pub(crate) struct MetricHeuristic<'a, M> {
    metric: &'a M,
    goal: Configuration,
}

impl<'a, M: Metric> MetricHeuristic<'a, M> {
    pub(crate) fn new(metric: &'a M, goal: Configuration) -> Self {
        Self { metric, goal }
    }
}

impl<M: Metric> Heuristic for MetricHeuristic<'_, M> {
    fn estimate(&self, configuration: &Configuration) -> Result<f64> {
        validate_distance(self.metric, configuration, &self.goal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SearchOutcome {
    pub(crate) reached: bool,
    /// Number of times a vertex was closed, counting reopened vertices again.
    pub(crate) expanded: usize,
    /// Cost of the best route to the goal; infinite when it was not reached.
    pub(crate) cost: f64,
}

#[derive(Clone, Copy, Debug)]
struct Frontier {
    estimate: f64,
    vertex: VertexId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

// Reversed so the max-heap pops the smallest estimate first.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches from `start` to `goal`, leaving predecessor links in the vertex
/// marks for [`reconstruct_path`].
///
/// Marks from any earlier search are cleared first. The heap uses lazy
/// deletion: superseded entries are skipped when popped.
pub(crate) fn best_first<H: Heuristic>(
    graph: &mut RoadmapGraph,
    start: VertexId,
    goal: VertexId,
    heuristic: &H,
) -> Result<SearchOutcome> {
    graph.reset_marks();
    let start_configuration = graph
        .configuration(start)
        .ok_or_else(|| PrmError::missing_vertex(start, "search"))?;
    let remaining = heuristic.estimate(start_configuration)?;
    let marks = graph
        .marks_mut(start)
        .ok_or_else(|| PrmError::missing_vertex(start, "search"))?;
    marks.colour = Colour::Open;
    marks.cost = 0.0;
    marks.remaining = remaining;
    marks.estimate = remaining;

    let mut frontier = BinaryHeap::new();
    frontier.push(Frontier {
        estimate: remaining,
        vertex: start,
    });
    let mut expanded = 0;

    while let Some(Frontier { estimate, vertex }) = frontier.pop() {
        let marks = graph
            .marks_mut(vertex)
            .ok_or_else(|| PrmError::missing_vertex(vertex, "search"))?;
        if marks.colour == Colour::Closed || estimate > marks.estimate {
            continue;
        }
        marks.colour = Colour::Closed;
        let cost = marks.cost;
        expanded += 1;
        if vertex == goal {
            return Ok(SearchOutcome {
                reached: true,
                expanded,
                cost,
            });
        }

        let neighbours: Vec<(VertexId, f64)> = graph.neighbours(vertex).collect();
        for (next, weight) in neighbours {
            let tentative = cost + weight;
            let (known, colour, cached) = graph
                .marks(next)
                .map(|marks| (marks.cost, marks.colour, marks.remaining))
                .ok_or_else(|| PrmError::missing_vertex(next, "search"))?;
            if tentative >= known {
                continue;
            }
            let remaining = if colour == Colour::Unvisited {
                let configuration = graph
                    .configuration(next)
                    .ok_or_else(|| PrmError::missing_vertex(next, "search"))?;
                heuristic.estimate(configuration)?
            } else {
                cached
            };
            let marks = graph
                .marks_mut(next)
                .ok_or_else(|| PrmError::missing_vertex(next, "search"))?;
            marks.colour = Colour::Open;
            marks.cost = tentative;
            marks.remaining = remaining;
            marks.estimate = tentative + remaining;
            marks.predecessor = Some(vertex);
            frontier.push(Frontier {
                estimate: marks.estimate,
                vertex: next,
            });
        }
    }

    Ok(SearchOutcome {
        reached: false,
        expanded,
        cost: f64::INFINITY,
    })
}

/// Walks predecessor links back from `goal` and returns the start-to-goal
/// configurations, collapsing consecutive duplicates.
pub(crate) fn reconstruct_path(
    graph: &RoadmapGraph,
    start: VertexId,
    goal: VertexId,
) -> Result<Vec<Configuration>> {
    let mut reversed = Vec::new();
    let mut current = goal;
    let mut steps = 0;
    loop {
        let configuration = graph
            .configuration(current)
            .ok_or_else(|| PrmError::missing_vertex(current, "path reconstruction"))?;
        if reversed.last() != Some(configuration) {
            reversed.push(configuration.clone());
        }
        if current == start {
            break;
        }
        steps += 1;
        if steps > graph.vertex_count() {
            return Err(PrmError::GraphInvariantViolation {
                message: "predecessor links form a cycle".into(),
            });
        }
        current = graph
            .marks(current)
            .and_then(|marks| marks.predecessor)
            .ok_or_else(|| PrmError::GraphInvariantViolation {
                message: format!("vertex {current} has no predecessor"),
            })?;
    }
    reversed.reverse();
    Ok(reversed)
}
