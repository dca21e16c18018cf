//! Per-vertex scratch state written by the shortest-path search.

use super::VertexId;

/// Visitation state of a vertex during a search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Colour {
    #[default]
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchMarks {
    pub(crate) colour: Colour,
    /// Cost of the best known route from the start.
    pub(crate) cost: f64,
    /// `cost` plus the heuristic estimate to the goal.
    pub(crate) estimate: f64,
    /// Heuristic value, cached on first discovery.
    pub(crate) remaining: f64,
    pub(crate) predecessor: Option<VertexId>,
}

impl Default for SearchMarks {
    fn default() -> Self {
        Self {
            colour: Colour::Unvisited,
            cost: f64::INFINITY,
            estimate: f64::INFINITY,
            remaining: 0.0,
            predecessor: None,
        }
    }
}
