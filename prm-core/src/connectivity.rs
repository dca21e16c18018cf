//! Union-find (disjoint set union) over permanent roadmap vertices.
//!
//! Answers "could a path exist" in near-constant amortised time with union by
//! rank and path compression. It is never consulted for the path itself.
//! Slots are addressed by [`VertexId`] index; slots belonging to transient
//! vertices are never registered, so the partition only ever reflects edges
//! between permanent vertices.

use crate::roadmap::VertexId;

#[derive(Clone, Debug, Default)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `vertex` as a singleton component, growing the table when
    /// needed. Any stale entry left in a reused slot is overwritten.
    pub(crate) fn make_set(&mut self, vertex: VertexId) {
        let index = vertex.index();
        if index >= self.parent.len() {
            self.parent.extend(self.parent.len()..=index);
            self.rank.resize(index + 1, 0);
        }
        self.parent[index] = index;
        self.rank[index] = 0;
        self.components += 1;
    }

    pub(crate) fn component_count(&self) -> usize {
        self.components
    }

    pub(crate) fn find(&mut self, vertex: VertexId) -> usize {
        let mut node = vertex.index();
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the components of `left` and `right`. Returns `true` when they
    /// were previously disjoint.
    pub(crate) fn union(&mut self, left: VertexId, right: VertexId) -> bool {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return false;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        true
    }

    pub(crate) fn same_component(&mut self, left: VertexId, right: VertexId) -> bool {
        self.find(left) == self.find(right)
    }

    pub(crate) fn clear(&mut self) {
        self.parent.clear();
        self.rank.clear();
        self.components = 0;
    }
}
