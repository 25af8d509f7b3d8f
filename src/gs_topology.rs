//! Topology Module
//!
//! Read-only adjacency table shared by every trial run against it. Besides the
//! out-neighbor lists it keeps the reverse relation, so the fast spreaders can
//! tell which nodes lose an uninfected neighbor when a node gets infected.

use crate::gs_interface::{NodeId, SpreadError};
use crate::gs_random::RandomSource;

#[derive(Debug, Clone)]
pub struct Topology {
    neighbors: Vec<Vec<NodeId>>,

    // reverse adjacency in compressed form: entries of node v live in
    // in_entries[in_offsets[v]..in_offsets[v + 1]], one per occurrence of v
    in_offsets: Vec<usize>,
    in_entries: Vec<NodeId>,
}

impl Topology {
    /// Build a topology from per-node neighbor lists (index = node id)
    ///
    /// Duplicate entries weight the choice; self-loops are allowed.
    pub fn new(neighbors: Vec<Vec<NodeId>>) -> Result<Self, SpreadError> {
        let node_count = neighbors.len();
        if node_count == 0 {
            return Err(SpreadError::EmptyTopology);
        }

        let mut in_degree = vec![0usize; node_count];
        for (node, list) in neighbors.iter().enumerate() {
            for &neighbor in list {
                if neighbor >= node_count {
                    return Err(SpreadError::InvalidTopology {
                        node,
                        neighbor,
                        node_count,
                    });
                }
                in_degree[neighbor] += 1;
            }
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        in_offsets.push(0);
        for degree in &in_degree {
            let last = in_offsets[in_offsets.len() - 1];
            in_offsets.push(last + degree);
        }

        let mut cursor = in_offsets[..node_count].to_vec();
        let mut in_entries = vec![0; in_offsets[node_count]];
        for (node, list) in neighbors.iter().enumerate() {
            for &neighbor in list {
                in_entries[cursor[neighbor]] = node;
                cursor[neighbor] += 1;
            }
        }

        Ok(Self {
            neighbors,
            in_offsets,
            in_entries,
        })
    }

    /// Every node linked to every other node
    pub fn complete(node_count: usize) -> Result<Self, SpreadError> {
        let neighbors = (0..node_count)
            .map(|node| (0..node_count).filter(|&other| other != node).collect())
            .collect();
        Self::new(neighbors)
    }

    /// Ring 0-1-...-(n-1)-0; node i lists [i+1, i-1]
    pub fn cycle(node_count: usize) -> Result<Self, SpreadError> {
        let neighbors = (0..node_count)
            .map(|node| {
                if node_count < 2 {
                    return Vec::new();
                }
                vec![(node + 1) % node_count, (node + node_count - 1) % node_count]
            })
            .collect();
        Self::new(neighbors)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Always false: construction rejects a topology without nodes
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.neighbors[node]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors[node].len()
    }

    /// Nodes listing `node` as a neighbor, once per listing
    pub fn in_neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.in_entries[self.in_offsets[node]..self.in_offsets[node + 1]]
    }

    /// Total number of adjacency entries (2x edges for undirected graphs)
    pub fn edge_entries(&self) -> usize {
        self.in_entries.len()
    }

    pub fn average_degree(&self) -> f64 {
        self.edge_entries() as f64 / self.len() as f64
    }

    /// Pick the neighbor `node` pushes to
    pub fn push_target<R: RandomSource + ?Sized>(
        &self,
        node: NodeId,
        rng: &mut R,
    ) -> Result<NodeId, SpreadError> {
        let list = &self.neighbors[node];
        if list.is_empty() {
            return Err(SpreadError::EmptyNeighborhood { node });
        }
        Ok(list[rng.choose_index(list.len())])
    }
}
