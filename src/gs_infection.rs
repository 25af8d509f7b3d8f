//! Per-call infection bookkeeping shared by all four spreaders

use log::trace;

use crate::gs_interface::{EmptyNeighborhoodPolicy, NodeId, SpreadError, SpreadParams};
use crate::gs_random::RandomSource;
use crate::gs_topology::Topology;

/// Infected set of a single run; grows monotonically and dies with the call
pub struct InfectionState {
    infected: Vec<bool>,

    /// Nodes in infection order (source first)
    order: Vec<NodeId>,

    /// Uninfected neighbor entries left per node, only kept for fast variants
    remaining: Option<Vec<usize>>,
}

impl InfectionState {
    /// Infected set `{source}` without frontier counters
    pub fn new(topology: &Topology, source: NodeId) -> Self {
        let mut state = Self {
            infected: vec![false; topology.len()],
            order: Vec::new(),
            remaining: None,
        };
        state.infect(topology, source);
        state
    }

    /// Infected set `{source}` with remaining-uninfected-neighbor counters
    pub fn with_frontier(topology: &Topology, source: NodeId) -> Self {
        let remaining = (0..topology.len()).map(|node| topology.degree(node)).collect();
        let mut state = Self {
            infected: vec![false; topology.len()],
            order: Vec::new(),
            remaining: Some(remaining),
        };
        state.infect(topology, source);
        state
    }

    /// Mark `node` infected; returns false if it already was
    pub fn infect(&mut self, topology: &Topology, node: NodeId) -> bool {
        if self.infected[node] {
            return false;
        }
        self.infected[node] = true;
        self.order.push(node);

        if let Some(remaining) = self.remaining.as_mut() {
            for &holder in topology.in_neighbors(node) {
                remaining[holder] -= 1;
            }
        }
        true
    }

    pub fn is_infected(&self, node: NodeId) -> bool {
        self.infected[node]
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// True once every neighbor of `node` is infected
    ///
    /// Without counters this falls back to scanning the neighbor list.
    pub fn is_saturated(&self, topology: &Topology, node: NodeId) -> bool {
        match &self.remaining {
            Some(remaining) => remaining[node] == 0,
            None => topology
                .neighbors(node)
                .iter()
                .all(|&neighbor| self.infected[neighbor]),
        }
    }
}

/// Apply the empty-neighborhood policy to `node`
///
/// Ok(false) means the node has nobody to push to and the attempt is skipped.
pub fn check_neighborhood(
    topology: &Topology,
    node: NodeId,
    params: &SpreadParams,
) -> Result<bool, SpreadError> {
    if topology.degree(node) > 0 {
        return Ok(true);
    }
    match params.empty_neighborhood {
        EmptyNeighborhoodPolicy::Skip => {
            trace!("node {} has no neighbors, push skipped", node);
            Ok(false)
        }
        EmptyNeighborhoodPolicy::Fail => Err(SpreadError::EmptyNeighborhood { node }),
    }
}

/// One push attempt by `node`: returns the chosen neighbor, or None when the
/// push was dropped or skipped
///
/// The failure draw comes before the neighbor draw; a node without neighbors
/// draws nothing.
pub fn attempt_push<R: RandomSource + ?Sized>(
    topology: &Topology,
    node: NodeId,
    params: &SpreadParams,
    rng: &mut R,
) -> Result<Option<NodeId>, SpreadError> {
    if !check_neighborhood(topology, node, params)? {
        return Ok(None);
    }
    if rng.uniform() < params.failure_probability {
        return Ok(None);
    }
    topology.push_target(node, rng).map(Some)
}
