// all node identities are positional indices into the adjacency table
pub type NodeId = usize;

pub type Round = u64;
pub type SpreadTime = f64;

// tolerance when turning a fraction of N into a node count, so that 1/N * N
// does not round up to 2 when the product lands one ulp above 1.0
const TARGET_EPSILON: f64 = 1e-9;

/// What to do when a node selected to push has no neighbors at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyNeighborhoodPolicy {
    /// The push attempt is a no-op for this step
    #[default]
    Skip,

    /// Abort the run with `SpreadError::EmptyNeighborhood`
    Fail,
}

/// Parameters for one spreading-time estimate
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SpreadParams {
    /// Node holding the information at time zero
    pub source: NodeId,

    /// Probability that a single push attempt is dropped
    pub failure_probability: f64,

    /// Fraction of all nodes that must be infected to stop
    pub end_criteria: f64,

    /// Synchronous safety bound (None = unbounded)
    pub max_rounds: Option<Round>,

    /// Asynchronous safety bound (None = unbounded)
    pub max_time: Option<SpreadTime>,

    pub empty_neighborhood: EmptyNeighborhoodPolicy,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            source: 0,
            failure_probability: 0.0,
            end_criteria: 0.9,
            max_rounds: Some(10_000),
            max_time: Some(10_000.0),
            empty_neighborhood: EmptyNeighborhoodPolicy::Skip,
        }
    }
}

impl SpreadParams {
    pub fn new(source: NodeId, failure_probability: f64) -> Self {
        Self {
            source,
            failure_probability,
            ..Default::default()
        }
    }

    pub fn with_end_criteria(mut self, end_criteria: f64) -> Self {
        self.end_criteria = end_criteria;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<Round>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_max_time(mut self, max_time: Option<SpreadTime>) -> Self {
        self.max_time = max_time;
        self
    }

    pub fn with_empty_neighborhood(mut self, policy: EmptyNeighborhoodPolicy) -> Self {
        self.empty_neighborhood = policy;
        self
    }

    /// Check the parameters against a topology of `node_count` nodes
    pub fn validate(&self, node_count: usize) -> Result<(), SpreadError> {
        let p = self.failure_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SpreadError::InvalidParameter {
                name: "failure_probability",
                value: p.to_string(),
                reason: "must lie in [0, 1]",
            });
        }

        let f = self.end_criteria;
        if !(f > 0.0 && f <= 1.0) {
            return Err(SpreadError::InvalidParameter {
                name: "end_criteria",
                value: f.to_string(),
                reason: "must lie in (0, 1]",
            });
        }

        if self.source >= node_count {
            return Err(SpreadError::InvalidParameter {
                name: "source",
                value: self.source.to_string(),
                reason: "must be a node of the topology",
            });
        }

        if let Some(max_time) = self.max_time {
            if max_time.is_nan() || max_time < 0.0 {
                return Err(SpreadError::InvalidParameter {
                    name: "max_time",
                    value: max_time.to_string(),
                    reason: "must be non-negative",
                });
            }
        }

        Ok(())
    }

    /// Number of infected nodes at which a run stops
    ///
    /// Smallest integer `k` with `k >= end_criteria * node_count`, never below 1.
    pub fn target_count(&self, node_count: usize) -> usize {
        let exact = self.end_criteria * node_count as f64;
        ((exact - TARGET_EPSILON).ceil().max(1.0) as usize).min(node_count)
    }
}

/// Result of one estimate, in the unit of its timing model
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpreadingTime {
    Rounds(Round),
    Time(SpreadTime),
}

impl SpreadingTime {
    pub fn as_f64(&self) -> f64 {
        match *self {
            SpreadingTime::Rounds(rounds) => rounds as f64,
            SpreadingTime::Time(time) => time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpreadError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("node {node} lists neighbor {neighbor} outside 0..{node_count}")]
    InvalidTopology {
        node: NodeId,
        neighbor: NodeId,
        node_count: usize,
    },

    #[error("topology has no nodes")]
    EmptyTopology,

    #[error("node {node} has no neighbors to push to")]
    EmptyNeighborhood { node: NodeId },

    /// Safety bound hit, or the target was shown to be unreachable
    #[error("spreading stalled at {infected}/{target} infected after {elapsed}")]
    SpreadingStalled {
        infected: usize,
        target: usize,
        elapsed: f64,
    },
}
