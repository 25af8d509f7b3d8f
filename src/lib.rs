//! # gsRust - Gossip Spreading Time Estimation
//!
//! Estimates how long a single piece of information, injected at one node of a
//! large random graph, takes to reach a given fraction of all nodes under
//! randomized, lossy push gossip.
//!
//! ## Core Components
//!
//! - **Topology**: read-only adjacency table shared across Monte Carlo trials
//! - **Synchronous spreaders**: discrete rounds, every infected node pushes once per round
//! - **Asynchronous spreaders**: continuous time, unit-rate Poisson activations per node
//! - **Fast variants**: same result distribution, skipping nodes whose neighbors are all infected
//! - **RandomSource**: explicit, per-trial random stream
//!
//! ## Usage
//!
//! ```no_run
//! use gs_rust::{estimate_synchronous_fast, SeededSource, SpreadParams, Topology};
//!
//! let topology = Topology::cycle(100)?;
//! let params = SpreadParams::new(0, 0.2).with_end_criteria(0.9);
//! let mut rng = SeededSource::seed_from_u64(7);
//!
//! let rounds = estimate_synchronous_fast(&topology, &params, &mut rng)?;
//! println!("90% informed after {} rounds", rounds);
//! # Ok::<(), gs_rust::SpreadError>(())
//! ```
//!
//! ## Sweeps
//!
//! The `spread_sweep` binary in `simulator/` runs failure-probability sweeps
//! over freshly generated graphs from YAML scenario files.

// Core spreading modules
pub mod gs_async;
pub mod gs_event_queue;
pub mod gs_infection;
pub mod gs_interface;
pub mod gs_spreader;
pub mod gs_sync;

// Inputs
pub mod gs_generators;
pub mod gs_random;
pub mod gs_topology;

// Re-export commonly used types
pub use gs_async::{estimate_asynchronous, estimate_asynchronous_fast};
pub use gs_generators::{erdos_renyi, geometric_random, GraphModel};
pub use gs_interface::{
    EmptyNeighborhoodPolicy, NodeId, Round, SpreadError, SpreadParams, SpreadTime, SpreadingTime,
};
pub use gs_random::{parse_seed_hex, resolve_seed, RandomSource, SeededSource};
pub use gs_spreader::SpreaderKind;
pub use gs_sync::{estimate_synchronous, estimate_synchronous_fast};
pub use gs_topology::Topology;
