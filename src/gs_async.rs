//! Asynchronous Spreading Module
//!
//! Continuous time: every infected node wakes up according to its own
//! unit-rate Poisson process and pushes once per wake-up. All pending
//! wake-ups share one time-ordered queue.

use log::{debug, trace};

use crate::gs_event_queue::EventQueue;
use crate::gs_infection::{attempt_push, check_neighborhood, InfectionState};
use crate::gs_interface::{SpreadError, SpreadParams, SpreadTime};
use crate::gs_random::RandomSource;
use crate::gs_topology::Topology;

/// Activation rate of every node's Poisson clock
pub const ACTIVATION_RATE: f64 = 1.0;

fn stalled(state: &InfectionState, target: usize, elapsed: SpreadTime) -> SpreadError {
    SpreadError::SpreadingStalled {
        infected: state.count(),
        target,
        elapsed,
    }
}

/// Time of the push that brings the infected count to `end_criteria` of all
/// nodes
///
/// Returns 0.0 if the source alone already meets the target.
pub fn estimate_asynchronous<R: RandomSource + ?Sized>(
    topology: &Topology,
    params: &SpreadParams,
    rng: &mut R,
) -> Result<SpreadTime, SpreadError> {
    run_events(topology, params, rng, false)
}

/// Same result distribution as [`estimate_asynchronous`], dropping wake-ups of
/// nodes whose neighbors are all infected instead of rescheduling them
pub fn estimate_asynchronous_fast<R: RandomSource + ?Sized>(
    topology: &Topology,
    params: &SpreadParams,
    rng: &mut R,
) -> Result<SpreadTime, SpreadError> {
    run_events(topology, params, rng, true)
}

fn run_events<R: RandomSource + ?Sized>(
    topology: &Topology,
    params: &SpreadParams,
    rng: &mut R,
    prune: bool,
) -> Result<SpreadTime, SpreadError> {
    params.validate(topology.len())?;
    let target = params.target_count(topology.len());
    let mut state = if prune {
        InfectionState::with_frontier(topology, params.source)
    } else {
        InfectionState::new(topology, params.source)
    };

    if state.count() >= target {
        return Ok(0.0);
    }

    let mut queue = EventQueue::new();
    queue.schedule(rng.exponential(ACTIVATION_RATE), params.source);

    let mut processed = 0u64;
    let mut discarded = 0u64;
    let mut last_time = 0.0;

    loop {
        let event = match queue.pop() {
            Some(event) => event,
            // only the pruning variant drains its queue: every infected
            // node is saturated and the target is out of reach
            None => return Err(stalled(&state, target, last_time)),
        };

        if let Some(max_time) = params.max_time {
            if event.time > max_time {
                return Err(stalled(&state, target, max_time));
            }
        }
        last_time = event.time;

        if prune
            && (!check_neighborhood(topology, event.node, params)?
                || state.is_saturated(topology, event.node))
        {
            discarded += 1;
            continue;
        }
        processed += 1;

        let mut newly_infected = None;
        if let Some(chosen) = attempt_push(topology, event.node, params, rng)? {
            if state.infect(topology, chosen) {
                trace!("t={:.4}: {} infected {}", event.time, event.node, chosen);
                newly_infected = Some(chosen);
            }
        }

        if state.count() >= target {
            debug!(
                "asynchronous spread from {} reached {}/{} at t={:.4} ({} events, {} discarded, {} pending)",
                params.source,
                state.count(),
                topology.len(),
                event.time,
                processed,
                discarded,
                queue.len()
            );
            return Ok(event.time);
        }

        queue.schedule(event.time + rng.exponential(ACTIVATION_RATE), event.node);
        if let Some(node) = newly_infected {
            queue.schedule(event.time + rng.exponential(ACTIVATION_RATE), node);
        }
    }
}
