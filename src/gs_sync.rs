//! Synchronous Spreading Module
//!
//! Discrete rounds: every active node attempts one push per round, all based
//! on the set of nodes infected at the start of the round. Nodes infected
//! during a round push for the first time in the next one.

use log::{debug, trace};

use crate::gs_infection::{attempt_push, check_neighborhood, InfectionState};
use crate::gs_interface::{NodeId, Round, SpreadError, SpreadParams};
use crate::gs_random::RandomSource;
use crate::gs_topology::Topology;

fn check_round_budget(
    params: &SpreadParams,
    round: Round,
    state: &InfectionState,
    target: usize,
) -> Result<(), SpreadError> {
    match params.max_rounds {
        Some(max_rounds) if round >= max_rounds => Err(SpreadError::SpreadingStalled {
            infected: state.count(),
            target,
            elapsed: round as f64,
        }),
        _ => Ok(()),
    }
}

/// Rounds until `end_criteria` of all nodes hold the information
///
/// Returns 0 if the source alone already meets the target.
pub fn estimate_synchronous<R: RandomSource + ?Sized>(
    topology: &Topology,
    params: &SpreadParams,
    rng: &mut R,
) -> Result<Round, SpreadError> {
    params.validate(topology.len())?;
    let target = params.target_count(topology.len());
    let mut state = InfectionState::new(topology, params.source);
    let mut round: Round = 0;

    while state.count() < target {
        check_round_budget(params, round, &state, target)?;

        // infection order is append-only, so the first `active` entries are
        // exactly the start-of-round infected set
        let active = state.count();
        for i in 0..active {
            let node = state.order()[i];
            if let Some(chosen) = attempt_push(topology, node, params, rng)? {
                state.infect(topology, chosen);
            }
        }

        round += 1;
        trace!("round {}: {} -> {} infected", round, active, state.count());
    }

    debug!(
        "synchronous spread from {} reached {}/{} in {} rounds",
        params.source,
        state.count(),
        topology.len(),
        round
    );
    Ok(round)
}

/// Same result distribution as [`estimate_synchronous`], iterating only over
/// infected nodes that still have an uninfected neighbor
pub fn estimate_synchronous_fast<R: RandomSource + ?Sized>(
    topology: &Topology,
    params: &SpreadParams,
    rng: &mut R,
) -> Result<Round, SpreadError> {
    params.validate(topology.len())?;
    let target = params.target_count(topology.len());
    let mut state = InfectionState::with_frontier(topology, params.source);
    let mut round: Round = 0;

    let mut frontier: Vec<NodeId> = vec![params.source];
    let mut next: Vec<NodeId> = Vec::new();
    let mut newly: Vec<NodeId> = Vec::new();
    let mut used_up = 0usize;

    while state.count() < target {
        if frontier.is_empty() {
            // nobody left who can infect anyone: target unreachable
            return Err(SpreadError::SpreadingStalled {
                infected: state.count(),
                target,
                elapsed: round as f64,
            });
        }
        check_round_budget(params, round, &state, target)?;

        let active = frontier.len();
        next.clear();
        for &node in &frontier {
            if !check_neighborhood(topology, node, params)? || state.is_saturated(topology, node) {
                used_up += 1;
                continue;
            }
            next.push(node);

            if let Some(chosen) = attempt_push(topology, node, params, rng)? {
                if state.infect(topology, chosen) {
                    newly.push(chosen);
                }
            }
        }
        // survivors keep their order, newcomers follow in infection order
        next.append(&mut newly);
        std::mem::swap(&mut frontier, &mut next);

        round += 1;
        trace!(
            "round {}: frontier {} -> {}, {} infected",
            round,
            active,
            frontier.len(),
            state.count()
        );
    }

    debug!(
        "fast synchronous spread from {} reached {}/{} in {} rounds ({} nodes retired)",
        params.source,
        state.count(),
        topology.len(),
        round,
        used_up
    );
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gs_interface::EmptyNeighborhoodPolicy;
    use crate::gs_random::{ScriptedSource, SeededSource};

    fn both<R: RandomSource>(
        topology: &Topology,
        params: &SpreadParams,
        make_rng: impl Fn() -> R,
    ) -> (Result<Round, SpreadError>, Result<Round, SpreadError>) {
        (
            estimate_synchronous(topology, params, &mut make_rng()),
            estimate_synchronous_fast(topology, params, &mut make_rng()),
        )
    }

    #[test]
    fn test_four_cycle_reaches_three_in_two_rounds() {
        // choosing index 0 means node i always pushes to i + 1
        let topology = Topology::cycle(4).unwrap();
        let params = SpreadParams::new(0, 0.0).with_end_criteria(0.75);

        let (exact, fast) = both(&topology, &params, || ScriptedSource::new(0.5, 0, 1.0));
        assert_eq!(exact.unwrap(), 2);
        assert_eq!(fast.unwrap(), 2);
    }

    #[test]
    fn test_source_alone_meets_target() {
        let topology = Topology::cycle(10).unwrap();
        let params = SpreadParams::new(3, 0.5).with_end_criteria(0.1);

        let (exact, fast) = both(&topology, &params, || SeededSource::seed_from_u64(1));
        assert_eq!(exact.unwrap(), 0);
        assert_eq!(fast.unwrap(), 0);
    }

    #[test]
    fn test_forced_decisions_give_same_round() {
        // a ring where every push goes forward: node k is infected in round k,
        // while the fast variant retires nodes behind the wavefront
        let topology = Topology::cycle(10).unwrap();
        let params = SpreadParams::new(0, 0.0).with_end_criteria(1.0);

        let (exact, fast) = both(&topology, &params, || ScriptedSource::new(0.5, 0, 1.0));
        assert_eq!(exact.unwrap(), 9);
        assert_eq!(fast.unwrap(), 9);
    }

    #[test]
    fn test_same_seed_same_round_before_saturation() {
        // with end_criteria 0.5 on a complete graph nobody saturates before the
        // target is met, so both variants consume identical draws
        let topology = Topology::complete(40).unwrap();
        for seed in 0..20u64 {
            let params = SpreadParams::new((seed % 40) as NodeId, 0.3).with_end_criteria(0.5);
            let (exact, fast) =
                both(&topology, &params, || SeededSource::seed_from_u64(seed));
            assert_eq!(exact.unwrap(), fast.unwrap(), "seed {}", seed);
        }
    }

    #[test]
    fn test_exact_and_fast_agree_on_average() {
        let topology = Topology::complete(64).unwrap();
        let params = SpreadParams::new(0, 0.3);
        let trials = 400;

        let mut exact_rng = SeededSource::seed_from_u64(100);
        let mut fast_rng = SeededSource::seed_from_u64(200);
        let mut exact_sum = 0.0;
        let mut fast_sum = 0.0;
        for _ in 0..trials {
            exact_sum += estimate_synchronous(&topology, &params, &mut exact_rng).unwrap() as f64;
            fast_sum +=
                estimate_synchronous_fast(&topology, &params, &mut fast_rng).unwrap() as f64;
        }
        let (exact_mean, fast_mean) = (exact_sum / trials as f64, fast_sum / trials as f64);
        assert!(
            (exact_mean - fast_mean).abs() < 0.5,
            "exact {} vs fast {}",
            exact_mean,
            fast_mean
        );
    }

    #[test]
    fn test_zero_failure_complete_graph_is_logarithmic() {
        let topology = Topology::complete(1024).unwrap();
        let params = SpreadParams::new(17, 0.0);
        let mut rng = SeededSource::seed_from_u64(8);

        for _ in 0..5 {
            let exact = estimate_synchronous(&topology, &params, &mut rng).unwrap();
            let fast = estimate_synchronous_fast(&topology, &params, &mut rng).unwrap();
            // log2(1024) = 10; push gossip needs a small constant factor more
            assert!(exact >= 10 && exact <= 30, "exact took {}", exact);
            assert!(fast >= 10 && fast <= 30, "fast took {}", fast);
        }
    }

    #[test]
    fn test_full_failure_hits_round_bound() {
        let topology = Topology::complete(8).unwrap();
        let params = SpreadParams::new(0, 1.0).with_max_rounds(Some(50));

        let (exact, fast) = both(&topology, &params, || SeededSource::seed_from_u64(4));
        for result in [exact, fast] {
            assert_eq!(
                result.unwrap_err(),
                SpreadError::SpreadingStalled {
                    infected: 1,
                    target: 8,
                    elapsed: 50.0
                }
            );
        }
    }

    #[test]
    fn test_disconnected_graph() {
        // {0, 1} and {2, 3} never meet
        let topology = Topology::new(vec![vec![1], vec![0], vec![3], vec![2]]).unwrap();
        let params = SpreadParams::new(0, 0.0)
            .with_end_criteria(0.75)
            .with_max_rounds(Some(100));

        let exact = estimate_synchronous(&topology, &params, &mut SeededSource::seed_from_u64(2));
        assert!(matches!(
            exact,
            Err(SpreadError::SpreadingStalled { infected: 2, target: 3, .. })
        ));

        // the fast variant notices the empty frontier without any bound
        let unbounded = params.with_max_rounds(None);
        let fast =
            estimate_synchronous_fast(&topology, &unbounded, &mut SeededSource::seed_from_u64(2));
        assert_eq!(
            fast.unwrap_err(),
            SpreadError::SpreadingStalled {
                infected: 2,
                target: 3,
                elapsed: 2.0
            }
        );
    }

    #[test]
    fn test_empty_neighborhood_policies() {
        // node 1 is a dead end
        let topology = Topology::new(vec![vec![1, 2], vec![], vec![0]]).unwrap();
        let params = SpreadParams::new(0, 0.0).with_end_criteria(1.0);

        let (exact, fast) = both(&topology, &params, || SeededSource::seed_from_u64(6));
        assert!(exact.unwrap() >= 2);
        assert!(fast.unwrap() >= 2);

        let strict = params.with_empty_neighborhood(EmptyNeighborhoodPolicy::Fail);
        let (exact, fast) = both(&topology, &strict, || ScriptedSource::new(0.5, 0, 1.0));
        assert_eq!(exact.unwrap_err(), SpreadError::EmptyNeighborhood { node: 1 });
        assert_eq!(fast.unwrap_err(), SpreadError::EmptyNeighborhood { node: 1 });
    }

    #[test]
    fn test_invalid_parameters() {
        let topology = Topology::cycle(4).unwrap();
        let mut rng = SeededSource::seed_from_u64(0);

        let bad_source = SpreadParams::new(9, 0.0);
        assert!(matches!(
            estimate_synchronous(&topology, &bad_source, &mut rng),
            Err(SpreadError::InvalidParameter { name: "source", .. })
        ));

        let bad_p = SpreadParams::new(0, 2.0);
        assert!(matches!(
            estimate_synchronous_fast(&topology, &bad_p, &mut rng),
            Err(SpreadError::InvalidParameter { name: "failure_probability", .. })
        ));
    }
}
