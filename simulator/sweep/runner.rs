//! Sweep runner

use gs_rust::{resolve_seed, RandomSource, SeededSource, SpreadError, SpreadParams};
use log::{debug, info};

use super::config::SweepConfig;
use super::stats::{SweepPoint, SweepResult};

/// Runs one sweep; every trial gets its own stream forked from the sweep seed
pub struct SweepRunner {
    config: SweepConfig,
    rng: SeededSource,
    seed: [u8; 32],
}

impl SweepRunner {
    pub fn new(config: SweepConfig) -> Self {
        let seed = resolve_seed(config.seed);
        Self {
            config,
            rng: SeededSource::from_seed(seed),
            seed,
        }
    }

    /// Main sweep loop
    pub fn run(mut self) -> Result<SweepResult, SpreadError> {
        info!(
            "Sweeping {} over {} failure probabilities ({} graphs x {} runs each)",
            self.config.spreader,
            self.config.failure_probabilities.len(),
            self.config.graph_instances,
            self.config.monte_carlo_runs
        );

        let probabilities = self.config.failure_probabilities.clone();
        let mut points = Vec::with_capacity(probabilities.len());
        for &failure_probability in &probabilities {
            let point = self.run_point(failure_probability)?;
            match point.mean() {
                Some(mean) => info!(
                    "p = {:.2}: mean {:.3} ({} stalled)",
                    failure_probability, mean, point.stalled
                ),
                None => info!("p = {:.2}: every trial stalled", failure_probability),
            }
            points.push(point);
        }

        Ok(SweepResult {
            seed_used: self.seed,
            spreader: self.config.spreader,
            num_nodes: self.config.num_nodes,
            points,
        })
    }

    fn run_point(&mut self, failure_probability: f64) -> Result<SweepPoint, SpreadError> {
        let mut point = SweepPoint::new(failure_probability);

        for instance in 0..self.config.graph_instances {
            let topology = self.config.graph_model.generate(
                self.config.num_nodes,
                self.config.average_neighbors,
                self.rng.rng_mut(),
            )?;
            debug!(
                "graph {}: {} nodes, average degree {:.2}",
                instance,
                topology.len(),
                topology.average_degree()
            );

            for _ in 0..self.config.monte_carlo_runs {
                let params = SpreadParams {
                    source: self.rng.choose_index(topology.len()),
                    failure_probability,
                    end_criteria: self.config.end_criteria,
                    max_rounds: self.config.max_rounds,
                    max_time: self.config.max_time,
                    ..Default::default()
                };
                let mut trial_rng = self.rng.fork();

                match self.config.spreader.estimate(&topology, &params, &mut trial_rng) {
                    Ok(elapsed) => point.record(elapsed.as_f64()),
                    Err(SpreadError::SpreadingStalled { infected, target, .. }) => {
                        debug!(
                            "trial from {} stalled at {}/{}",
                            params.source, infected, target
                        );
                        point.record_stall();
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(point)
    }
}
