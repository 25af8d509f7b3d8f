//! Configuration for failure-probability sweeps

use gs_rust::{GraphModel, Round, SpreadTime, SpreaderKind};

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
pub struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    pub meta: ScenarioMeta,

    /// Sweep configuration (missing keys take defaults)
    #[serde(default)]
    pub config: SweepConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ScenarioMeta {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Configuration for a sweep
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Nodes per generated graph
    pub num_nodes: usize,

    /// Expected degree of generated graphs
    pub average_neighbors: f64,

    pub graph_model: GraphModel,

    /// Which of the four spreaders to run
    pub spreader: SpreaderKind,

    /// Push failure probabilities to sweep
    pub failure_probabilities: Vec<f64>,

    /// Independent graphs per failure probability
    pub graph_instances: usize,

    /// Trials per graph
    pub monte_carlo_runs: usize,

    /// Fraction of nodes that ends a trial
    pub end_criteria: f64,

    pub max_rounds: Option<Round>,
    pub max_time: Option<SpreadTime>,

    /// Random seed (None = generate random)
    #[serde(skip)]
    pub seed: Option<[u8; 32]>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            num_nodes: 100_000,
            average_neighbors: 10.0,
            graph_model: GraphModel::ErdosRenyi,
            spreader: SpreaderKind::AsynchronousFast,
            failure_probabilities: default_failure_probabilities(),
            graph_instances: 5,
            monte_carlo_runs: 100,
            end_criteria: 0.9,
            max_rounds: Some(10_000),
            max_time: Some(10_000.0),
            seed: None,
        }
    }
}

/// 0.0, 0.1, ..., 0.9
pub fn default_failure_probabilities() -> Vec<f64> {
    (0..10).map(|i| i as f64 / 10.0).collect()
}

impl ScenarioFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_scenario_takes_defaults() {
        let yaml = r#"
meta:
  name: small
config:
  num_nodes: 500
  spreader: synchronous
  graph_model: geometric_random
"#;
        let scenario = ScenarioFile::from_yaml(yaml).unwrap();
        assert_eq!(scenario.meta.name.as_deref(), Some("small"));
        assert_eq!(scenario.config.num_nodes, 500);
        assert_eq!(scenario.config.spreader, SpreaderKind::Synchronous);
        assert_eq!(scenario.config.graph_model, GraphModel::GeometricRandom);
        assert_eq!(scenario.config.monte_carlo_runs, 100);
        assert_eq!(scenario.config.failure_probabilities.len(), 10);
        assert!(scenario.config.seed.is_none());
    }

    #[test]
    fn test_default_failure_probabilities() {
        let probabilities = default_failure_probabilities();
        assert_eq!(probabilities.first(), Some(&0.0));
        assert_eq!(probabilities.last(), Some(&0.9));
    }
}
