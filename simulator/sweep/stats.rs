//! Results of a failure-probability sweep

use gs_rust::SpreaderKind;

/// Averages for one failure probability
#[derive(Debug, Clone, Default)]
pub struct SweepPoint {
    pub failure_probability: f64,

    /// Trials that reached the target
    pub completed: usize,

    /// Trials stopped by the safety bound or an unreachable target
    pub stalled: usize,

    /// Sum of spreading times over completed trials
    pub total_time: f64,
}

impl SweepPoint {
    pub fn new(failure_probability: f64) -> Self {
        Self {
            failure_probability,
            ..Default::default()
        }
    }

    pub fn record(&mut self, time: f64) {
        self.completed += 1;
        self.total_time += time;
    }

    pub fn record_stall(&mut self) {
        self.stalled += 1;
    }

    /// Mean spreading time over completed trials
    pub fn mean(&self) -> Option<f64> {
        if self.completed == 0 {
            return None;
        }
        Some(self.total_time / self.completed as f64)
    }
}

/// Sweep result
#[derive(Debug)]
pub struct SweepResult {
    /// Seed used for the sweep
    pub seed_used: [u8; 32],

    pub spreader: SpreaderKind,
    pub num_nodes: usize,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    /// Print a summary of the sweep
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Gossip Spreading Sweep Results                  ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Seed: {:?}", self.seed_used);
        println!("  Spreader: {}", self.spreader);
        println!("  Nodes: {}\n", self.num_nodes);

        let unit = if self.spreader.is_synchronous() {
            "rounds"
        } else {
            "time"
        };
        println!("  {:>6}  {:>12}  {:>9}  {:>7}", "p", unit, "completed", "stalled");
        for point in &self.points {
            let mean = match point.mean() {
                Some(mean) => format!("{:.3}", mean),
                None => "-".to_string(),
            };
            println!(
                "  {:>6.2}  {:>12}  {:>9}  {:>7}",
                point.failure_probability, mean, point.completed, point.stalled
            );
        }
        println!();
    }
}
