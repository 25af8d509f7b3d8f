//! Failure-probability sweep module
//!
//! Drives the spreading engine the way the experiments use it:
//! - Sweep the push failure probability over a list of values
//! - Generate several independent graph instances per value
//! - Run many Monte Carlo trials per graph from uniformly chosen sources
//! - Average the returned spreading times

pub mod config;
pub mod runner;
pub mod stats;

pub use config::ScenarioFile;
pub use runner::SweepRunner;
