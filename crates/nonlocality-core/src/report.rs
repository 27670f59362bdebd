//! Serializable summary of one experiment run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::Bounds;
use crate::config::ExperimentConfig;
use crate::expectation::WitnessReport;
use crate::schedule::Family;

/// Result of [`crate::Experiment::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub id: String,
    pub family: Family,
    pub qubits: usize,
    pub device: Option<String>,
    pub executor: String,
    pub shots: u64,
    pub repetitions: usize,
    pub parallel_copies: usize,
    pub bounds: Bounds,
    /// One witness per parallel copy, in register order.
    pub witnesses: Vec<WitnessReport>,
    pub nonlocality_version: String,
}

impl ExperimentReport {
    pub fn new(
        config: &ExperimentConfig,
        executor: &str,
        bounds: Bounds,
        witnesses: Vec<WitnessReport>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            family: config.family,
            qubits: config.qubits,
            device: config.device.clone(),
            executor: executor.to_string(),
            shots: config.shots,
            repetitions: config.repetitions,
            parallel_copies: config.parallel_copies,
            bounds,
            witnesses,
            nonlocality_version: crate::VERSION.to_string(),
        }
    }

    /// Witness values in copy order.
    pub fn values(&self) -> Vec<f64> {
        self.witnesses.iter().map(|w| w.value).collect()
    }

    /// True when any copy violates the classical bound.
    pub fn any_violation(&self) -> bool {
        self.witnesses.iter().any(|w| w.violates_classical)
    }
}
