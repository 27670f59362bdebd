//! The seam between the core and whatever actually runs circuits.
//!
//! Circuit construction, compilation, submission and polling live behind
//! [`Executor`]. The core hands over measurement plans and gets back one
//! histogram per plan.

use log::debug;

use crate::error::{CorrelatorError, Result};
use crate::histogram::OutcomeHistogram;
use crate::plan::MeasurementPlan;

/// Builds, runs and collects the circuits for a batch of plans.
pub trait Executor {
    /// Short backend label for logs and reports.
    fn name(&self) -> &str;

    /// Run every plan for `shots` shots. Must return exactly one histogram
    /// per plan, in plan order.
    fn build_and_run(
        &mut self,
        plans: &[MeasurementPlan],
        shots: u64,
    ) -> Result<Vec<OutcomeHistogram>>;
}

/// Returns previously recorded histograms instead of running anything.
#[derive(Debug, Clone, Default)]
pub struct ReplayExecutor {
    label: String,
    histograms: Vec<OutcomeHistogram>,
}

impl ReplayExecutor {
    pub fn new(histograms: Vec<OutcomeHistogram>) -> Self {
        Self {
            label: "replay".to_string(),
            histograms,
        }
    }

    /// Use a custom label, e.g. the device the counts came from.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }
}

impl Executor for ReplayExecutor {
    fn name(&self) -> &str {
        &self.label
    }

    fn build_and_run(
        &mut self,
        plans: &[MeasurementPlan],
        shots: u64,
    ) -> Result<Vec<OutcomeHistogram>> {
        if plans.len() != self.histograms.len() {
            return Err(CorrelatorError::length_mismatch(
                "recorded histograms",
                plans.len(),
                self.histograms.len(),
            ));
        }
        for (i, (p, h)) in plans.iter().zip(&self.histograms).enumerate() {
            let clbits = p.layout.total_clbits();
            if !h.is_empty() && h.width() != clbits {
                return Err(CorrelatorError::Execution(format!(
                    "recorded histogram {i} ({}) is {} bits wide, plan needs {clbits}",
                    p.basis,
                    h.width()
                )));
            }
        }
        debug!(
            "{}: replaying {} histograms (requested {shots} shots each)",
            self.label,
            plans.len()
        );
        Ok(self.histograms.clone())
    }
}
