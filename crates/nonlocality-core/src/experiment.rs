//! End-to-end run of one Mermin or Svetlichny experiment.
//!
//! schedule → plans → executor → aggregation → evaluation → report.

use log::{info, warn};

use crate::bounds::{QUANTUM_TOLERANCE, bounds};
use crate::config::ExperimentConfig;
use crate::error::{CorrelatorError, Result};
use crate::executor::Executor;
use crate::expectation::evaluate_parallel;
use crate::histogram::OutcomeHistogram;
use crate::plan::{MeasurementPlan, plan_schedule};
use crate::report::ExperimentReport;
use crate::schedule::{CorrelatorSchedule, correlator_schedule};

/// A validated experiment ready to run.
#[derive(Debug, Clone)]
pub struct Experiment {
    config: ExperimentConfig,
    schedule: CorrelatorSchedule,
    plans: Vec<MeasurementPlan>,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;
        let schedule = correlator_schedule(config.family, config.qubits)?;
        let plans = plan_schedule(&schedule, config.layout())?;
        Ok(Self {
            config,
            schedule,
            plans,
        })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn schedule(&self) -> &CorrelatorSchedule {
        &self.schedule
    }

    pub fn plans(&self) -> &[MeasurementPlan] {
        &self.plans
    }

    /// Run every circuit through `executor` and evaluate the results.
    pub fn run<E: Executor + ?Sized>(&self, executor: &mut E) -> Result<ExperimentReport> {
        let instance = self.schedule.instance;
        info!(
            "{instance}: running {} circuits on {} ({} shots, {} copies, {} rounds)",
            self.plans.len(),
            executor.name(),
            self.config.shots,
            self.config.parallel_copies,
            self.config.repetitions
        );

        let raw = executor.build_and_run(&self.plans, self.config.shots)?;
        if raw.len() != self.plans.len() {
            return Err(CorrelatorError::Execution(format!(
                "{} returned {} histograms for {} circuits",
                executor.name(),
                raw.len(),
                self.plans.len()
            )));
        }
        for (plan, h) in self.plans.iter().zip(&raw) {
            if h.total() != self.config.shots {
                warn!(
                    "{instance}: {} histogram has {} shots, requested {}",
                    plan.basis,
                    h.total(),
                    self.config.shots
                );
            }
        }

        // per_copy[k][i] = copy k, schedule term i
        let layout = self.config.layout();
        let mut per_copy: Vec<Vec<OutcomeHistogram>> = (0..layout.parallel_copies)
            .map(|_| Vec::with_capacity(raw.len()))
            .collect();
        for h in &raw {
            for (k, part) in layout.partition(h)?.into_iter().enumerate() {
                per_copy[k].push(part);
            }
        }
        let jobs: Vec<_> = per_copy
            .into_iter()
            .map(|histograms| (self.schedule.clone(), histograms))
            .collect();
        let witnesses = evaluate_parallel(&jobs)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        for (copy, w) in witnesses.iter().enumerate() {
            info!("{instance}: copy {copy} witness = {:.4}", w.value);
            if w.bounds.exceeds_quantum(w.value, QUANTUM_TOLERANCE) {
                warn!(
                    "{instance}: copy {copy} witness {:.4} exceeds quantum bound {:.4}",
                    w.value, w.bounds.quantum
                );
            }
        }

        Ok(ExperimentReport::new(
            &self.config,
            executor.name(),
            bounds(instance)?,
            witnesses,
        ))
    }
}
