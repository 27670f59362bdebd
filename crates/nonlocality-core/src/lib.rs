//! # nonlocality-core
//!
//! **Correlator bookkeeping for Bell-type experiments on real quantum hardware.**
//!
//! `nonlocality-core` turns an N-party inequality (Mermin, Svetlichny, CHSH)
//! into the measurement bases to run, tells the execution layer which local
//! rotations to apply, and folds the returned outcome histograms into signed
//! witness values that can be compared against classical and quantum bounds.
//!
//! ## Quick Start
//!
//! ```
//! use nonlocality_core::{Family, OutcomeHistogram, correlator_schedule, evaluate};
//!
//! let schedule = correlator_schedule(Family::Mermin, 3).unwrap();
//! let histograms = vec![OutcomeHistogram::from_counts([("000", 1024u64)]).unwrap(); schedule.len()];
//!
//! let report = evaluate(&schedule, &histograms).unwrap();
//! assert_eq!(report.value, 2.0);
//! assert!(!report.violates_classical);
//! ```
//!
//! ## Architecture
//!
//! Schedule → Measurement plans → Executor → Aggregate → Evaluate → Report
//!
//! Circuits are never built here. An [`Executor`] receives
//! [`MeasurementPlan`]s and returns one histogram per plan; everything on
//! either side of that call is pure, synchronous and in-memory.
//!
//! Packed circuits (several parallel copies, several measurement rounds) are
//! split back into per-copy histograms by [`aggregate`] before evaluation.

pub mod basis;
pub mod bounds;
pub mod chsh;
pub mod config;
pub mod error;
pub mod executor;
pub mod expectation;
pub mod experiment;
pub mod histogram;
pub mod plan;
pub mod report;
pub mod schedule;
mod tables;

pub use basis::{BasisString, BasisSymbol, Gate, RotationTag, rotations};
pub use bounds::{Bounds, QUANTUM_TOLERANCE, bounds};
pub use chsh::{
    CHSH_SETTINGS, ChshCircuit, ChshCurve, ChshSetting, chsh_plans, chsh_witnesses,
    chsh_witnesses_flat, theta_sweep, two_bit_expectation,
};
pub use config::{DEFAULT_SHOTS, ExperimentConfig, load_config_from_path};
pub use error::{CorrelatorError, Result};
pub use executor::{Executor, ReplayExecutor};
pub use expectation::{
    CorrelatorTerm, WitnessReport, evaluate, evaluate_packed, evaluate_parallel, expectation,
    witness,
};
pub use experiment::Experiment;
pub use histogram::{OutcomeHistogram, aggregate, fold_repetitions};
pub use plan::{Measurement, MeasurementPlan, RegisterLayout, plan, plan_schedule};
pub use report::ExperimentReport;
pub use schedule::{
    CorrelatorSchedule, Family, InequalityInstance, Schedule, correlator_schedule, schedule,
    supported_instances,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
