//! Integration tests for nonlocality-core.
//!
//! These tests drive the full pipeline through the public API:
//! config → schedule → plans → executor → aggregation → witness report.

use std::f64::consts::{PI, SQRT_2};
use std::io::Write;

use nonlocality_core::{
    ChshCurve, CorrelatorError, Executor, Experiment, ExperimentConfig, Family, MeasurementPlan,
    OutcomeHistogram, ReplayExecutor, Schedule, bounds, chsh_plans, correlator_schedule,
    evaluate, evaluate_packed, load_config_from_path, schedule, supported_instances, theta_sweep,
};

/// Ideal GHZ-type statistics: every term's outcome parity matches its sign.
fn ideal_histograms(family: Family, qubits: usize, shots: u64) -> Vec<OutcomeHistogram> {
    let s = correlator_schedule(family, qubits).unwrap();
    let even = "0".repeat(qubits);
    let odd = format!("{}1", "0".repeat(qubits - 1));
    s.coefficients
        .iter()
        .map(|&c| {
            let key = if c > 0.0 { &even } else { &odd };
            OutcomeHistogram::from_counts([(key.as_str(), shots)]).unwrap()
        })
        .collect()
}

#[test]
fn every_instance_resolves() {
    for inst in supported_instances() {
        let s = schedule(inst.family, inst.qubits).unwrap();
        assert_eq!(s.instance(), inst);
        bounds(inst).unwrap();
    }
}

#[test]
fn sign_matched_histograms_reach_term_count() {
    for n in 3..=7 {
        let s = correlator_schedule(Family::Mermin, n).unwrap();
        let report = evaluate(&s, &ideal_histograms(Family::Mermin, n, 512)).unwrap();
        assert_eq!(report.value, s.len() as f64);
        assert!(report.violates_classical);
    }
}

#[test]
fn svetlichny3_terms_use_all_four_rotations() {
    let s = correlator_schedule(Family::Svetlichny, 3).unwrap();
    let report = evaluate(&s, &ideal_histograms(Family::Svetlichny, 3, 100)).unwrap();
    assert_eq!(report.value, 8.0);
    assert_eq!(report.terms.len(), 8);
}

#[test]
fn crosstalk_pair_matches_separate_runs() {
    let s = correlator_schedule(Family::Mermin, 4).unwrap();
    let a = ideal_histograms(Family::Mermin, 4, 1000);
    let b: Vec<OutcomeHistogram> = (0..s.len())
        .map(|_| OutcomeHistogram::from_counts([("0000", 500u64), ("0001", 500)]).unwrap())
        .collect();

    // Pack copy 0 and copy 1 side by side on one 8-bit register.
    let packed: Vec<OutcomeHistogram> = a
        .iter()
        .map(|h| {
            let (left, _) = h.iter().next().unwrap();
            OutcomeHistogram::from_counts([
                (format!("{left}0000"), 500u64),
                (format!("{left}0001"), 500),
            ])
            .unwrap()
        })
        .collect();

    let reports = evaluate_packed(&s, &packed, 2).unwrap();
    assert_eq!(reports[0].value, evaluate(&s, &a).unwrap().value);
    assert_eq!(reports[1].value, evaluate(&s, &b).unwrap().value);
    assert_eq!(reports[1].value, 0.0);
}

#[test]
fn experiment_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"family": "mermin", "qubits": 3, "shots": 200, "repetitions": 2, "device": "replay-sim"}}"#
    )
    .unwrap();
    let config = load_config_from_path(file.path()).unwrap();
    let exp = Experiment::new(config).unwrap();

    // Two rounds per shot, both rounds ideal.
    let raw: Vec<OutcomeHistogram> = ideal_histograms(Family::Mermin, 3, 200)
        .into_iter()
        .map(|h| {
            let (key, n) = h.iter().next().unwrap();
            OutcomeHistogram::from_counts([(format!("{key}{key}"), n)]).unwrap()
        })
        .collect();
    let mut executor = ReplayExecutor::new(raw);
    let report = exp.run(&mut executor).unwrap();

    assert_eq!(report.values(), vec![4.0]);
    assert_eq!(report.device.as_deref(), Some("replay-sim"));
    assert_eq!(report.witnesses[0].terms[0].shots, 400);
    assert!(report.any_violation());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["family"], "mermin");
    assert_eq!(json["witnesses"][0]["terms"][3]["basis"], "yyy");
}

/// Executor that reports fewer histograms than requested.
struct Lossy;

impl Executor for Lossy {
    fn name(&self) -> &str {
        "lossy"
    }

    fn build_and_run(
        &mut self,
        plans: &[MeasurementPlan],
        _shots: u64,
    ) -> nonlocality_core::Result<Vec<OutcomeHistogram>> {
        Ok(vec![OutcomeHistogram::default(); plans.len() - 1])
    }
}

#[test]
fn experiment_rejects_short_executor_output() {
    let exp = Experiment::new(ExperimentConfig::new(Family::Mermin, 3)).unwrap();
    assert!(matches!(
        exp.run(&mut Lossy),
        Err(CorrelatorError::Execution(_))
    ));
}

#[test]
fn chsh_sweep_end_to_end() {
    let thetas = theta_sweep(15);
    let circuits = chsh_plans(&thetas);
    assert_eq!(circuits.len(), 60);

    // Ideal Bell pair with Ry(θ) on qubit 0.
    let shots = 200_000u64;
    let histograms: Vec<OutcomeHistogram> = circuits
        .iter()
        .map(|c| {
            let e = match c.hadamard {
                [false, false] | [true, true] => c.theta.cos(),
                [false, true] => c.theta.sin(),
                [true, false] => -c.theta.sin(),
            };
            let even = ((shots as f64) * (1.0 + e) / 2.0).round() as u64;
            OutcomeHistogram::from_counts([("00", even), ("01", shots - even)]).unwrap()
        })
        .collect();

    let curve = ChshCurve::from_flat(&thetas, &histograms).unwrap();
    assert!(curve.max_abs() <= 2.0 * SQRT_2 + 1e-3);
    assert!(curve.max_abs() > 2.0);
    assert!(!curve.violating_thetas().is_empty());
    assert!(curve.violating_thetas().iter().all(|t| (0.0..=2.0 * PI).contains(t)));
}

#[test]
fn chsh_schedule_is_fixed_settings() {
    match schedule(Family::Chsh, 2).unwrap() {
        Schedule::Chsh { settings } => assert_eq!(settings.len(), 4),
        other => panic!("unexpected schedule {other:?}"),
    }
}
