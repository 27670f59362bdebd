//! Mermin witness from recorded counts.
//!
//! Builds the Mermin-4 schedule, prints the rotation each circuit needs,
//! replays a set of noisy GHZ-like histograms and prints the witness.
//!
//! Run: `cargo run --example mermin_replay`

use nonlocality_core::{
    Experiment, ExperimentConfig, Family, OutcomeHistogram, ReplayExecutor, Result,
};

fn main() -> Result<()> {
    let mut config = ExperimentConfig::new(Family::Mermin, 4);
    config.shots = 1000;
    let experiment = Experiment::new(config)?;

    for (plan, coefficient) in experiment
        .plans()
        .iter()
        .zip(&experiment.schedule().coefficients)
    {
        let gates: Vec<String> = plan
            .rotations
            .iter()
            .map(|r| {
                r.gates()
                    .iter()
                    .map(|g| g.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        println!("{coefficient:+} {}  [{}]", plan.basis, gates.join(" | "));
    }

    // 90% of shots land on the parity the coefficient asks for.
    let mut histograms = Vec::new();
    for &c in &experiment.schedule().coefficients {
        let (good, bad) = if c > 0.0 { ("0000", "0001") } else { ("0001", "0000") };
        histograms.push(OutcomeHistogram::from_counts([(good, 900u64), (bad, 100)])?);
    }

    let mut executor = ReplayExecutor::new(histograms).with_label("recorded");
    let report = experiment.run(&mut executor)?;
    let w = &report.witnesses[0];
    println!(
        "\n{}: witness = {:.3} (classical {}, quantum {})",
        w.instance, w.value, w.bounds.classical, w.bounds.quantum
    );
    println!("violates classical bound: {}", w.violates_classical);
    Ok(())
}
