use nonlocality_core::{
    Family, QUANTUM_TOLERANCE, WitnessReport, correlator_schedule, evaluate_packed,
};

pub struct EvaluateCommandConfig<'a> {
    pub family: &'a str,
    pub qubits: usize,
    pub counts_path: &'a str,
    pub sub_experiments: usize,
    pub json: bool,
}

pub fn run(cfg: EvaluateCommandConfig<'_>) {
    let family = super::parse_family(cfg.family);
    if family == Family::Chsh {
        super::fail("CHSH uses its own combination rule; use `nonlocality chsh`");
    }
    let schedule = correlator_schedule(family, cfg.qubits).unwrap_or_else(|e| super::fail(e));
    let histograms = super::load_histograms_or_exit(cfg.counts_path);
    let reports = evaluate_packed(&schedule, &histograms, cfg.sub_experiments)
        .unwrap_or_else(|e| super::fail(e));

    if cfg.json {
        super::print_json(&reports);
        return;
    }

    for (i, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            println!("sub-experiment {i}");
        }
        print_report(report);
        println!();
    }
}

fn print_report(report: &WitnessReport) {
    println!(
        "  {:<8} {:>5} {:>9} {:>8}",
        "basis", "sign", "E", "shots"
    );
    for t in &report.terms {
        println!(
            "  {:<8} {:>+5} {:>9.4} {:>8}",
            t.basis.to_string(),
            t.coefficient,
            t.expectation,
            t.shots
        );
    }
    let verdict = if report.violates_classical {
        "VIOLATES classical bound"
    } else {
        "within classical bound"
    };
    println!(
        "  {} = {:.4}  (classical {:.4}, quantum {:.4}): {verdict}",
        report.instance, report.value, report.bounds.classical, report.bounds.quantum
    );
    if report.bounds.exceeds_quantum(report.value, QUANTUM_TOLERANCE) {
        println!("  note: value is above the quantum bound; check the counts and schedule order");
    }
}
