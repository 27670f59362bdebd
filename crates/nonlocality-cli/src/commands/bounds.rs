use nonlocality_core::{Family, bounds, correlator_schedule, supported_instances};
use serde::Serialize;

#[derive(Serialize)]
struct BoundsRow {
    instance: String,
    terms: usize,
    classical: f64,
    quantum: f64,
}

fn rows() -> Vec<BoundsRow> {
    supported_instances()
        .into_iter()
        .filter_map(|inst| {
            let b = bounds(inst).ok()?;
            let terms = match inst.family {
                Family::Chsh => 4,
                _ => correlator_schedule(inst.family, inst.qubits).ok()?.len(),
            };
            Some(BoundsRow {
                instance: inst.to_string(),
                terms,
                classical: b.classical,
                quantum: b.quantum,
            })
        })
        .collect()
}

pub fn run(json: bool) {
    let rows = rows();
    if json {
        super::print_json(&rows);
        return;
    }

    println!("{:<14} {:>6} {:>10} {:>10}", "instance", "terms", "classical", "quantum");
    println!("{}", "-".repeat(43));
    for r in &rows {
        println!(
            "{:<14} {:>6} {:>10.4} {:>10.4}",
            r.instance, r.terms, r.classical, r.quantum
        );
    }
}
