use nonlocality_core::{Schedule, bounds};

pub fn run(family: &str, qubits: usize, json: bool) {
    let family = super::parse_family(family);
    let schedule = nonlocality_core::schedule(family, qubits).unwrap_or_else(|e| super::fail(e));

    if json {
        super::print_json(&schedule);
        return;
    }

    let instance = schedule.instance();
    match &schedule {
        Schedule::Correlators(s) => {
            println!("{instance}: {} correlator terms", s.len());
            println!();
            println!("  {:>4}  {:<8}  gates per qubit", "sign", "basis");
            for (basis, coefficient) in s.terms() {
                let gates: Vec<String> = basis
                    .rotations()
                    .into_iter()
                    .map(super::gate_text)
                    .collect();
                println!("  {coefficient:>+4}  {:<8}  {}", basis.to_string(), gates.join(" | "));
            }
        }
        Schedule::Chsh { settings } => {
            println!("{instance}: Bell pair, Ry(θ) on qubit 0, then one of");
            println!();
            for setting in settings {
                let [h0, h1] = setting.hadamards();
                println!(
                    "  {setting}  q0: {:<2} q1: {}",
                    if h0 { "h" } else { "-" },
                    if h1 { "h" } else { "-" }
                );
            }
        }
    }

    if let Ok(b) = bounds(instance) {
        println!();
        println!("  classical bound {:.4}, quantum bound {:.4}", b.classical, b.quantum);
    }
}
