use nonlocality_core::{ChshCurve, theta_sweep};

pub fn run(counts_path: &str, thetas: Option<usize>, json: bool) {
    let histograms = super::load_histograms_or_exit(counts_path);
    let n = thetas.unwrap_or(histograms.len() / 4);
    let angles = theta_sweep(n);
    let curve = ChshCurve::from_flat(&angles, &histograms).unwrap_or_else(|e| super::fail(e));

    if json {
        super::print_json(&curve);
        return;
    }

    println!("{:>8} {:>9} {:>9}", "theta", "CHSH1", "CHSH2");
    for ((t, c1), c2) in curve.thetas.iter().zip(&curve.chsh1).zip(&curve.chsh2) {
        let mark = if curve.bounds.violates_classical(*c1) || curve.bounds.violates_classical(*c2) {
            " *"
        } else {
            ""
        };
        println!("{t:>8.4} {c1:>+9.4} {c2:>+9.4}{mark}");
    }
    println!();
    println!(
        "max |CHSH| = {:.4}  (classical {:.4}, Tsirelson {:.4}); * marks violations",
        curve.max_abs(),
        curve.bounds.classical,
        curve.bounds.quantum
    );
}
