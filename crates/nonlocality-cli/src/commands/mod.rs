pub mod bounds;
pub mod chsh;
pub mod evaluate;
pub mod run;
pub mod schedule;
pub mod server;

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

use nonlocality_core::{Family, OutcomeHistogram, RotationTag};

/// Print `Error: {err}` and exit with status 1.
pub fn fail(err: impl Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}

/// Parse a family name, exiting on anything unknown.
pub fn parse_family(s: &str) -> Family {
    s.parse::<Family>().unwrap_or_else(|e| fail(e))
}

/// Read a JSON array of `{bitstring: count}` objects.
pub fn load_histograms(path: &Path) -> Result<Vec<OutcomeHistogram>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let raw: Vec<BTreeMap<String, u64>> = serde_json::from_str(&contents)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    raw.into_iter()
        .enumerate()
        .map(|(i, counts)| {
            OutcomeHistogram::try_from(counts)
                .map_err(|e| format!("histogram {i} in {}: {e}", path.display()))
        })
        .collect()
}

/// Same as [`load_histograms`], exiting on failure.
pub fn load_histograms_or_exit(path: &str) -> Vec<OutcomeHistogram> {
    load_histograms(Path::new(path)).unwrap_or_else(|e| fail(e))
}

/// Gate sequence of one rotation as text, e.g. `sdg h`.
pub fn gate_text(rotation: RotationTag) -> String {
    rotation
        .gates()
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serialize to pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}
