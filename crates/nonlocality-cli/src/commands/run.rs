use std::path::Path;

use log::info;
use nonlocality_core::{Experiment, ReplayExecutor, load_config_from_path};

pub fn run(config_path: &str, counts_path: &str) {
    let config = load_config_from_path(Path::new(config_path)).unwrap_or_else(|e| super::fail(e));
    let label = config.device.clone().unwrap_or_else(|| "replay".to_string());
    let experiment = Experiment::new(config).unwrap_or_else(|e| super::fail(e));

    let histograms = super::load_histograms_or_exit(counts_path);
    info!("loaded {} histograms from {counts_path}", histograms.len());
    let mut executor = ReplayExecutor::new(histograms).with_label(label);

    let report = experiment
        .run(&mut executor)
        .unwrap_or_else(|e| super::fail(e));
    super::print_json(&report);
}
