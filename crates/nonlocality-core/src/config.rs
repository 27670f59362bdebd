//! Experiment configuration.
//!
//! Configs are plain JSON; every field except `family` and `qubits` has a
//! default, so `{"family": "mermin", "qubits": 4}` is a complete file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelatorError, Result};
use crate::plan::RegisterLayout;
use crate::schedule::{Family, InequalityInstance, correlator_schedule};

/// Default shots per circuit.
pub const DEFAULT_SHOTS: u64 = 16384;

/// One Mermin or Svetlichny run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub family: Family,
    pub qubits: usize,
    pub shots: u64,
    /// Measurement rounds per shot, with resets in between.
    pub repetitions: usize,
    /// Identical sub-experiments packed side by side.
    pub parallel_copies: usize,
    /// Free-form backend label, carried into the report.
    pub device: Option<String>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            family: Family::Mermin,
            qubits: 3,
            shots: DEFAULT_SHOTS,
            repetitions: 1,
            parallel_copies: 1,
            device: None,
        }
    }
}

impl ExperimentConfig {
    pub fn new(family: Family, qubits: usize) -> Self {
        Self {
            family,
            qubits,
            ..Self::default()
        }
    }

    pub fn instance(&self) -> InequalityInstance {
        InequalityInstance::new(self.family, self.qubits)
    }

    pub fn layout(&self) -> RegisterLayout {
        RegisterLayout {
            qubits: self.qubits,
            parallel_copies: self.parallel_copies,
            repetitions: self.repetitions,
        }
    }

    /// Reject configs the runner cannot execute.
    pub fn validate(&self) -> Result<()> {
        if self.family == Family::Chsh {
            return Err(CorrelatorError::Config(
                "CHSH runs are angle sweeps; use the chsh path instead".to_string(),
            ));
        }
        if self.shots == 0 {
            return Err(CorrelatorError::Config("shots must be positive".to_string()));
        }
        if self.repetitions == 0 {
            return Err(CorrelatorError::Config(
                "repetitions must be positive".to_string(),
            ));
        }
        if self.parallel_copies == 0 {
            return Err(CorrelatorError::Config(
                "parallel_copies must be positive".to_string(),
            ));
        }
        correlator_schedule(self.family, self.qubits)?;
        Ok(())
    }
}

/// Load an experiment config JSON from disk.
pub fn load_config_from_path(path: &Path) -> std::io::Result<ExperimentConfig> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str::<ExperimentConfig>(&raw).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("failed to parse experiment config JSON: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = ExperimentConfig::default();
        assert_eq!(c.shots, 16384);
        assert_eq!(c.repetitions, 1);
        assert_eq!(c.parallel_copies, 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let mut c = ExperimentConfig::new(Family::Mermin, 4);
        c.shots = 0;
        assert!(matches!(c.validate(), Err(CorrelatorError::Config(_))));

        let mut c = ExperimentConfig::new(Family::Mermin, 4);
        c.parallel_copies = 0;
        assert!(c.validate().is_err());

        let mut c = ExperimentConfig::new(Family::Mermin, 4);
        c.repetitions = 0;
        assert!(c.validate().is_err());

        assert!(ExperimentConfig::new(Family::Chsh, 2).validate().is_err());
        assert!(matches!(
            ExperimentConfig::new(Family::Svetlichny, 5).validate(),
            Err(CorrelatorError::UnknownInequality { .. })
        ));
    }

    #[test]
    fn test_layout_from_config() {
        let mut c = ExperimentConfig::new(Family::Mermin, 5);
        c.parallel_copies = 2;
        c.repetitions = 3;
        assert_eq!(c.layout().total_clbits(), 30);
    }

    #[test]
    fn test_load_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"family": "svetlichny", "qubits": 4, "parallel_copies": 2, "device": "sim"}}"#
        )
        .unwrap();
        let c = load_config_from_path(file.path()).unwrap();
        assert_eq!(c.family, Family::Svetlichny);
        assert_eq!(c.qubits, 4);
        assert_eq!(c.parallel_copies, 2);
        assert_eq!(c.shots, DEFAULT_SHOTS);
        assert_eq!(c.device.as_deref(), Some("sim"));
    }

    #[test]
    fn test_load_config_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_config_from_path(file.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
