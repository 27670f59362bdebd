//! Measurement plans: what the executor must do on the physical register.
//!
//! A plan says which rotation to apply on each physical qubit and where each
//! measurement lands in the classical register. Several identical copies of
//! one sub-experiment can share a circuit (`parallel_copies`, used to probe
//! crosstalk), and the register can be measured several times with a reset in
//! between (`repetitions`).
//!
//! Classical bit layout for `P = qubits * parallel_copies` physical qubits:
//! round `r` writes physical qubit `h` into clbit `h + r * P`. The resulting
//! bitstrings split back with [`aggregate`] using `parallel_copies` as the
//! sub-experiment count.

use serde::{Deserialize, Serialize};

use crate::basis::{BasisString, RotationTag};
use crate::error::{CorrelatorError, Result};
use crate::histogram::{OutcomeHistogram, aggregate};
use crate::schedule::CorrelatorSchedule;

// ---------------------------------------------------------------------------
// Register layout
// ---------------------------------------------------------------------------

/// Geometry of one packed circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterLayout {
    /// Qubits in one sub-experiment.
    pub qubits: usize,
    /// Identical sub-experiments side by side on the register.
    pub parallel_copies: usize,
    /// Measurement rounds per shot.
    pub repetitions: usize,
}

impl RegisterLayout {
    pub fn new(qubits: usize, parallel_copies: usize, repetitions: usize) -> Result<Self> {
        let layout = Self {
            qubits,
            parallel_copies,
            repetitions,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// One copy, one round.
    pub fn single(qubits: usize) -> Self {
        Self {
            qubits,
            parallel_copies: 1,
            repetitions: 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.qubits == 0 || self.parallel_copies == 0 || self.repetitions == 0 {
            return Err(CorrelatorError::InvalidLayout(format!(
                "qubits ({}), parallel_copies ({}) and repetitions ({}) must be positive",
                self.qubits, self.parallel_copies, self.repetitions
            )));
        }
        Ok(())
    }

    pub fn physical_qubits(&self) -> usize {
        self.qubits * self.parallel_copies
    }

    pub fn total_clbits(&self) -> usize {
        self.physical_qubits() * self.repetitions
    }

    /// Split a histogram produced under this layout into one histogram per copy.
    pub fn partition(&self, histogram: &OutcomeHistogram) -> Result<Vec<OutcomeHistogram>> {
        if histogram.width() != 0 && histogram.width() != self.total_clbits() {
            return Err(CorrelatorError::InvalidLayout(format!(
                "bitstring width {} does not match {} classical bits",
                histogram.width(),
                self.total_clbits()
            )));
        }
        aggregate(histogram, self.qubits, self.parallel_copies)
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// One qubit-to-clbit measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub round: usize,
    pub qubit: usize,
    pub clbit: usize,
}

/// Everything needed to build one circuit for one basis string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPlan {
    /// Basis for a single sub-experiment.
    pub basis: BasisString,
    pub layout: RegisterLayout,
    /// Rotation per physical qubit.
    pub rotations: Vec<RotationTag>,
    /// Measurements in round order, then qubit order.
    pub measurements: Vec<Measurement>,
    /// Reset all physical qubits between consecutive rounds.
    pub reset_between_rounds: bool,
}

/// Plan one basis string under `layout`.
pub fn plan(basis: &BasisString, layout: RegisterLayout) -> Result<MeasurementPlan> {
    layout.validate()?;
    if basis.len() != layout.qubits {
        return Err(CorrelatorError::length_mismatch(
            "basis symbols",
            layout.qubits,
            basis.len(),
        ));
    }

    let rotations = basis.repeated(layout.parallel_copies).rotations();
    let physical = layout.physical_qubits();
    let mut measurements = Vec::with_capacity(layout.total_clbits());
    for round in 0..layout.repetitions {
        for qubit in 0..physical {
            measurements.push(Measurement {
                round,
                qubit,
                clbit: qubit + round * physical,
            });
        }
    }

    Ok(MeasurementPlan {
        basis: basis.clone(),
        layout,
        rotations,
        measurements,
        reset_between_rounds: layout.repetitions > 1,
    })
}

/// Plan every basis string of a schedule, in schedule order.
pub fn plan_schedule(
    schedule: &CorrelatorSchedule,
    layout: RegisterLayout,
) -> Result<Vec<MeasurementPlan>> {
    if layout.qubits != schedule.instance.qubits {
        return Err(CorrelatorError::InvalidLayout(format!(
            "layout has {} qubits per copy, {} needs {}",
            layout.qubits, schedule.instance, schedule.instance.qubits
        )));
    }
    schedule.bases.iter().map(|b| plan(b, layout)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Family, correlator_schedule};

    fn basis(s: &str) -> BasisString {
        s.parse().unwrap()
    }

    #[test]
    fn test_layout_sizes() {
        let l = RegisterLayout::new(3, 2, 4).unwrap();
        assert_eq!(l.physical_qubits(), 6);
        assert_eq!(l.total_clbits(), 24);
        assert!(RegisterLayout::new(3, 0, 1).is_err());
        assert!(RegisterLayout::new(0, 1, 1).is_err());
    }

    #[test]
    fn test_single_plan() {
        let p = plan(&basis("xyc"), RegisterLayout::single(3)).unwrap();
        assert_eq!(
            p.rotations,
            vec![RotationTag::XBasis, RotationTag::YBasis, RotationTag::CBasis]
        );
        assert_eq!(p.measurements.len(), 3);
        assert!(!p.reset_between_rounds);
        assert!(p.measurements.iter().all(|m| m.qubit == m.clbit));
    }

    #[test]
    fn test_parallel_copies_repeat_rotations() {
        let p = plan(&basis("xy"), RegisterLayout::new(2, 3, 1).unwrap()).unwrap();
        assert_eq!(p.rotations.len(), 6);
        assert_eq!(p.rotations[4], RotationTag::XBasis);
        assert_eq!(p.rotations[5], RotationTag::YBasis);
    }

    #[test]
    fn test_repetition_clbit_map() {
        let p = plan(&basis("xxy"), RegisterLayout::new(3, 2, 2).unwrap()).unwrap();
        assert!(p.reset_between_rounds);
        let second: Vec<usize> = p
            .measurements
            .iter()
            .filter(|m| m.round == 1)
            .map(|m| m.clbit)
            .collect();
        assert_eq!(second, vec![6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_clbit_map_is_bijection() {
        for (q, c, r) in [(3, 1, 1), (3, 2, 3), (4, 3, 2), (7, 1, 5)] {
            let layout = RegisterLayout::new(q, c, r).unwrap();
            let p = plan(&BasisString::new(vec![crate::basis::BasisSymbol::X; q]), layout).unwrap();
            let mut clbits: Vec<usize> = p.measurements.iter().map(|m| m.clbit).collect();
            clbits.sort_unstable();
            assert_eq!(clbits, (0..layout.total_clbits()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_plan_rejects_wrong_basis_length() {
        assert!(matches!(
            plan(&basis("xy"), RegisterLayout::single(3)),
            Err(CorrelatorError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_plan_schedule() {
        let s = correlator_schedule(Family::Mermin, 4).unwrap();
        let plans = plan_schedule(&s, RegisterLayout::new(4, 2, 1).unwrap()).unwrap();
        assert_eq!(plans.len(), s.len());
        assert_eq!(plans[0].basis, s.bases[0]);
        assert!(plan_schedule(&s, RegisterLayout::single(3)).is_err());
    }

    #[test]
    fn test_partition_checks_width() {
        let layout = RegisterLayout::new(3, 2, 1).unwrap();
        let h = OutcomeHistogram::from_counts([("000110", 10u64), ("111001", 6)]).unwrap();
        let parts = layout.partition(&h).unwrap();
        assert_eq!(parts[1].get("110"), 10);
        let narrow = OutcomeHistogram::from_counts([("000", 1u64)]).unwrap();
        assert!(layout.partition(&narrow).is_err());
    }
}
