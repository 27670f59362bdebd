//! Two-party CHSH witnesses over a sweep of measurement angles.
//!
//! Each angle θ uses four circuits: a Bell pair, `Ry(θ)` on qubit 0, then a
//! measurement in one of the settings ZZ, ZX, XZ, XX (X via a Hadamard).
//! Two witnesses are formed per angle:
//!
//! ```text
//! CHSH1 = E(ZZ) + E(ZX) - E(XZ) + E(XX)
//! CHSH2 = E(ZZ) - E(ZX) + E(XZ) + E(XX)
//! ```

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, bounds};
use crate::error::{CorrelatorError, Result};
use crate::histogram::OutcomeHistogram;
use crate::schedule::{Family, InequalityInstance};

// ---------------------------------------------------------------------------
// Settings and circuits
// ---------------------------------------------------------------------------

/// Two-qubit measurement setting; first letter is qubit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChshSetting {
    ZZ,
    ZX,
    XZ,
    XX,
}

/// Settings in the order histograms are expected per angle.
pub const CHSH_SETTINGS: [ChshSetting; 4] = [
    ChshSetting::ZZ,
    ChshSetting::ZX,
    ChshSetting::XZ,
    ChshSetting::XX,
];

impl ChshSetting {
    /// Whether each qubit gets a Hadamard before measurement.
    pub fn hadamards(self) -> [bool; 2] {
        match self {
            Self::ZZ => [false, false],
            Self::ZX => [false, true],
            Self::XZ => [true, false],
            Self::XX => [true, true],
        }
    }
}

impl fmt::Display for ChshSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZZ => write!(f, "ZZ"),
            Self::ZX => write!(f, "ZX"),
            Self::XZ => write!(f, "XZ"),
            Self::XX => write!(f, "XX"),
        }
    }
}

/// One CHSH circuit description for the execution layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChshCircuit {
    /// `Ry` angle applied to qubit 0 after Bell-pair preparation.
    pub theta: f64,
    pub setting: ChshSetting,
    /// Hadamard before measurement, per qubit.
    pub hadamard: [bool; 2],
}

/// `n` evenly spaced angles over `[0, 2π]`, endpoints included.
pub fn theta_sweep(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 2.0 * PI / (n - 1) as f64;
            (0..n).map(|i| i as f64 * step).collect()
        }
    }
}

/// Four circuits per angle, in [`CHSH_SETTINGS`] order.
pub fn chsh_plans(thetas: &[f64]) -> Vec<ChshCircuit> {
    thetas
        .iter()
        .flat_map(|&theta| {
            CHSH_SETTINGS
                .iter()
                .map(move |&setting| ChshCircuit {
                    theta,
                    setting,
                    hadamard: setting.hadamards(),
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Witnesses
// ---------------------------------------------------------------------------

/// Parity expectation over exactly two bits.
pub fn two_bit_expectation(histogram: &OutcomeHistogram) -> Result<f64> {
    let total = histogram.total();
    if total == 0 {
        return Err(CorrelatorError::EmptyHistogram);
    }
    if histogram.width() != 2 {
        let key = histogram
            .iter()
            .next()
            .map(|(k, _)| k.to_string())
            .unwrap_or_default();
        return Err(CorrelatorError::invalid_bitstring(
            key,
            format!("CHSH outcomes must be 2 bits, got {}", histogram.width()),
        ));
    }
    let mut signed: i128 = 0;
    for (bits, count) in histogram.iter() {
        let b = bits.as_bytes();
        if (b[0] == b'1') == (b[1] == b'1') {
            signed += i128::from(count);
        } else {
            signed -= i128::from(count);
        }
    }
    Ok(signed as f64 / total as f64)
}

/// CHSH1 and CHSH2 for each angle; histograms per angle in ZZ, ZX, XZ, XX order.
pub fn chsh_witnesses(per_angle: &[[OutcomeHistogram; 4]]) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut chsh1 = Vec::with_capacity(per_angle.len());
    let mut chsh2 = Vec::with_capacity(per_angle.len());
    for [zz, zx, xz, xx] in per_angle {
        let zz = two_bit_expectation(zz)?;
        let zx = two_bit_expectation(zx)?;
        let xz = two_bit_expectation(xz)?;
        let xx = two_bit_expectation(xx)?;
        chsh1.push(zz + zx - xz + xx);
        chsh2.push(zz - zx + xz + xx);
    }
    Ok((chsh1, chsh2))
}

/// Same as [`chsh_witnesses`] for a flat list holding four histograms per angle.
pub fn chsh_witnesses_flat(histograms: &[OutcomeHistogram]) -> Result<(Vec<f64>, Vec<f64>)> {
    if histograms.len() % 4 != 0 {
        return Err(CorrelatorError::length_mismatch(
            "CHSH histograms (multiple of 4)",
            histograms.len().next_multiple_of(4),
            histograms.len(),
        ));
    }
    let grouped: Vec<[OutcomeHistogram; 4]> = histograms
        .chunks_exact(4)
        .map(|c| [c[0].clone(), c[1].clone(), c[2].clone(), c[3].clone()])
        .collect();
    chsh_witnesses(&grouped)
}

/// CHSH witnesses over an angle sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChshCurve {
    pub thetas: Vec<f64>,
    pub chsh1: Vec<f64>,
    pub chsh2: Vec<f64>,
    pub bounds: Bounds,
}

impl ChshCurve {
    /// Evaluate a flat histogram list against its angle sweep.
    pub fn from_flat(thetas: &[f64], histograms: &[OutcomeHistogram]) -> Result<Self> {
        if histograms.len() != thetas.len() * 4 {
            return Err(CorrelatorError::length_mismatch(
                "CHSH histograms",
                thetas.len() * 4,
                histograms.len(),
            ));
        }
        let (chsh1, chsh2) = chsh_witnesses_flat(histograms)?;
        Ok(Self {
            thetas: thetas.to_vec(),
            chsh1,
            chsh2,
            bounds: bounds(InequalityInstance::new(Family::Chsh, 2))?,
        })
    }

    /// Largest `|CHSH|` over both curves.
    pub fn max_abs(&self) -> f64 {
        self.chsh1
            .iter()
            .chain(&self.chsh2)
            .fold(0.0, |m, v| m.max(v.abs()))
    }

    /// Angles at which either witness exceeds the classical bound.
    pub fn violating_thetas(&self) -> Vec<f64> {
        self.thetas
            .iter()
            .zip(self.chsh1.iter().zip(&self.chsh2))
            .filter(|(_, (a, b))| {
                self.bounds.violates_classical(**a) || self.bounds.violates_classical(**b)
            })
            .map(|(t, _)| *t)
            .collect()
    }
}
