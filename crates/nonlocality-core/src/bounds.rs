//! Classical and quantum bounds for the unnormalized witness sums.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelatorError, Result};
use crate::schedule::{Family, InequalityInstance, supported_instances};

/// Slack allowed above the quantum maximum before a value is flagged as
/// exceeding it.
pub const QUANTUM_TOLERANCE: f64 = 1e-9;

/// Local-hidden-variable and quantum maxima of `|witness|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub classical: f64,
    pub quantum: f64,
}

impl Bounds {
    pub fn violates_classical(&self, value: f64) -> bool {
        value.abs() > self.classical
    }

    /// `|value|` beyond the quantum maximum, allowing `tolerance` for
    /// finite-shot noise.
    pub fn exceeds_quantum(&self, value: f64, tolerance: f64) -> bool {
        value.abs() > self.quantum + tolerance
    }
}

/// Bounds for a supported instance.
///
/// - Mermin n: classical `2^⌊n/2⌋`, quantum `2^(n-1)`
/// - Svetlichny n: classical `2^(n-1)`, quantum `2^(n-1)·√2`
/// - CHSH: classical 2, quantum 2√2
pub fn bounds(instance: InequalityInstance) -> Result<Bounds> {
    if !supported_instances().contains(&instance) {
        return Err(CorrelatorError::unknown_inequality(
            instance.family,
            instance.qubits,
        ));
    }
    let n = instance.qubits as i32;
    Ok(match instance.family {
        Family::Mermin => Bounds {
            classical: 2f64.powi(n / 2),
            quantum: 2f64.powi(n - 1),
        },
        Family::Svetlichny => Bounds {
            classical: 2f64.powi(n - 1),
            quantum: 2f64.powi(n - 1) * SQRT_2,
        },
        Family::Chsh => Bounds {
            classical: 2.0,
            quantum: 2.0 * SQRT_2,
        },
    })
}
