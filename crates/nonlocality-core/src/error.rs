//! Error types for correlator construction and witness evaluation.
//!
//! Every failure is local and synchronous. The core never retries and never
//! terminates the process; callers decide whether to re-run the experiment.

use thiserror::Error;

use crate::schedule::Family;

/// Result type alias for correlator operations.
pub type Result<T> = std::result::Result<T, CorrelatorError>;

/// Errors raised while building schedules or evaluating histograms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelatorError {
    /// No basis table exists for this (family, qubits) pair.
    #[error("Unknown inequality: {family} with {qubits} qubits")]
    UnknownInequality {
        /// Inequality family requested.
        family: Family,
        /// Qubit count requested.
        qubits: usize,
    },

    /// A basis string contained a character outside {x, y, c, d}.
    #[error("Unrecognized basis symbol: {0:?}")]
    UnrecognizedBasisSymbol(char),

    /// Basis, coefficient, or histogram lists are not index-aligned.
    #[error("Length mismatch in {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which list was checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Histogram has zero total shots.
    #[error("Empty histogram: total shot count is zero")]
    EmptyHistogram,

    /// A histogram key is not a well-formed bitstring.
    #[error("Invalid bitstring {bitstring:?}: {reason}")]
    InvalidBitstring {
        /// Offending key.
        bitstring: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Shot counts add up to more than `u64::MAX`.
    #[error("Shot count overflow while adding {count} to {bitstring:?}")]
    CountOverflow {
        /// Key being counted.
        bitstring: String,
        /// Count that did not fit.
        count: u64,
    },

    /// Register geometry does not match the histogram or plan request.
    #[error("Invalid register layout: {0}")]
    InvalidLayout(String),

    /// Experiment configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The execution collaborator failed to produce results.
    #[error("Execution failed: {0}")]
    Execution(String),
}

impl CorrelatorError {
    /// Create an unknown inequality error.
    pub fn unknown_inequality(family: Family, qubits: usize) -> Self {
        Self::UnknownInequality { family, qubits }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Create an invalid bitstring error.
    pub fn invalid_bitstring(bitstring: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBitstring {
            bitstring: bitstring.into(),
            reason: reason.into(),
        }
    }
}
