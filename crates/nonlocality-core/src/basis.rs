//! Measurement-basis symbols and their pre-measurement rotations.
//!
//! A measurement in a non-computational basis is a local rotation followed by
//! a Z measurement. Each [`BasisSymbol`] maps to one fixed gate sequence:
//!
//! | symbol | direction       | gates (applied left to right) |
//! |--------|-----------------|-------------------------------|
//! | `x`    | X               | H                             |
//! | `y`    | Y               | Sdg, H                        |
//! | `c`    | (Y − X)/√2      | Tdg, Sdg, H                   |
//! | `d`    | −(X + Y)/√2     | T, S, H                       |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelatorError, Result};

// ---------------------------------------------------------------------------
// Gates and rotation tags
// ---------------------------------------------------------------------------

/// Single-qubit Clifford+T gate used in basis rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Hadamard.
    H,
    /// Phase gate, a π/2 rotation about Z.
    S,
    /// Inverse phase gate.
    Sdg,
    /// π/4 rotation about Z.
    T,
    /// Inverse of `T`.
    Tdg,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H => write!(f, "h"),
            Self::S => write!(f, "s"),
            Self::Sdg => write!(f, "sdg"),
            Self::T => write!(f, "t"),
            Self::Tdg => write!(f, "tdg"),
        }
    }
}

/// Rotation applied to one qubit before a computational-basis measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationTag {
    /// Hadamard only.
    XBasis,
    /// Sdg then Hadamard.
    YBasis,
    /// Tdg, Sdg, then Hadamard.
    CBasis,
    /// T, S, then Hadamard.
    DBasis,
}

impl RotationTag {
    /// Gate sequence in application order.
    pub fn gates(self) -> &'static [Gate] {
        match self {
            Self::XBasis => &[Gate::H],
            Self::YBasis => &[Gate::Sdg, Gate::H],
            Self::CBasis => &[Gate::Tdg, Gate::Sdg, Gate::H],
            Self::DBasis => &[Gate::T, Gate::S, Gate::H],
        }
    }
}

// ---------------------------------------------------------------------------
// Basis symbols
// ---------------------------------------------------------------------------

/// Local measurement direction for one party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasisSymbol {
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// (Y − X)/√2.
    C,
    /// −(X + Y)/√2.
    D,
}

impl BasisSymbol {
    /// Parse one symbol, case-insensitive.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'x' => Ok(Self::X),
            'y' => Ok(Self::Y),
            'c' => Ok(Self::C),
            'd' => Ok(Self::D),
            _ => Err(CorrelatorError::UnrecognizedBasisSymbol(c)),
        }
    }

    /// Lowercase character form.
    pub fn as_char(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::C => 'c',
            Self::D => 'd',
        }
    }

    /// Rotation that maps this direction onto the Z measurement axis.
    pub fn rotation(self) -> RotationTag {
        match self {
            Self::X => RotationTag::XBasis,
            Self::Y => RotationTag::YBasis,
            Self::C => RotationTag::CBasis,
            Self::D => RotationTag::DBasis,
        }
    }
}

impl fmt::Display for BasisSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Basis strings
// ---------------------------------------------------------------------------

/// Ordered basis assignment, one symbol per measured qubit.
///
/// Serializes as its lowercase text form (`"xxy"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BasisString(Vec<BasisSymbol>);

impl BasisString {
    /// Wrap symbols already in qubit order.
    pub fn new(symbols: Vec<BasisSymbol>) -> Self {
        Self(symbols)
    }

    /// Symbols in qubit order.
    pub fn symbols(&self) -> &[BasisSymbol] {
        &self.0
    }

    /// Number of parties (qubits) measured.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-party string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of occurrences of `symbol`.
    pub fn count(&self, symbol: BasisSymbol) -> usize {
        self.0.iter().filter(|&&s| s == symbol).count()
    }

    /// One rotation per qubit, in qubit order.
    pub fn rotations(&self) -> Vec<RotationTag> {
        self.0.iter().map(|s| s.rotation()).collect()
    }

    /// The same assignment laid out `copies` times back to back, for
    /// registers that host several identical sub-experiments.
    pub fn repeated(&self, copies: usize) -> Self {
        let mut symbols = Vec::with_capacity(self.0.len() * copies);
        for _ in 0..copies {
            symbols.extend_from_slice(&self.0);
        }
        Self(symbols)
    }
}

impl FromStr for BasisString {
    type Err = CorrelatorError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(BasisSymbol::from_char)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl TryFrom<String> for BasisString {
    type Error = CorrelatorError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BasisString> for String {
    fn from(b: BasisString) -> Self {
        b.to_string()
    }
}

impl fmt::Display for BasisString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.as_char())?;
        }
        Ok(())
    }
}

/// Map a basis string such as `"xyc"` to per-qubit rotation tags.
///
/// Fails on the first character outside {x, y, c, d}; nothing is skipped.
pub fn rotations(basis: &str) -> Result<Vec<RotationTag>> {
    basis
        .chars()
        .map(|c| BasisSymbol::from_char(c).map(BasisSymbol::rotation))
        .collect()
}
