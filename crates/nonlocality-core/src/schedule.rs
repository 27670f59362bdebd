//! Basis schedules for each supported inequality instance.
//!
//! An instance is a `(family, qubits)` pair. Mermin and Svetlichny instances
//! resolve to an ordered list of basis strings with index-aligned signed
//! coefficients; CHSH resolves to its fixed four-setting basis set, which is
//! combined by a different rule (see [`crate::chsh`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basis::BasisString;
use crate::chsh::{CHSH_SETTINGS, ChshSetting};
use crate::error::{CorrelatorError, Result};
use crate::tables::{self, CorrelatorTable};

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

/// Inequality family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Mermin,
    Svetlichny,
    Chsh,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mermin => write!(f, "mermin"),
            Self::Svetlichny => write!(f, "svetlichny"),
            Self::Chsh => write!(f, "chsh"),
        }
    }
}

impl FromStr for Family {
    type Err = CorrelatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mermin" => Ok(Self::Mermin),
            "svetlichny" | "svet" => Ok(Self::Svetlichny),
            "chsh" => Ok(Self::Chsh),
            _ => Err(CorrelatorError::Config(format!(
                "unknown inequality family '{s}' (expected mermin, svetlichny, or chsh)"
            ))),
        }
    }
}

/// A concrete inequality: family plus number of parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InequalityInstance {
    pub family: Family,
    pub qubits: usize,
}

impl InequalityInstance {
    pub fn new(family: Family, qubits: usize) -> Self {
        Self { family, qubits }
    }
}

impl fmt::Display for InequalityInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family, self.qubits)
    }
}

/// Every instance with a table entry, in a stable order.
pub fn supported_instances() -> Vec<InequalityInstance> {
    let mut out: Vec<InequalityInstance> = (3..=7)
        .map(|n| InequalityInstance::new(Family::Mermin, n))
        .collect();
    out.extend((3..=4).map(|n| InequalityInstance::new(Family::Svetlichny, n)));
    out.push(InequalityInstance::new(Family::Chsh, 2));
    out
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// Basis strings with their signed coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatorSchedule {
    pub instance: InequalityInstance,
    pub bases: Vec<BasisString>,
    pub coefficients: Vec<f64>,
}

impl CorrelatorSchedule {
    /// Number of correlator terms (circuits to run).
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// `(basis, coefficient)` pairs in schedule order.
    pub fn terms(&self) -> impl Iterator<Item = (&BasisString, f64)> + '_ {
        self.bases.iter().zip(self.coefficients.iter().copied())
    }
}

/// Resolved schedule for any supported instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Mermin/Svetlichny: signed sum of parity correlators.
    Correlators(CorrelatorSchedule),
    /// CHSH: fixed settings, no coefficient list.
    Chsh { settings: [ChshSetting; 4] },
}

impl Schedule {
    pub fn instance(&self) -> InequalityInstance {
        match self {
            Self::Correlators(s) => s.instance,
            Self::Chsh { .. } => InequalityInstance::new(Family::Chsh, 2),
        }
    }
}

fn table_for(instance: InequalityInstance) -> Option<&'static CorrelatorTable> {
    match (instance.family, instance.qubits) {
        (Family::Mermin, 3) => Some(&tables::MERMIN_3),
        (Family::Mermin, 4) => Some(&tables::MERMIN_4),
        (Family::Mermin, 5) => Some(&tables::MERMIN_5),
        (Family::Mermin, 6) => Some(&tables::MERMIN_6),
        (Family::Mermin, 7) => Some(&tables::MERMIN_7),
        (Family::Svetlichny, 3) => Some(&tables::SVETLICHNY_3),
        (Family::Svetlichny, 4) => Some(&tables::SVETLICHNY_4),
        _ => None,
    }
}

/// Look up the schedule for `(family, qubits)`.
pub fn schedule(family: Family, qubits: usize) -> Result<Schedule> {
    match family {
        Family::Chsh if qubits == 2 => Ok(Schedule::Chsh {
            settings: CHSH_SETTINGS,
        }),
        Family::Chsh => Err(CorrelatorError::unknown_inequality(family, qubits)),
        _ => correlator_schedule(family, qubits).map(Schedule::Correlators),
    }
}

/// Look up a signed-coefficient schedule. CHSH has none and is reported as
/// [`CorrelatorError::UnknownInequality`].
pub fn correlator_schedule(family: Family, qubits: usize) -> Result<CorrelatorSchedule> {
    let instance = InequalityInstance::new(family, qubits);
    let table = table_for(instance)
        .ok_or_else(|| CorrelatorError::unknown_inequality(family, qubits))?;

    let bases = table
        .bases
        .iter()
        .map(|b| b.parse())
        .collect::<Result<Vec<BasisString>>>()?;
    let coefficients: Vec<f64> = table.signs.iter().map(|&s| f64::from(s)).collect();

    if bases.len() != coefficients.len() {
        return Err(CorrelatorError::length_mismatch(
            "coefficients",
            bases.len(),
            coefficients.len(),
        ));
    }

    Ok(CorrelatorSchedule {
        instance,
        bases,
        coefficients,
    })
}
