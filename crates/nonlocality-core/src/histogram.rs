//! Outcome histograms and sub-register aggregation.
//!
//! Executors report one `bitstring -> count` map per circuit. When a single
//! circuit hosts several independent sub-experiments, or measures the same
//! register over several rounds, the bitstring is wider than one
//! sub-experiment and has to be split before any expectation is taken.
//!
//! Chunk order is left to right: chunk 0 is the block holding qubit indices
//! `0..qubits`. Chunk `i` belongs to sub-experiment `i % sub_experiments`, so
//! chunks beyond the first `sub_experiments` are later measurement rounds and
//! fold into the same sub-histogram.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelatorError, Result};

// ---------------------------------------------------------------------------
// OutcomeHistogram
// ---------------------------------------------------------------------------

/// Bitstring → count map with a fixed key width.
///
/// Serializes as a plain JSON object (`{"010": 12, "111": 3}`). The total
/// shot count always fits in a `u64`; inserts that would overflow it fail
/// with [`CorrelatorError::CountOverflow`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct OutcomeHistogram {
    width: usize,
    counts: BTreeMap<String, u64>,
    total: u64,
}

impl OutcomeHistogram {
    /// Empty histogram whose keys will be `width` bits wide.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Build from `(bitstring, count)` pairs.
    ///
    /// Whitespace inside a key (register separators some SDKs emit) is
    /// removed. Keys that normalize to the same bitstring are summed. Every
    /// key must have the same width and contain only `'0'` and `'1'`.
    pub fn from_counts<I, K>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut hist: Option<Self> = None;
        for (key, count) in counts {
            let bits = normalize_bitstring(key.as_ref())?;
            let h = hist.get_or_insert_with(|| Self::new(bits.len()));
            h.insert_normalized(bits, count)?;
        }
        Ok(hist.unwrap_or_default())
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn add(&mut self, bitstring: &str, count: u64) -> Result<()> {
        let bits = normalize_bitstring(bitstring)?;
        if self.counts.is_empty() && self.width == 0 {
            self.width = bits.len();
        }
        self.insert_normalized(bits, count)
    }

    fn insert_normalized(&mut self, bits: String, count: u64) -> Result<()> {
        if bits.len() != self.width {
            return Err(CorrelatorError::invalid_bitstring(
                bits,
                format!("expected width {}", self.width),
            ));
        }
        self.bump(bits, count)
    }

    /// Add to an already validated key. Entries never exceed the total, so
    /// checking the total covers them too.
    fn bump(&mut self, bits: String, count: u64) -> Result<()> {
        let Some(total) = self.total.checked_add(count) else {
            return Err(CorrelatorError::CountOverflow {
                bitstring: bits,
                count,
            });
        };
        self.total = total;
        *self.counts.entry(bits).or_insert(0) += count;
        Ok(())
    }

    /// Key width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total shots across all keys.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for `bitstring` (0 when absent).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct keys (including zero-count keys).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(bitstring, count)` pairs in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

impl TryFrom<BTreeMap<String, u64>> for OutcomeHistogram {
    type Error = CorrelatorError;

    fn try_from(map: BTreeMap<String, u64>) -> Result<Self> {
        Self::from_counts(map)
    }
}

impl From<OutcomeHistogram> for BTreeMap<String, u64> {
    fn from(h: OutcomeHistogram) -> Self {
        h.counts
    }
}

fn normalize_bitstring(raw: &str) -> Result<String> {
    let bits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if bits.is_empty() {
        return Err(CorrelatorError::invalid_bitstring(raw, "empty bitstring"));
    }
    if let Some(bad) = bits.chars().find(|&c| c != '0' && c != '1') {
        return Err(CorrelatorError::invalid_bitstring(
            raw,
            format!("non-binary character {bad:?}"),
        ));
    }
    Ok(bits)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Split a packed histogram into `sub_experiments` per-sub-experiment
/// histograms of width `qubits`.
///
/// The key width must be a positive multiple of `qubits * sub_experiments`;
/// the quotient is the number of measurement rounds folded together. Each
/// returned histogram totals `rounds * histogram.total()`.
///
/// A histogram with no keys and no declared width carries no layout to check
/// and is reported as [`CorrelatorError::EmptyHistogram`].
pub fn aggregate(
    histogram: &OutcomeHistogram,
    qubits: usize,
    sub_experiments: usize,
) -> Result<Vec<OutcomeHistogram>> {
    if qubits == 0 || sub_experiments == 0 {
        return Err(CorrelatorError::InvalidLayout(format!(
            "qubits ({qubits}) and sub_experiments ({sub_experiments}) must be positive"
        )));
    }

    let width = histogram.width();
    if width == 0 {
        return Err(CorrelatorError::EmptyHistogram);
    }
    let block = qubits.checked_mul(sub_experiments).ok_or_else(|| {
        CorrelatorError::InvalidLayout(format!(
            "{qubits} qubits x {sub_experiments} sub-experiments overflows the register size"
        ))
    })?;
    if width < block || width % block != 0 {
        return Err(CorrelatorError::InvalidLayout(format!(
            "bitstring width {width} is not a multiple of {qubits} qubits x {sub_experiments} sub-experiments"
        )));
    }

    // sub_experiments <= width from here on.
    let mut out = vec![OutcomeHistogram::new(qubits); sub_experiments];
    for (key, count) in histogram.iter() {
        for (i, start) in (0..width).step_by(qubits).enumerate() {
            // Keys are validated ASCII '0'/'1', so byte slicing is safe.
            let chunk = &key[start..start + qubits];
            out[i % sub_experiments].bump(chunk.to_string(), count)?;
        }
    }

    Ok(out)
}

/// Fold every `qubits`-wide measurement round of a single sub-experiment into
/// one histogram.
pub fn fold_repetitions(histogram: &OutcomeHistogram, qubits: usize) -> Result<OutcomeHistogram> {
    let mut parts = aggregate(histogram, qubits, 1)?;
    Ok(parts.remove(0))
}
