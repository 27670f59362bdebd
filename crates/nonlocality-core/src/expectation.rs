//! Parity expectation values and signed witness sums.
//!
//! For a histogram `h`, the expectation of the product of all measured
//! observables is the parity-weighted average
//!
//! ```text
//! E(h) = Σ_bits (-1)^popcount(bits) · h[bits] / Σ_bits h[bits]
//! ```
//!
//! A witness is `Σ_i c_i · E(h_i)` over an index-aligned schedule.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::basis::BasisString;
use crate::bounds::{Bounds, bounds};
use crate::error::{CorrelatorError, Result};
use crate::histogram::{OutcomeHistogram, aggregate};
use crate::schedule::{CorrelatorSchedule, InequalityInstance};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One evaluated correlator term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatorTerm {
    pub basis: BasisString,
    pub coefficient: f64,
    pub expectation: f64,
    /// Shots in the histogram this term was computed from.
    pub shots: u64,
}

/// Witness value with its per-term breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessReport {
    pub instance: InequalityInstance,
    pub value: f64,
    pub terms: Vec<CorrelatorTerm>,
    pub bounds: Bounds,
    /// `|value|` exceeds the local-hidden-variable bound.
    pub violates_classical: bool,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Parity expectation of a histogram, in [-1, 1].
pub fn expectation(histogram: &OutcomeHistogram) -> Result<f64> {
    let total = histogram.total();
    let mut signed: i128 = 0;
    for (bits, count) in histogram.iter() {
        let ones = bits.bytes().filter(|&b| b == b'1').count();
        if ones % 2 == 0 {
            signed += i128::from(count);
        } else {
            signed -= i128::from(count);
        }
    }
    if total == 0 {
        return Err(CorrelatorError::EmptyHistogram);
    }
    Ok(signed as f64 / total as f64)
}

fn check_lengths(bases: usize, coefficients: usize, histograms: usize) -> Result<()> {
    if coefficients != bases {
        return Err(CorrelatorError::length_mismatch(
            "coefficients",
            bases,
            coefficients,
        ));
    }
    if histograms != bases {
        return Err(CorrelatorError::length_mismatch(
            "histograms",
            bases,
            histograms,
        ));
    }
    Ok(())
}

/// `Σ coefficients[i] · expectation(histograms[i])`.
///
/// All three slices must have the same length.
pub fn witness(
    bases: &[BasisString],
    coefficients: &[f64],
    histograms: &[OutcomeHistogram],
) -> Result<f64> {
    check_lengths(bases.len(), coefficients.len(), histograms.len())?;
    let mut value = 0.0;
    for (c, h) in coefficients.iter().zip(histograms) {
        value += c * expectation(h)?;
    }
    Ok(value)
}

/// Evaluate a schedule against one histogram per basis string.
pub fn evaluate(
    schedule: &CorrelatorSchedule,
    histograms: &[OutcomeHistogram],
) -> Result<WitnessReport> {
    check_lengths(
        schedule.bases.len(),
        schedule.coefficients.len(),
        histograms.len(),
    )?;

    let mut terms = Vec::with_capacity(histograms.len());
    let mut value = 0.0;
    for ((basis, coefficient), h) in schedule.terms().zip(histograms) {
        if h.total() == 0 {
            return Err(CorrelatorError::EmptyHistogram);
        }
        if h.width() != basis.len() {
            return Err(CorrelatorError::InvalidLayout(format!(
                "histogram for {basis} has width {}, expected {}",
                h.width(),
                basis.len()
            )));
        }
        let e = expectation(h)?;
        value += coefficient * e;
        debug!("{}: {basis} E={e:.4} coeff={coefficient:+} running={value:.4}", schedule.instance);
        terms.push(CorrelatorTerm {
            basis: basis.clone(),
            coefficient,
            expectation: e,
            shots: h.total(),
        });
    }

    let bounds = bounds(schedule.instance)?;
    let violates_classical = bounds.violates_classical(value);
    if violates_classical {
        info!(
            "{}: witness {value:.4} exceeds classical bound {}",
            schedule.instance, bounds.classical
        );
    }

    Ok(WitnessReport {
        instance: schedule.instance,
        value,
        terms,
        bounds,
        violates_classical,
    })
}

/// Evaluate packed histograms: each raw histogram is first split into
/// `sub_experiments` sub-histograms (folding repeated rounds), then every
/// sub-experiment is evaluated independently.
///
/// Returns one report per sub-experiment, in register order.
pub fn evaluate_packed(
    schedule: &CorrelatorSchedule,
    raw: &[OutcomeHistogram],
    sub_experiments: usize,
) -> Result<Vec<WitnessReport>> {
    if raw.len() != schedule.len() {
        return Err(CorrelatorError::length_mismatch(
            "histograms",
            schedule.len(),
            raw.len(),
        ));
    }
    let qubits = schedule.instance.qubits;

    let parts = raw
        .iter()
        .map(|h| aggregate(h, qubits, sub_experiments))
        .collect::<Result<Vec<_>>>()?;

    // per_sub[k][i] = sub-experiment k, schedule term i
    let mut per_sub: Vec<Vec<OutcomeHistogram>> = (0..sub_experiments)
        .map(|_| Vec::with_capacity(raw.len()))
        .collect();
    for split in parts {
        for (k, part) in split.into_iter().enumerate() {
            per_sub[k].push(part);
        }
    }

    per_sub
        .iter()
        .map(|histograms| evaluate(schedule, histograms))
        .collect()
}

/// Evaluate independent instances on scoped worker threads.
///
/// Output order matches `jobs`; each result is identical to calling
/// [`evaluate`] on the same inputs.
pub fn evaluate_parallel(
    jobs: &[(CorrelatorSchedule, Vec<OutcomeHistogram>)],
) -> Vec<Result<WitnessReport>> {
    std::thread::scope(|s| {
        let handles: Vec<_> = jobs
            .iter()
            .map(|(schedule, histograms)| s.spawn(move || evaluate(schedule, histograms)))
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(CorrelatorError::Execution(
                        "evaluation worker panicked".to_string(),
                    ))
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Family, correlator_schedule};

    fn hist(pairs: &[(&str, u64)]) -> OutcomeHistogram {
        OutcomeHistogram::from_counts(pairs.iter().copied()).unwrap()
    }

    fn bases(names: &[&str]) -> Vec<BasisString> {
        names.iter().map(|b| b.parse().unwrap()).collect()
    }

    // -----------------------------------------------------------------------
    // expectation
    // -----------------------------------------------------------------------

    #[test]
    fn test_expectation_perfect_correlation() {
        let h = hist(&[("00", 100), ("11", 100), ("01", 0), ("10", 0)]);
        assert_eq!(expectation(&h).unwrap(), 1.0);
    }

    #[test]
    fn test_expectation_perfect_anticorrelation() {
        let h = hist(&[("01", 50), ("10", 50)]);
        assert_eq!(expectation(&h).unwrap(), -1.0);
    }

    #[test]
    fn test_expectation_uncorrelated() {
        let h = hist(&[("00", 25), ("01", 25), ("10", 25), ("11", 25)]);
        assert_eq!(expectation(&h).unwrap(), 0.0);
    }

    #[test]
    fn test_expectation_three_bits() {
        // parity: 000 even, 111 odd, 011 even
        let h = hist(&[("000", 6), ("111", 2), ("011", 2)]);
        assert!((expectation(&h).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_expectation_near_count_limit() {
        let h = hist(&[("00", u64::MAX - 1), ("11", 1)]);
        assert_eq!(expectation(&h).unwrap(), 1.0);
        let h = hist(&[("01", u64::MAX - 1), ("11", 1)]);
        let e = expectation(&h).unwrap();
        assert!((-1.0..=1.0).contains(&e));
        assert!(e < 0.0);
    }

    #[test]
    fn test_expectation_empty() {
        assert_eq!(
            expectation(&OutcomeHistogram::default()),
            Err(CorrelatorError::EmptyHistogram)
        );
        let zeros = hist(&[("00", 0), ("11", 0)]);
        assert_eq!(expectation(&zeros), Err(CorrelatorError::EmptyHistogram));
    }

    // -----------------------------------------------------------------------
    // witness
    // -----------------------------------------------------------------------

    #[test]
    fn test_witness_mermin3_all_zero_outcomes() {
        let b = bases(&["xxy", "xyx", "yxx", "yyy"]);
        let c = [1.0, 1.0, 1.0, -1.0];
        let h = vec![hist(&[("000", 1000)]); 4];
        assert_eq!(witness(&b, &c, &h).unwrap(), 2.0);
    }

    #[test]
    fn test_witness_length_mismatch() {
        let b = bases(&["xxy", "xyx"]);
        let h = vec![hist(&[("000", 1)]); 2];
        assert_eq!(
            witness(&b, &[1.0], &h),
            Err(CorrelatorError::length_mismatch("coefficients", 2, 1))
        );
        assert_eq!(
            witness(&b, &[1.0, 1.0], &h[..1]),
            Err(CorrelatorError::length_mismatch("histograms", 2, 1))
        );
    }

    #[test]
    fn test_witness_propagates_empty_histogram() {
        let b = bases(&["xx"]);
        let h = vec![OutcomeHistogram::default()];
        assert_eq!(witness(&b, &[1.0], &h), Err(CorrelatorError::EmptyHistogram));
    }

    // -----------------------------------------------------------------------
    // evaluate
    // -----------------------------------------------------------------------

    #[test]
    fn test_evaluate_ideal_mermin3_reaches_quantum_bound() {
        // Ideal iGHZ outcomes: xxy/xyx/yxx even parity, yyy odd parity.
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let even = hist(&[("000", 250), ("011", 250), ("101", 250), ("110", 250)]);
        let odd = hist(&[("001", 250), ("010", 250), ("100", 250), ("111", 250)]);
        let h = vec![even.clone(), even.clone(), even, odd];
        let report = evaluate(&s, &h).unwrap();
        assert_eq!(report.value, 4.0);
        assert_eq!(report.terms.len(), 4);
        assert_eq!(report.terms[3].expectation, -1.0);
        assert_eq!(report.terms[3].shots, 1000);
        assert!(report.violates_classical);
        assert_eq!(report.value, report.bounds.quantum);
    }

    #[test]
    fn test_evaluate_rejects_wrong_width() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let h = vec![hist(&[("00", 10)]); 4];
        assert!(matches!(
            evaluate(&s, &h),
            Err(CorrelatorError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_evaluate_reports_empty_histograms() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let h = vec![OutcomeHistogram::default(); 4];
        assert_eq!(evaluate(&s, &h), Err(CorrelatorError::EmptyHistogram));
        // Zero-count keys of the right width are still empty.
        let zeros = vec![hist(&[("000", 0)]); 4];
        assert_eq!(evaluate(&s, &zeros), Err(CorrelatorError::EmptyHistogram));
    }

    #[test]
    fn test_evaluate_packed_two_copies() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        // copy 0 always "000" (E=+1), copy 1 always "001" (E=-1)
        let raw = vec![hist(&[("000001", 100)]); 4];
        let reports = evaluate_packed(&s, &raw, 2).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].value, 2.0);
        assert_eq!(reports[1].value, -2.0);
    }

    #[test]
    fn test_evaluate_packed_length_mismatch() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let raw = vec![hist(&[("000", 1)]); 3];
        assert!(matches!(
            evaluate_packed(&s, &raw, 1),
            Err(CorrelatorError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_evaluate_packed_rejects_oversized_sub_experiment_count() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let raw = vec![hist(&[("000", 1)]); 4];
        for k in [7, 1_000_000_000, usize::MAX / 2, usize::MAX] {
            assert!(matches!(
                evaluate_packed(&s, &raw, k),
                Err(CorrelatorError::InvalidLayout(_))
            ));
        }
        assert!(matches!(
            evaluate_packed(&s, &raw, 0),
            Err(CorrelatorError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_evaluate_packed_empty_histograms() {
        let s = correlator_schedule(Family::Mermin, 3).unwrap();
        let raw = vec![OutcomeHistogram::default(); 4];
        assert_eq!(
            evaluate_packed(&s, &raw, 2),
            Err(CorrelatorError::EmptyHistogram)
        );
    }

    #[test]
    fn test_evaluate_parallel_matches_sequential() {
        let jobs: Vec<_> = [(Family::Mermin, 3), (Family::Mermin, 4), (Family::Svetlichny, 3)]
            .into_iter()
            .map(|(f, n)| {
                let s = correlator_schedule(f, n).unwrap();
                let zeros = "0".repeat(n);
                let ones = "1".repeat(n);
                let h = vec![hist(&[(zeros.as_str(), 64), (ones.as_str(), 16)]); s.len()];
                (s, h)
            })
            .collect();
        let parallel = evaluate_parallel(&jobs);
        for ((s, h), r) in jobs.iter().zip(parallel) {
            assert_eq!(r.unwrap(), evaluate(s, h).unwrap());
        }
    }
}
