//! Execution results: measurement counts and saved statevectors.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Measurement outcome histogram keyed by bitstring.
///
/// Bitstrings are written most-significant clbit first, so clbit 0 is the
/// rightmost character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring`, zero when never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// The most frequent outcome. Ties go to the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bits, n) in iter {
            counts.insert(bits, n);
        }
        counts
    }
}

/// Full quantum state of an `n`-qubit register.
///
/// Holds `2^n` amplitudes. Basis index bit `k` is the value of qubit `k`,
/// so index 1 is `|q_1 q_0⟩ = |01⟩`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Wrap raw amplitudes. The length must be a non-zero power of two.
    pub fn new(amplitudes: Vec<Complex64>) -> HalResult<Self> {
        if !amplitudes.len().is_power_of_two() {
            return Err(HalError::InvalidStatevector(format!(
                "length {} is not a power of two",
                amplitudes.len()
            )));
        }
        Ok(Self { amplitudes })
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Measurement probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Sum of squared magnitudes; 1.0 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }
}

/// Result of running a circuit on a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub counts: Counts,
    pub shots: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Present when the circuit contained a save-statevector directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Statevector>,
}

impl ExecutionResult {
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            statevector: None,
        }
    }

    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn with_statevector(mut self, statevector: Statevector) -> Self {
        self.statevector = Some(statevector);
        self
    }

    /// The saved statevector, or [`HalError::MissingData`] if none was saved.
    pub fn get_statevector(&self) -> HalResult<&Statevector> {
        self.statevector
            .as_ref()
            .ok_or_else(|| HalError::MissingData("statevector".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 10);
        counts.insert("11", 30);
        counts.insert("00", 5);

        assert_eq!(counts.get("00"), 15);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 45);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.most_frequent(), Some((&"11".to_string(), &30)));
    }

    #[test]
    fn test_counts_sorted_and_ties() {
        let counts: Counts = [("10".to_string(), 4), ("01".to_string(), 4)]
            .into_iter()
            .collect();
        let keys: Vec<_> = counts.sorted().into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["01", "10"]);
        assert_eq!(counts.most_frequent().map(|(k, _)| k.as_str()), Some("01"));
    }

    #[test]
    fn test_statevector_shape() {
        let half = Complex64::new(0.5, 0.0);
        let sv = Statevector::new(vec![half; 4]).unwrap();
        assert_eq!(sv.num_qubits(), 2);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
        assert_eq!(sv.probabilities(), vec![0.25; 4]);

        assert!(Statevector::new(vec![half; 3]).is_err());
        assert!(Statevector::new(vec![]).is_err());
    }

    #[test]
    fn test_missing_statevector() {
        let result = ExecutionResult::new(Counts::new(), 0).with_execution_time(3);
        assert_eq!(result.execution_time_ms, Some(3));
        let err = result.get_statevector().unwrap_err();
        assert_eq!(err.to_string(), "Result has no statevector");
    }
}
