//! Backend capability introspection.
//!
//! [`Capabilities`] describe what a backend can do: qubit count, supported
//! gates, shot limits and feature flags such as `"statevector"`.

use serde::{Deserialize, Serialize};

/// Capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`, `"measurement"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into(), "measurement".into()],
        }
    }

    /// Check whether a feature flag is present.
    pub fn supports(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate set supported by a backend.
///
/// Gate names follow the lowercase IR naming: `h`, `cx`, `rz`, etc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
    /// Three-qubit gates supported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the IR defines.
    pub fn universal() -> Self {
        Self {
            single_qubit: ["id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "p"]
                .map(String::from)
                .to_vec(),
            two_qubit: ["cx", "cy", "cz", "ch", "cp", "swap"]
                .map(String::from)
                .to_vec(),
            three_qubit: vec!["ccx".into()],
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
            || self.two_qubit.iter().any(|g| g == gate)
            || self.three_qubit.iter().any(|g| g == gate)
    }

    /// All supported gate names, single-qubit first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .chain(&self.three_qubit)
            .map(String::as_str)
    }
}
