//! Gates.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The built-in gate set. Angles are radians.
///
/// Controlled gates take their controls as the leading operands, so `CX`
/// applied to `[a, b]` flips `b` when `a` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    /// √X
    SX,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// `diag(1, e^{iθ})`
    P(f64),
    CX,
    CY,
    CZ,
    CH,
    CP(f64),
    Swap,
    /// Toffoli
    CCX,
}

impl StandardGate {
    /// Lowercase name, as used in gate sets.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
        }
    }

    /// Operand count: the controls plus one target, or two for `Swap`.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Swap => 2,
            gate => gate.num_controls() + 1,
        }
    }

    /// Number of leading operands that act as controls.
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::CP(_) => 1,
            StandardGate::CCX => 2,
            _ => 0,
        }
    }

    /// The rotation or phase angle, if the gate has one.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CP(p) => vec![*p],
            _ => vec![],
        }
    }

    /// The label shown on the gate's target box, e.g. `H` or `Rz(π/2)`.
    ///
    /// For controlled gates this is the label of the controlled operation
    /// (`X` for CX). `CZ` and `Swap` have no box and return `None`.
    pub fn display_label(&self) -> Option<String> {
        let label = match self {
            StandardGate::I => "I".to_string(),
            StandardGate::X | StandardGate::CX | StandardGate::CCX => "X".to_string(),
            StandardGate::Y | StandardGate::CY => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H | StandardGate::CH => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::Sdg => "Sdg".to_string(),
            StandardGate::T => "T".to_string(),
            StandardGate::Tdg => "Tdg".to_string(),
            StandardGate::SX => "√X".to_string(),
            StandardGate::Rx(t) => format!("Rx({})", format_angle(*t)),
            StandardGate::Ry(t) => format!("Ry({})", format_angle(*t)),
            StandardGate::Rz(t) => format!("Rz({})", format_angle(*t)),
            StandardGate::P(t) | StandardGate::CP(t) => format!("P({})", format_angle(*t)),
            StandardGate::CZ | StandardGate::Swap => return None,
        };
        Some(label)
    }
}

/// Format an angle in radians, using multiples of π where exact.
pub fn format_angle(theta: f64) -> String {
    const EPS: f64 = 1e-9;
    if theta.abs() < EPS {
        return "0".to_string();
    }
    for denom in 1..=8_i64 {
        let numer = theta * denom as f64 / PI;
        let rounded = numer.round();
        if (numer - rounded).abs() < EPS && rounded != 0.0 {
            let n = rounded as i64;
            let sign = if n < 0 { "-" } else { "" };
            let n = n.abs();
            let head = if n == 1 {
                format!("{sign}π")
            } else {
                format!("{sign}{n}π")
            };
            return if denom == 1 {
                head
            } else {
                format!("{head}/{denom}")
            };
        }
    }
    format!("{theta}")
}

/// A [`StandardGate`] with an optional drawing label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: StandardGate,
    /// Replaces the generated box text in diagrams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    pub fn standard(kind: StandardGate) -> Self {
        Self { kind, label: None }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Box text: the custom label if set, otherwise the standard one.
    pub fn display_label(&self) -> Option<String> {
        self.label.clone().or_else(|| self.kind.display_label())
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}
