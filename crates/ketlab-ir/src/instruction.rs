//! Instructions: an operation plus the wires it touches.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    Gate(Gate),
    /// Measure `qubits[i]` into `clbits[i]`.
    Measure,
    Barrier,
    /// Simulator directive: keep the state reached at this point as the job's
    /// statevector. Leaves the state untouched.
    SaveStatevector,
}

/// An operation applied to a list of qubits (and, for measurement, clbits).
///
/// Operand order matters: for controlled gates the controls come first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Gate(gate.into()), qubits)
    }

    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Measure several qubits at once, pairing them with `clbits` by position.
    pub fn measure_many(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let inst = Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        };
        if inst.qubits.len() != inst.clbits.len() {
            return Err(IrError::MeasureMismatch {
                qubits: inst.qubits.len(),
                clbits: inst.clbits.len(),
            });
        }
        Ok(inst)
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Barrier, qubits)
    }

    pub fn save_statevector(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::SaveStatevector, qubits)
    }

    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn is_gate(&self) -> bool {
        self.as_gate().is_some()
    }

    pub fn is_measure(&self) -> bool {
        self.kind == InstructionKind::Measure
    }

    pub fn is_barrier(&self) -> bool {
        self.kind == InstructionKind::Barrier
    }

    pub fn is_save_statevector(&self) -> bool {
        self.kind == InstructionKind::SaveStatevector
    }

    /// Lowercase name: the gate name, or `measure`, `barrier`, `save_statevector`.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(gate) => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::SaveStatevector => "save_statevector",
        }
    }
}
