//! Errors raised while building a circuit.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Why an instruction could not be added to a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("{operation}: qubit {qubit} is not part of the circuit")]
    UnknownQubit { operation: String, qubit: QubitId },

    #[error("{operation}: classical bit {clbit} is not part of the circuit")]
    UnknownClbit { operation: String, clbit: ClbitId },

    #[error("{operation} acts on {expected} qubit(s), got {got}")]
    WrongArity {
        operation: String,
        expected: usize,
        got: usize,
    },

    #[error("{operation}: qubit {qubit} is used more than once")]
    RepeatedQubit { operation: String, qubit: QubitId },

    #[error("measure: {qubits} qubit(s) cannot be stored in {clbits} classical bit(s)")]
    MeasureMismatch { qubits: usize, clbits: usize },

    /// The dependency graph lost an invariant; indicates a bug, not bad input.
    #[error("malformed circuit graph: {0}")]
    MalformedGraph(String),
}

pub type IrResult<T> = Result<T, IrError>;
