//! Ketlab circuit representation.
//!
//! A [`Circuit`] is a named list of [`Instruction`]s over numbered qubits and
//! classical bits. Instructions are stored in a [`CircuitDag`], which links
//! each operation to the previous one on every wire it touches; depth and
//! layering come from that graph. Every instruction is checked when it is
//! added, so a circuit never holds an operation on an unknown or repeated
//! qubit.
//!
//! ```rust
//! use ketlab_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit
//!     .h(QubitId(0))?
//!     .h(QubitId(1))?
//!     .cx(QubitId(0), QubitId(1))?;
//!
//! assert_eq!(circuit.depth(), 2); // both H in one layer, then CX
//! assert!(circuit.cx(QubitId(0), QubitId(0)).is_err());
//! # Ok::<(), ketlab_ir::IrError>(())
//! ```
//!
//! | Gate | Qubits |
//! |------|--------|
//! | `I`, `X`, `Y`, `Z`, `H`, `S`, `Sdg`, `T`, `Tdg`, `SX` | 1 |
//! | `Rx`, `Ry`, `Rz`, `P` (angle in radians) | 1 |
//! | `CX`, `CY`, `CZ`, `CH`, `CP`, `Swap` | 2 |
//! | `CCX` | 3 |
//!
//! Besides gates there are measurements, barriers and the
//! `save_statevector` simulator directive.

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, Qubit, QubitId};
