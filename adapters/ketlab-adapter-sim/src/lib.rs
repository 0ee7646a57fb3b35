//! Ketlab local statevector simulator.
//!
//! [`SimulatorBackend`] implements [`ketlab_hal::Backend`] by evolving the
//! full `2^n` amplitude vector in memory. It serves two kinds of request:
//!
//! - circuits ending in a save-statevector directive return the exact final
//!   state through [`ExecutionResult::get_statevector`](ketlab_hal::ExecutionResult::get_statevector)
//! - circuits with measurements return sampled [`Counts`](ketlab_hal::Counts)
//!
//! Memory grows as `16 · 2^n` bytes, so the default limit is 20 qubits.
//!
//! # Example
//!
//! ```ignore
//! use ketlab_adapter_sim::SimulatorBackend;
//! use ketlab_hal::Backend;
//! use ketlab_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let mut circuit = Circuit::hadamard_cx()?;
//!     circuit.save_statevector()?;
//!
//!     let job_id = backend.submit(&circuit, 1024).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     // Four amplitudes of 1/2.
//!     println!("{:?}", result.get_statevector()?.amplitudes());
//!     Ok(())
//! }
//! ```

mod simulator;
mod state;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use state::QuantumState;
