//! Ketlab Backend Abstraction Layer
//!
//! This crate provides the interface between circuits and whatever executes
//! them. Callers depend on the [`Backend`] trait only; concrete simulators live
//! in adapter crates and are looked up by name through a [`BackendRegistry`].
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] to describe backend features and limits
//! - [`ExecutionResult`] carrying measurement [`Counts`] and, when the
//!   circuit asked for it, the final [`Statevector`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use ketlab_hal::{Backend, BackendConfig, BackendRegistry};
//! use ketlab_adapter_sim::SimulatorBackend;
//! use ketlab_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut registry = BackendRegistry::new();
//!     registry.register::<SimulatorBackend>("simulator");
//!
//!     let backend = registry.create("simulator", BackendConfig::new("simulator"))?;
//!
//!     let mut circuit = Circuit::hadamard_cx()?;
//!     circuit.save_statevector()?;
//!
//!     let job_id = backend.submit(&circuit, 1024).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("{:?}", result.get_statevector()?.amplitudes());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod registry;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobRecord, JobStatus};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult, Statevector};
