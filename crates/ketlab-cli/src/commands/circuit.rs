//! Circuit command implementation.

use anyhow::{Context, Result};
use tracing::info;

use ketlab_hal::{Backend, Statevector, ValidationResult};
use ketlab_ir::Circuit;
use ketlab_viz::{array_to_latex, draw};

use super::common::create_backend;

/// Prefix printed above the statevector matrix.
pub const STATEVECTOR_PREFIX: &str = "\\text{Statevector} = ";

/// Execute the circuit command.
///
/// The diagram is printed before the backend is contacted, so it still
/// appears when the simulation fails.
pub async fn execute(backend: &str, shots: u32) -> Result<()> {
    let mut circuit = Circuit::hadamard_cx()?;
    println!("{}", draw(&circuit));

    circuit.save_statevector()?;
    let backend = create_backend(backend)?;
    let statevector = simulate(backend.as_ref(), &circuit, shots).await?;

    println!("{}", array_to_latex(statevector.amplitudes(), STATEVECTOR_PREFIX));
    Ok(())
}

/// Submit `circuit`, wait for it and return the saved statevector.
pub async fn simulate(backend: &dyn Backend, circuit: &Circuit, shots: u32) -> Result<Statevector> {
    let availability = backend.availability().await?;
    if !availability.is_available {
        anyhow::bail!(
            "Backend '{}' is unavailable: {}",
            backend.name(),
            availability.status_message.as_deref().unwrap_or("no reason given")
        );
    }

    if let ValidationResult::Invalid { reasons } = backend.validate(circuit).await? {
        anyhow::bail!("Circuit rejected by '{}': {}", backend.name(), reasons.join("; "));
    }

    let job_id = backend.submit(circuit, shots).await?;
    info!(job = %job_id, backend = backend.name(), shots, "submitted circuit");

    let result = backend
        .wait(&job_id)
        .await
        .with_context(|| format!("Job {job_id} did not complete"))?;
    Ok(result.get_statevector()?.clone())
}
