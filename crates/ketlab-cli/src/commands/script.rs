//! Script command implementation: the circuit demo followed by the bit-sign
//! experiment, each awaited in turn.

use std::path::Path;

use anyhow::Result;

use super::{bits, circuit};

/// Shots submitted with the demo circuit.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Execute the script command.
pub async fn execute(backend: &str, config: Option<&Path>) -> Result<()> {
    circuit::execute(backend, DEFAULT_SHOTS).await?;
    bits::execute(config, "text")
}
