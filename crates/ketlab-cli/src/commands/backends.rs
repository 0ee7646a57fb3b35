//! Backends command implementation.

use anyhow::Result;
use console::style;

use ketlab_hal::BackendConfig;

use super::common::backend_registry;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("Ketlab").cyan().bold());

    let registry = backend_registry();
    for name in registry.available_backends() {
        let backend = registry.create(&name, BackendConfig::new(name.as_str()))?;
        let caps = backend.capabilities();
        let available = backend.availability().await?.is_available;

        println!(
            "  {} {} {}",
            if available {
                style("●").green()
            } else {
                style("○").red()
            },
            style(&name).bold(),
            if caps.is_simulator { "(local)" } else { "" }
        );
        println!("    Qubits: {}", caps.num_qubits);
        println!("    Max shots: {}", caps.max_shots);
        println!(
            "    Gates: {}",
            caps.gate_set.all().collect::<Vec<_>>().join(", ")
        );
        if !caps.features.is_empty() {
            println!("    Features: {}", caps.features.join(", "));
        }
        println!();
    }

    Ok(())
}
