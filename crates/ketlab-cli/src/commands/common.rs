//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use ketlab_adapter_sim::SimulatorBackend;
use ketlab_bits::ExperimentConfig;
use ketlab_hal::{Backend, BackendConfig, BackendRegistry};

/// Registry holding every backend this binary ships with.
pub fn backend_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<SimulatorBackend>("simulator");
    registry
}

/// Look up `name` in the registry and build it with a default configuration.
pub fn create_backend(name: &str) -> Result<Box<dyn Backend>> {
    let lowered = name.to_lowercase();
    let name = match lowered.as_str() {
        "sim" => "simulator",
        other => other,
    };
    backend_registry()
        .create(name, BackendConfig::new(name))
        .with_context(|| format!("Failed to create backend '{name}'"))
}

/// Load the experiment literals, falling back to the built-in defaults.
pub fn load_experiment_config(path: Option<&Path>) -> Result<ExperimentConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading experiment config");
            ExperimentConfig::load(path)
                .with_context(|| format!("Invalid experiment config: {}", path.display()))
        }
        None => Ok(ExperimentConfig::default()),
    }
}
