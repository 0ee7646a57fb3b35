//! Bits command implementation.

use std::path::Path;

use anyhow::Result;

use ketlab_bits::BitSignExperiment;

use super::common::load_experiment_config;

/// Execute the bits command.
pub fn execute(config: Option<&Path>, format: &str) -> Result<()> {
    let experiment = BitSignExperiment::new(load_experiment_config(config)?);
    let report = experiment.run()?;

    match format.to_lowercase().as_str() {
        "text" => {
            for line in report.lines() {
                println!("{line}");
            }
        }
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
    }
    Ok(())
}
