//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - circuit drawing, statevector simulation and bit-string experiments",
        style("Ketlab").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  ketlab-ir           Circuit intermediate representation");
    println!("  ketlab-hal          Backend abstraction layer");
    println!("  ketlab-adapter-sim  Local statevector simulator");
    println!("  ketlab-viz          Text diagrams and LaTeX rendering");
    println!("  ketlab-bits         Bit-string sign experiment");
    println!("  ketlab-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
