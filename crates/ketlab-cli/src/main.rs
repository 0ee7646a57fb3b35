//! Ketlab Command-Line Interface
//!
//! The main entry point for the `ketlab` tool. Running it without a
//! subcommand is the same as `ketlab script`: draw and simulate the demo
//! circuit, then run the bit-sign experiment.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{backends, bits, circuit, script, version};

/// Ketlab - circuit drawing, statevector simulation and bit-string experiments
#[derive(Parser)]
#[command(name = "ketlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend used to simulate circuits
    #[arg(
        short,
        long,
        env = "KETLAB_BACKEND",
        default_value = "simulator",
        global = true
    )]
    backend: String,

    /// YAML file overriding the bit-sign experiment literals
    #[arg(short, long, env = "KETLAB_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the circuit demo, then the bit-sign experiment
    Script,

    /// Draw the demo circuit and print its final statevector
    Circuit {
        /// Number of shots submitted with the circuit
        #[arg(short, long, default_value = "1024")]
        shots: u32,
    },

    /// Run the bit-sign experiment
    Bits {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List available backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    // Execute command
    let result = match cli.command.unwrap_or(Commands::Script) {
        Commands::Script => script::execute(&cli.backend, config).await,

        Commands::Circuit { shots } => circuit::execute(&cli.backend, shots).await,

        Commands::Bits { format } => bits::execute(config, &format),

        Commands::Backends => backends::execute().await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
