//! CLI command parsing and end-to-end tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from` on a mirror of the
//! binary's structs) and the printed output of the `ketlab` binary itself.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "ketlab")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(short, long, default_value = "simulator", global = true)]
        backend: String,

        #[arg(short, long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: Option<TestCommands>,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Script,
        Circuit {
            #[arg(short, long, default_value = "1024")]
            shots: u32,
        },
        Bits {
            #[arg(short, long, default_value = "text")]
            format: String,
        },
        Backends,
        Version,
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = TestCli::try_parse_from(["ketlab"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.backend, "simulator");
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_script() {
        let cli = TestCli::try_parse_from(["ketlab", "script"]).unwrap();
        assert!(matches!(cli.command, Some(TestCommands::Script)));
    }

    #[test]
    fn test_parse_circuit_default_shots() {
        let cli = TestCli::try_parse_from(["ketlab", "circuit"]).unwrap();
        match cli.command {
            Some(TestCommands::Circuit { shots }) => assert_eq!(shots, 1024),
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_custom_shots_and_backend() {
        let cli =
            TestCli::try_parse_from(["ketlab", "circuit", "-s", "10", "--backend", "sim"]).unwrap();
        assert_eq!(cli.backend, "sim");
        match cli.command {
            Some(TestCommands::Circuit { shots }) => assert_eq!(shots, 10),
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_invalid_shots() {
        let result = TestCli::try_parse_from(["ketlab", "circuit", "--shots", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bits_with_config() {
        let cli =
            TestCli::try_parse_from(["ketlab", "bits", "--config", "bits.yaml", "-f", "json"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("bits.yaml")));
        match cli.command {
            Some(TestCommands::Bits { format }) => assert_eq!(format, "json"),
            _ => panic!("Expected Bits command"),
        }
    }

    #[test]
    fn test_parse_verbosity_count() {
        let cli = TestCli::try_parse_from(["ketlab", "-vvv", "backends"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(matches!(cli.command, Some(TestCommands::Backends)));
    }

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["ketlab", "version"]).unwrap();
        assert!(matches!(cli.command, Some(TestCommands::Version)));
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        let result = TestCli::try_parse_from(["ketlab", "compile"]);
        assert!(result.is_err());
    }
}

// ============================================================================
// End-to-end runs of the ketlab binary
// ============================================================================

mod binary {
    use std::fs;
    use std::process::{Command, Output};

    const DIAGRAM: &str = "     ┌───┐     \n\
                           q_0: ┤ H ├──■──\n     \
                           ├───┤┌─┴─┐\n\
                           q_1: ┤ H ├┤ X ├\n     \
                           └───┘└───┘\n";

    const STATEVECTOR: &str = "$$\n\\text{Statevector} = \n\\begin{bmatrix}\n\
                               \\frac{1}{2} & \\frac{1}{2} & \\frac{1}{2} & \\frac{1}{2}  \\\\\n \
                               \\end{bmatrix}\n$$\n";

    const BITS: &str = "01\n['1010']\n[-1  1 -1  1]\n";

    fn ketlab(args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ketlab"));
        cmd.args(args)
            .env_remove("KETLAB_BACKEND")
            .env_remove("KETLAB_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8(output.stdout.clone()).unwrap()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8(output.stderr.clone()).unwrap()
    }

    #[test]
    fn test_default_run_prints_five_outputs() {
        let output = ketlab(&[]).output().unwrap();
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), format!("{DIAGRAM}{STATEVECTOR}{BITS}"));
    }

    #[test]
    fn test_script_matches_default_run() {
        let output = ketlab(&["script"]).output().unwrap();
        assert!(output.status.success());
        assert_eq!(stdout(&output), format!("{DIAGRAM}{STATEVECTOR}{BITS}"));
    }

    #[test]
    fn test_logs_stay_off_stdout() {
        let output = ketlab(&["-vv", "script"]).output().unwrap();
        assert!(output.status.success());
        assert_eq!(stdout(&output), format!("{DIAGRAM}{STATEVECTOR}{BITS}"));
    }

    #[test]
    fn test_circuit_command() {
        let output = ketlab(&["circuit", "--shots", "0"]).output().unwrap();
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), format!("{DIAGRAM}{STATEVECTOR}"));
    }

    #[test]
    fn test_bits_command() {
        let output = ketlab(&["bits"]).output().unwrap();
        assert!(output.status.success());
        assert_eq!(stdout(&output), BITS);
    }

    #[test]
    fn test_bits_json() {
        let output = ketlab(&["bits", "--format", "json"]).output().unwrap();
        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("\"slice\": \"01\""));
        assert!(out.contains("\"split\": ["));
    }

    #[test]
    fn test_bits_unknown_format_fails() {
        let output = ketlab(&["bits", "--format", "xml"]).output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Unknown format"));
    }

    #[test]
    fn test_config_file_overrides_literals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bits.yaml");
        fs::write(&path, "slice_text: \"abcdef\"\nsplit_text: \"a b\"\ndigits: \"0011\"\n").unwrap();

        let output = ketlab(&["bits"])
            .env("KETLAB_CONFIG", &path)
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "ab\n['a', 'b']\n[ 1  1 -1 -1]\n");
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let output = ketlab(&["bits", "--config", path.to_str().unwrap()])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Error:"));
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn test_unknown_backend_fails_after_diagram() {
        let output = ketlab(&["circuit"])
            .env("KETLAB_BACKEND", "qpu")
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(stdout(&output), DIAGRAM);
        assert!(stderr(&output).contains("no backend registered with name 'qpu'"));
    }

    #[test]
    fn test_backends_lists_simulator() {
        let output = ketlab(&["backends"]).output().unwrap();
        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("simulator"));
        assert!(out.contains("Features: statevector, measurement"));
    }

    #[test]
    fn test_version() {
        let output = ketlab(&["version"]).output().unwrap();
        assert!(output.status.success());
        assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Library pieces the commands are built from
// ============================================================================

mod building_blocks {
    use ketlab_bits::{BitSignExperiment, ExperimentConfig};
    use ketlab_ir::Circuit;

    #[test]
    fn test_demo_circuit_shape() {
        let circuit = Circuit::hadamard_cx().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert!(!circuit.has_measurements());
    }

    #[test]
    fn test_empty_yaml_keeps_defaults() {
        let config = ExperimentConfig::from_yaml_str("").unwrap();
        let report = BitSignExperiment::new(config).run().unwrap();
        assert_eq!(report.lines(), ["01", "['1010']", "[-1  1 -1  1]"].map(String::from));
    }
}
