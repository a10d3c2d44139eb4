//! Implements the command-line interface for the `gauntlet` conformance
//! suite.

#![deny(missing_docs)]

use anyhow::Result;
use clap::Parser;
use gauntlet_harness::{HarnessOptions, SuiteRunner, builtin_checks, report_results};

/// Main entry point for the `gauntlet` executable.
fn main() {
    //
    // Set up panic handler. On release builds, it will capture panic details
    // to a temporary .toml file and report a human-readable message to the
    // screen.
    //
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION")
    ));

    //
    // Parse args.
    //
    let options = HarnessOptions::parse();

    init_tracing(options.verbose);

    //
    // Run.
    //
    let exit_code = match run(&options) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "gauntlet_harness=debug,gauntlet=debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the conformance suite. Returns the process exit code.
fn run(options: &HarnessOptions) -> Result<i32> {
    let config = options.to_runner_config()?;

    if options.list_checks_only {
        for case in builtin_checks(&config).iter() {
            println!("{}: check", case.name());
        }

        return Ok(0);
    }

    let runner = SuiteRunner::new(config, options.clone());
    let results = runner.run();

    report_results(&results, options)?;

    Ok(results.exit_code())
}
