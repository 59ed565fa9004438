//! treeguard CLI entry point

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;
use treeguard::cli::{Cli, Command, run_check, run_rules};

/// Environment variable holding the log filter, checked before `RUST_LOG`
const LOG_ENV: &str = "TREEGUARD_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Command::Check { target } => run_check(target, cli.color),
        Command::Rules { target } => run_rules(target, cli.color),
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "treeguard=info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
