//! Strata - layered secrets for teams, encrypted to each member's SSH key.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use strata::cli::output;
use strata::cli::{execute, Cli};
use strata::core::constants;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::ENV_VAR_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("strata=debug")
        } else {
            EnvFilter::new("strata=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
