//! Run command.
//!
//! Executes a command with the resolved variables added to the inherited
//! environment. Values only live in memory and in the child's environment.

use tracing::info;

use crate::cli::{open_vault, output};
use crate::core::integration::CliResolver;
use crate::core::runner;
use crate::error::{Error, Result};

/// Run a command and exit with its exit code.
pub fn execute(env: Option<String>, command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(Error::Other("no command specified".to_string()));
    };

    let vault = open_vault(env)?;
    let resolution = vault.resolve(&CliResolver)?;
    output::warnings(&resolution.warnings);

    info!(
        program = %program,
        environment = vault.environment(),
        vars = resolution.exports().count(),
        "running command"
    );
    let code = runner::run(program, args, resolution.exports())?;
    // exit skips destructors
    drop(resolution);
    std::process::exit(code);
}
