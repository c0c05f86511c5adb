//! Envfile command.
//!
//! Prints the resolved environment as `.env` contents on stdout.

use std::io::Write;

use crate::cli::{open_vault, output};
use crate::core::env::render;
use crate::core::integration::CliResolver;
use crate::error::Result;

/// Print the selected environment in `.env` format.
pub fn execute(env: Option<String>) -> Result<()> {
    let vault = open_vault(env)?;
    let resolution = vault.resolve(&CliResolver)?;
    output::warnings(&resolution.warnings);

    let rendered = render(&resolution);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
