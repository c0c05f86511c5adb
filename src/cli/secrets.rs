//! Secret commands: set, get and rm.

use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

use dialoguer::Password;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{open_vault, output};
use crate::core::domain::{Integration, Warning};
use crate::core::integration::CliResolver;
use crate::core::vault::SetOptions;
use crate::error::Result;

/// Set a secret, prompting for the value when none is given.
pub fn set(
    env: Option<String>,
    name: &str,
    value: Option<String>,
    personal: bool,
    integration: Option<&str>,
) -> Result<()> {
    info!(name, personal, "setting secret");
    let integration = integration.map(Integration::from_str).transpose()?;
    let vault = open_vault(env)?;

    let value = match value {
        Some(value) => Zeroizing::new(value),
        None => read_value(name)?,
    };

    let outcome = vault.set(
        name,
        &value,
        SetOptions {
            personal,
            integration,
        },
    )?;
    output::warnings(&outcome.warnings);
    output::success(&format!(
        "set {} in {}",
        output::key(name),
        output::path(vault.environment())
    ));
    Ok(())
}

/// Value from piped stdin, or a hidden prompt.
fn read_value(name: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_line(&mut input)?;
        return Ok(Zeroizing::new(
            input.trim_end_matches(['\r', '\n']).to_string(),
        ));
    }

    let value = Password::new()
        .with_prompt(format!("Value for {}", output::key(name)))
        .allow_empty_password(true)
        .interact()?;
    Ok(Zeroizing::new(value))
}

/// Print a resolved value with no decoration.
pub fn get(env: Option<String>, name: &str) -> Result<()> {
    let vault = open_vault(env)?;
    let outcome = vault.get(name, &CliResolver)?;
    output::warnings(&outcome.warnings);
    let mut stdout = io::stdout().lock();
    stdout.write_all(outcome.value.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Remove a secret from the current environment.
pub fn rm(env: Option<String>, name: &str) -> Result<()> {
    info!(name, "removing secret");
    let vault = open_vault(env)?;
    let outcome = vault.remove(name)?;
    output::warnings(&outcome.warnings);

    let untouched = outcome
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::InheritedValue { .. }));
    if untouched {
        return Ok(());
    }
    output::success(&format!(
        "removed {} from {}",
        output::key(name),
        output::path(vault.environment())
    ));
    Ok(())
}
