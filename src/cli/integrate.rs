//! Integrate command.
//!
//! Stores the credential an integration needs, sealed with the environment
//! key.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use dialoguer::Password;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{open_vault, output};
use crate::core::domain::Integration;
use crate::error::{Error, Result};

/// Prompt for and store an integration credential.
pub fn execute(env: Option<String>, integration: &str) -> Result<()> {
    let integration = Integration::from_str(integration)?;
    let vault = open_vault(env)?;
    info!(%integration, environment = vault.environment(), "setting up integration");

    let token = match integration {
        Integration::OnePassword => read_token("1Password service account token")?,
    };
    if token.trim().is_empty() {
        return Err(Error::Other("token cannot be empty".to_string()));
    }

    vault.setup_integration(integration, &token)?;
    output::success(&format!(
        "{} set up for {}",
        integration,
        output::path(vault.root())
    ));
    output::hint(&format!(
        "store references with: {}",
        output::cmd("strata set NAME op://vault/item/field -i 1password")
    ));
    Ok(())
}

fn read_token(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_line(&mut input)?;
        return Ok(Zeroizing::new(input.trim().to_string()));
    }
    Ok(Zeroizing::new(Password::new().with_prompt(prompt).interact()?))
}
