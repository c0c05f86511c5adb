//! Command-line interface.

pub mod envfile;
pub mod init;
pub mod integrate;
pub mod output;
pub mod run;
pub mod secrets;
pub mod team;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Workspace;
use crate::core::validation::validate_env_name;
use crate::core::vault::Vault;
use crate::error::{AccessError, Result};

/// Strata - layered secrets for teams, encrypted to each member's SSH key.
#[derive(Parser)]
#[command(
    name = "strata",
    about = "Layered secrets for teams, encrypted to each member's SSH key",
    version
)]
pub struct Cli {
    /// Environment to operate on
    #[arg(short, long, global = true, env = "STRATA_ENV")]
    pub environment: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a root environment with a fresh key
    Init {
        /// Environment name (e.g., local)
        name: String,
        /// Handle of the first recipient; keys are looked up by handle
        #[arg(short, long)]
        user: String,
        /// Read public keys from this file instead of looking them up
        #[arg(short, long)]
        key: Option<PathBuf>,
    },

    /// Create an environment that layers on top of another
    Overlay {
        /// New environment name
        name: String,
        /// Environment to inherit from
        base: String,
    },

    /// Set a secret value
    Set {
        /// Secret name (e.g., DATABASE_URL)
        name: String,
        /// Secret value; prompted for when omitted
        value: Option<String>,
        /// Only store the value for yourself
        #[arg(short, long)]
        personal: bool,
        /// Treat the value as a reference for an integration (1password)
        #[arg(short, long)]
        integration: Option<String>,
    },

    /// Print a secret value
    Get {
        /// Secret name
        name: String,
    },

    /// Remove a secret
    Rm {
        /// Secret name
        name: String,
    },

    /// Print the environment in .env format
    Envfile,

    /// Run a command with the environment's variables injected
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Give a user access to the environment
    Invite {
        /// User handle, or a label with --headless
        handle: String,
        /// Read public keys from this file instead of looking them up
        #[arg(short, long)]
        key: Option<PathBuf>,
        /// Add the key under a label instead of a user handle
        #[arg(long, requires = "key")]
        headless: bool,
    },

    /// Remove a user's access
    Uninvite {
        /// User handle or headless label
        handle: String,
    },

    /// Give a machine access to the environment
    MachineAdd {
        /// Machine name
        name: String,
        /// Path to the machine's public key
        key: PathBuf,
    },

    /// Remove a machine's access
    MachineRm {
        /// Machine name
        name: String,
    },

    /// List who can open the environment
    ListInvites,

    /// Set up an external secret integration
    Integrate {
        /// Integration name (1password)
        integration: String,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let env = cli.environment;

    match cli.command {
        Command::Init { name, user, key } => init::init(&name, &user, key.as_deref()),
        Command::Overlay { name, base } => init::overlay(&name, &base),
        Command::Set {
            name,
            value,
            personal,
            integration,
        } => secrets::set(env, &name, value, personal, integration.as_deref()),
        Command::Get { name } => secrets::get(env, &name),
        Command::Rm { name } => secrets::rm(env, &name),
        Command::Envfile => envfile::execute(env),
        Command::Run { command } => run::execute(env, &command),
        Command::Invite {
            handle,
            key,
            headless,
        } => team::invite(env, &handle, key.as_deref(), headless),
        Command::Uninvite { handle } => team::uninvite(env, &handle),
        Command::MachineAdd { name, key } => team::machine_add(env, &name, &key),
        Command::MachineRm { name } => team::machine_rm(env, &name),
        Command::ListInvites => team::list(env),
        Command::Integrate { integration } => integrate::execute(env, &integration),
    }
}

/// The environment to use: flag or `STRATA_ENV`, then the configured
/// default.
///
/// # Errors
///
/// Returns `AccessError::NoEnvironment` if none is set.
pub fn select_environment(flag: Option<String>, ws: &Workspace) -> Result<String> {
    let environment = flag
        .filter(|e| !e.is_empty())
        .or_else(|| ws.config().default_environment.clone())
        .ok_or(AccessError::NoEnvironment)?;
    validate_env_name(&environment)?;
    Ok(environment)
}

/// Discover the workspace and open the selected environment.
pub fn open_vault(flag: Option<String>) -> Result<Vault> {
    let ws = Workspace::discover()?;
    let environment = select_environment(flag, &ws)?;
    Vault::open(ws, &environment)
}
