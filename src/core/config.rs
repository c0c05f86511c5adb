//! Workspace discovery and configuration.
//!
//! A [`Workspace`] is the explicit context handed to every store and
//! resolver call: where the `.strata/` directory lives, where local private
//! keys are scanned, and the optional `.strata/config.toml` settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{Result, StoreError};

/// Optional settings stored in `.strata/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Environment used when neither `-e` nor `STRATA_ENV` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment: Option<String>,
    /// Directory scanned for local private keys (defaults to `~/.ssh`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_dir: Option<PathBuf>,
    /// Public key lookup URL template; `{user}` is replaced by the handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_url: Option<String>,
}

impl Config {
    /// Load the configuration from a store directory.
    ///
    /// A missing file yields defaults; a malformed one is fatal.
    pub fn load(store_dir: &Path) -> Result<Self> {
        let path = store_dir.join(constants::CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents)
            .map_err(|source| StoreError::CorruptedConfig { path, source }.into())
    }

    /// Key lookup URL template, falling back to the default endpoint.
    pub fn keys_url(&self) -> &str {
        self.keys_url
            .as_deref()
            .unwrap_or(constants::DEFAULT_KEYS_URL)
    }
}

/// Location of the secret store and local keys for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    store_dir: PathBuf,
    key_dir: PathBuf,
    config: Config,
}

impl Workspace {
    /// Build a workspace from explicit paths.
    pub fn new(store_dir: impl Into<PathBuf>, key_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            key_dir: key_dir.into(),
            config: Config::default(),
        }
    }

    /// Find the nearest `.strata/` directory from the current directory upward.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoWorkspace` if none exists.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Find the nearest `.strata/` directory from `start` upward.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let store_dir = start
            .ancestors()
            .map(|dir| dir.join(constants::STORE_DIR))
            .find(|candidate| candidate.is_dir())
            .ok_or(StoreError::NoWorkspace)?;
        debug!(path = %store_dir.display(), "workspace found");
        Self::at(store_dir)
    }

    /// Use an existing workspace above the current directory, or create
    /// `.strata/` in the current directory.
    pub fn open_or_create() -> Result<Self> {
        match Self::discover() {
            Ok(ws) => Ok(ws),
            Err(crate::error::Error::Store(StoreError::NoWorkspace)) => {
                let store_dir = std::env::current_dir()?.join(constants::STORE_DIR);
                std::fs::create_dir_all(&store_dir).map_err(|source| {
                    StoreError::WriteFailed {
                        path: store_dir.clone(),
                        source,
                    }
                })?;
                debug!(path = %store_dir.display(), "workspace created");
                Self::at(store_dir)
            }
            Err(e) => Err(e),
        }
    }

    fn at(store_dir: PathBuf) -> Result<Self> {
        let config = Config::load(&store_dir)?;
        let key_dir = default_key_dir(&config)?;
        Ok(Self {
            store_dir,
            key_dir,
            config,
        })
    }

    /// Replace the local key directory.
    pub fn with_key_dir(mut self, key_dir: impl Into<PathBuf>) -> Self {
        self.key_dir = key_dir.into();
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The `.strata/` directory.
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Directory scanned for local private keys.
    pub fn key_dir(&self) -> &Path {
        &self.key_dir
    }

    /// Loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory holding one environment's files.
    pub fn env_dir(&self, env: &str) -> PathBuf {
        self.store_dir.join(env)
    }

    /// Path of a file inside an environment directory.
    pub fn env_file(&self, env: &str, file: &str) -> PathBuf {
        self.env_dir(env).join(file)
    }

    /// Optimistic existence check; does not look at permissions.
    pub fn env_exists(&self, env: &str) -> bool {
        self.env_dir(env).is_dir()
    }

    /// Repository root (parent of `.strata/`).
    pub fn repo_root(&self) -> &Path {
        self.store_dir.parent().unwrap_or(&self.store_dir)
    }
}

/// Local key directory: `STRATA_SSH_DIR`, then config, then `~/.ssh`.
fn default_key_dir(config: &Config) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(constants::ENV_VAR_SSH_DIR) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.key_dir {
        return Ok(dir.clone());
    }
    let home = dirs::home_dir().ok_or_else(|| {
        crate::error::Error::Other("unable to determine home directory".to_string())
    })?;
    Ok(home.join(constants::SSH_DIR))
}

/// Ensure `.gitignore` at the repository root ignores per-user files.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn ensure_gitignore(ws: &Workspace) -> Result<()> {
    let gitignore = ws.repo_root().join(".gitignore");

    let existing = if gitignore.exists() {
        std::fs::read_to_string(&gitignore)?
    } else {
        String::new()
    };

    let mut updated = existing.clone();
    for entry in constants::GITIGNORE_ENTRIES {
        if !existing.lines().any(|l| l.trim() == *entry) {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(entry);
            updated.push('\n');
        }
    }

    if updated != existing {
        std::fs::write(&gitignore, updated)?;
    }

    Ok(())
}
