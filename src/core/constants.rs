//! Constants used throughout strata.
//!
//! Centralizes file names, directory names and environment variables.

/// Store directory at the repository root (`.strata/`).
pub const STORE_DIR: &str = ".strata";

/// Optional configuration file inside the store directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Keyring of a root environment.
pub const KEYS_FILE: &str = "keys.json";

/// Presence marks an environment as an overlay.
pub const OVERLAY_FILE: &str = "overlay.json";

/// Shared encrypted secrets (committed).
pub const SECRETS_FILE: &str = "secrets.json";

/// Per-user encrypted secrets (git-ignored).
pub const PERSONAL_SECRETS_FILE: &str = "personal_secrets.json";

/// Sealed 1Password service account token (git-ignored).
pub const ONEPASSWORD_FILE: &str = "1password.json";

/// Default local private key directory relative to HOME.
pub const SSH_DIR: &str = ".ssh";

/// Selects the current environment.
pub const ENV_VAR_ENVIRONMENT: &str = "STRATA_ENV";

/// Overrides the local private key directory.
pub const ENV_VAR_SSH_DIR: &str = "STRATA_SSH_DIR";

/// Log filter directive.
pub const ENV_VAR_LOG: &str = "STRATA_LOG";

/// Default public key lookup endpoint; `{user}` is replaced by the handle.
pub const DEFAULT_KEYS_URL: &str = "https://github.com/{user}.keys";

/// Value exposed for an integration reference that could not be resolved.
pub const INTEGRATION_FAILURE_SENTINEL: &str = "ERROR see terminal output";

/// Gitignore entries protecting per-user files.
pub const GITIGNORE_ENTRIES: &[&str] = &[
    ".strata/*/personal_secrets.json",
    ".strata/*/1password.json",
];
