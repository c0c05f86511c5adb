//! Public key lookup for invitees.
//!
//! Keys are fetched by handle from a URL template such as
//! `https://github.com/{user}.keys`, which serves one authorized-key line
//! per key.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::core::types::PublicKey;
use crate::error::{LookupError, Result, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of public keys for an identity.
pub trait KeyLookup {
    /// Every public key published for `identity`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` if the identity has no keys, or
    /// `LookupError::Request` if the source could not be reached.
    fn fetch(&self, identity: &str) -> Result<Vec<PublicKey>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Looks keys up over HTTP.
pub struct HttpKeyLookup {
    url_template: String,
    client: reqwest::blocking::Client,
}

impl HttpKeyLookup {
    /// # Errors
    ///
    /// Returns `LookupError::Request` if the HTTP client cannot be built.
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("strata/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Request {
                identity: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            url_template: url_template.into(),
            client,
        })
    }

    fn url_for(&self, identity: &str) -> String {
        self.url_template.replace("{user}", identity)
    }
}

impl KeyLookup for HttpKeyLookup {
    fn fetch(&self, identity: &str) -> Result<Vec<PublicKey>> {
        let url = self.url_for(identity);
        debug!(identity, url = %url, "fetching public keys");

        let request_failed = |reason: String| LookupError::Request {
            identity: identity.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| request_failed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(identity.to_string()).into());
        }
        if !response.status().is_success() {
            return Err(request_failed(format!("HTTP {}", response.status())).into());
        }

        let body = response.text().map_err(|e| request_failed(e.to_string()))?;
        let keys = parse_key_lines(&body);
        if keys.is_empty() {
            return Err(LookupError::NotFound(identity.to_string()).into());
        }

        debug!(identity, count = keys.len(), "public keys fetched");
        Ok(keys)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Non-empty, trimmed lines of an authorized-keys style body.
pub fn parse_key_lines(body: &str) -> Vec<PublicKey> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read public keys from a local file, one per line.
pub fn read_key_file(path: &Path) -> Result<Vec<PublicKey>> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let keys = parse_key_lines(&contents);
    if keys.is_empty() {
        return Err(LookupError::NotFound(path.display().to_string()).into());
    }
    Ok(keys)
}
