//! Recipient management commands.
//!
//! Invite and uninvite users, add and remove machines, list recipients.

mod invite;
mod list;
mod machine;

use std::path::Path;

use tracing::info;

use crate::core::config::Workspace;
use crate::core::lookup::{self, HttpKeyLookup, KeyLookup};
use crate::core::types::PublicKey;
use crate::error::Result;

pub use invite::{invite, uninvite};
pub use list::execute as list;
pub use machine::{add as machine_add, rm as machine_rm};

/// Public keys for `handle`: from `key_file` when given, otherwise looked
/// up with the configured key URL.
pub fn public_keys(ws: &Workspace, handle: &str, key_file: Option<&Path>) -> Result<Vec<PublicKey>> {
    if let Some(path) = key_file {
        return lookup::read_key_file(path);
    }

    let source = HttpKeyLookup::new(ws.config().keys_url())?;
    let keys = source.fetch(handle)?;
    info!(handle, source = source.name(), count = keys.len(), "public keys found");
    Ok(keys)
}
