//! List-invites command.
//!
//! Reads the root keyring without unlocking it, so anyone with the
//! repository can see who has access.

use crate::cli::{output, select_environment};
use crate::core::config::Workspace;
use crate::core::domain::RecipientKind;
use crate::core::vault::recipients_of;
use crate::error::Result;

/// Print recipients grouped by kind, with key counts.
pub fn execute(env: Option<String>) -> Result<()> {
    let ws = Workspace::discover()?;
    let environment = select_environment(env, &ws)?;
    let (root, keyring) = recipients_of(&ws, &environment)?;
    let groups = keyring.grouped();

    if root != environment {
        output::dimmed(&format!("{} inherits recipients from {}", environment, root));
    }

    for (kind, title) in [
        (RecipientKind::User, "Users"),
        (RecipientKind::Headless, "Headless keys"),
        (RecipientKind::Machine, "Machines"),
    ] {
        let members: Vec<_> = groups.iter().filter(|(k, _, _)| *k == kind).collect();
        if members.is_empty() {
            continue;
        }

        output::section(title);
        for (_, identity, count) in members {
            output::kv(
                identity,
                format!("{} key{}", count, if *count == 1 { "" } else { "s" }),
            );
        }
    }

    Ok(())
}
