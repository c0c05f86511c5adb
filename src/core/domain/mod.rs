//! Domain types.

mod recipient;
mod secret;
mod warning;

pub use recipient::{Recipient, RecipientKind};
pub use secret::{EncryptedSecret, Integration, ResolvedVar};
pub use warning::{Outcome, Warning};
