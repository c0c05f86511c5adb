//! Strata - layered secrets for teams, encrypted to each member's SSH key.
//!
//! Every environment lives under `.strata/<env>/` in the repository. A root
//! environment has a keyring holding one random AES-256 key wrapped for
//! each recipient's `ssh-rsa` public key. Overlays name a base environment
//! and layer their own values on top of it, sharing the root's key.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # init, overlay
//! │   ├── secrets       # set, get, rm
//! │   ├── envfile       # .env rendering to stdout
//! │   ├── run           # Run with injected variables
//! │   ├── team/         # invite, uninvite, machine-add/rm, list-invites
//! │   └── integrate     # External secret integrations
//! └── core/             # Core library components
//!     ├── cipher/       # AES-GCM sealing and RSA key wrapping
//!     ├── config        # Workspace discovery and config.toml
//!     ├── domain/       # Recipients, secrets, warnings
//!     ├── store/        # keys.json, secrets.json, overlay.json
//!     ├── keys          # Local private key discovery
//!     ├── overlay       # Overlay chains
//!     ├── vault/        # Resolution engine and mutations
//!     ├── lookup        # Public key lookup by handle
//!     ├── integration   # 1Password references
//!     ├── env           # .env rendering
//!     └── runner        # Child process with signal forwarding
//! ```

pub mod cli;
pub mod core;
pub mod error;
