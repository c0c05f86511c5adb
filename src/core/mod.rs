//! Core library components.
//!
//! Envelope encryption, the on-disk stores, overlay chains and the
//! resolution engine. Nothing in here prints; the CLI decides how results
//! and warnings are shown.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod integration;
pub mod keys;
pub mod lookup;
pub mod overlay;
pub mod runner;
pub mod store;
pub mod types;
pub mod validation;
pub mod vault;

#[cfg(test)]
pub(crate) mod testing;
