//! Shared domain types for the Murmur relay.
//!
//! This crate holds the vocabulary every other layer speaks: session
//! identities, parsed command intents, the server-to-client wire lines,
//! relay configuration and the error enums used across crates.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod intent;
pub mod protocol;
pub mod session;
