//! Routing rules and port definitions for the Murmur relay.
//!
//! This crate defines the "ports" (traits) that the infrastructure layer
//! implements -- transcript storage, line encryption and external text
//! generation -- plus the pieces of pure relay logic: the session registry
//! and the message router. It depends only on `murmur-types`, never on
//! `murmur-infra` or any socket/filesystem/process code.

pub mod ai;
pub mod crypto;
pub mod router;
pub mod session;
pub mod transcript;
