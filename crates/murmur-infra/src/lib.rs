//! Infrastructure layer for Murmur.
//!
//! Contains implementations of the ports defined in `murmur-core`: encrypted
//! transcript files, the AES line ciphers and the model subprocess, plus the
//! config loader and data directory resolution.

pub mod ai;
pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod transcript;
