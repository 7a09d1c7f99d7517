//! Per-user transcript persistence abstractions.
//!
//! This module defines the `TranscriptStore` trait that the infrastructure
//! layer implements with one encrypted file per user.

pub mod store;

pub use store::TranscriptStore;
