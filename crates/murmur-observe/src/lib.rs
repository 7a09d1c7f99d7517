//! Observability setup for the Murmur relay: structured logging through
//! `tracing`, optionally bridged to OpenTelemetry.

pub mod tracing_setup;
