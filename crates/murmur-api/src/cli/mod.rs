//! CLI definitions for the `murmurd` binary.
//!
//! Uses clap derive macros for argument parsing.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Multi-user chat relay with encrypted transcripts and local AI replies.
#[derive(Parser)]
#[command(name = "murmurd", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay server.
    Serve {
        /// Address to bind (overrides `[server] host`).
        #[arg(long, env = "MURMUR_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides `[server] port`).
        #[arg(short, long, env = "MURMUR_PORT")]
        port: Option<u16>,
    },

    /// Print the effective configuration with secrets redacted.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
