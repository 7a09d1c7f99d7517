//! Murmur relay entry point.
//!
//! Binary name: `murmurd`
//!
//! Parses CLI arguments, sets up tracing, then either prints configuration
//! or completions, or runs the TCP relay until Ctrl+C / SIGTERM.

mod cli;
mod server;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands};
use state::{AppState, Overrides};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,murmur=info",
        1 => "info,murmur=debug",
        _ => "trace",
    };
    murmur_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise tracing")?;

    let result = run(cli).await;
    murmur_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "murmurd", &mut std::io::stdout());
        }

        Commands::Config => {
            let (data_dir, config) = state::load_config().await;
            println!("# data dir: {}", data_dir.display());
            print!("{}", toml::to_string_pretty(&config.redacted())?);
        }

        Commands::Serve { host, port } => {
            let state = AppState::init(Overrides { host, port }).await?;

            let addr = state.config.server.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            if !cli.quiet {
                println!(
                    "  {} Murmur relay listening on {}",
                    console::style("⚡").bold(),
                    console::style(&addr).cyan()
                );
                println!(
                    "  {} {}",
                    console::style("Transcripts:").dim(),
                    state.transcript_dir.display()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(
                %addr,
                data_dir = %state.data_dir.display(),
                cipher = ?state.config.transcript.cipher,
                "relay started"
            );

            let shutdown = CancellationToken::new();
            let trigger = shutdown.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                trigger.cancel();
            });

            server::serve(listener, state.relay, shutdown).await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
