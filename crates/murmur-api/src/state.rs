//! Application state wiring the relay together.
//!
//! The relay is generic over the transcript store and text generator ports;
//! AppState pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use murmur_infra::ai::CommandTextGenerator;
use murmur_infra::config::load_relay_config;
use murmur_infra::crypto::build_cipher;
use murmur_infra::filesystem::resolve_data_dir;
use murmur_infra::transcript::FileTranscriptStore;
use murmur_types::config::RelayConfig;

use crate::server::Relay;

/// Relay pinned to file transcripts and the model subprocess.
pub type ConcreteRelay = Relay<FileTranscriptStore, CommandTextGenerator>;

/// Fully initialised server state.
pub struct AppState {
    pub config: RelayConfig,
    pub data_dir: PathBuf,
    pub transcript_dir: PathBuf,
    pub relay: ConcreteRelay,
}

/// Command-line values that take precedence over `config.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Overrides {
    fn apply(self, config: &mut RelayConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Load `config.toml` from the resolved data directory, with the transcript
/// directory already made absolute.
pub async fn load_config() -> (PathBuf, RelayConfig) {
    let data_dir = resolve_data_dir();
    let config = load_relay_config(&data_dir).await;
    (data_dir, config)
}

impl AppState {
    /// Load and validate configuration, then build the transcript store,
    /// cipher and model command.
    pub async fn init(overrides: Overrides) -> anyhow::Result<Self> {
        let (data_dir, mut config) = load_config().await;
        overrides.apply(&mut config);
        config.validate().context("invalid configuration")?;

        let transcript_dir = config.transcript.dir.clone();
        tokio::fs::create_dir_all(&transcript_dir)
            .await
            .with_context(|| format!("failed to create {}", transcript_dir.display()))?;

        let cipher = build_cipher(&config.transcript).context("failed to set up transcript cipher")?;
        tracing::debug!(
            dir = %transcript_dir.display(),
            cipher = cipher.name(),
            "transcript store ready"
        );

        let transcripts = Arc::new(FileTranscriptStore::new(&transcript_dir, cipher));
        let generator = Arc::new(CommandTextGenerator::new(&config.ai));
        let relay = Relay::new(transcripts, generator);

        Ok(Self {
            config,
            data_dir,
            transcript_dir,
            relay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = RelayConfig::default();
        Overrides {
            host: None,
            port: Some(4000),
        }
        .apply(&mut config);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:4000");

        Overrides {
            host: Some("127.0.0.1".to_string()),
            port: None,
        }
        .apply(&mut config);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:4000");
    }
}
