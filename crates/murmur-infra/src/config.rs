//! Relay configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.murmur/` in production)
//! into a [`RelayConfig`] whose paths are already resolved against that
//! directory. A missing or malformed file yields the defaults.

use std::path::Path;

use murmur_types::config::RelayConfig;

use crate::filesystem::resolve_transcript_dir;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load relay configuration from `{data_dir}/config.toml`.
///
/// `transcript.dir` is made absolute relative to `data_dir`, so callers and
/// `murmurd config` see the directory actually in use.
pub async fn load_relay_config(data_dir: &Path) -> RelayConfig {
    let mut config = read_config_file(data_dir).await.unwrap_or_default();
    config.transcript.dir = resolve_transcript_dir(data_dir, &config.transcript);
    tracing::debug!(
        bind = %config.server.bind_addr(),
        transcripts = %config.transcript.dir.display(),
        cipher = ?config.transcript.cipher,
        "effective relay configuration"
    );
    config
}

/// Parsed file contents, or `None` when the defaults should apply.
async fn read_config_file(data_dir: &Path) -> Option<RelayConfig> {
    let path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no relay config file, using defaults");
            return None;
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable relay config, using defaults");
            return None;
        }
    };

    toml::from_str(&content)
        .inspect_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid relay config, using defaults");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_types::config::CipherKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_relay_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.transcript.cipher, CipherKind::Legacy);
        assert_eq!(config.transcript.dir, tmp.path().join("ChatLogs"));
    }

    #[tokio::test]
    async fn load_relay_config_resolves_relative_transcript_dir() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[transcript]\ndir = \"logs/chat\"\n",
        )
        .await
        .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.transcript.dir, tmp.path().join("logs/chat"));
    }

    #[tokio::test]
    async fn load_relay_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[server]
host = "127.0.0.1"
port = 7000

[transcript]
dir = "/var/lib/murmur/logs"

[ai]
program = "llama-cli"
args = []
general_model = "llama3"
"#,
        )
        .await
        .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.server.bind_addr(), "127.0.0.1:7000");
        assert_eq!(config.transcript.dir, PathBuf::from("/var/lib/murmur/logs"));
        assert_eq!(config.ai.program, "llama-cli");
        assert!(config.ai.args.is_empty());
        assert_eq!(config.ai.general_model, "llama3");
        assert_eq!(config.ai.math_model, "qwen2-math:1.5b");
    }

    #[tokio::test]
    async fn load_relay_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.transcript.dir, tmp.path().join("ChatLogs"));
    }
}
