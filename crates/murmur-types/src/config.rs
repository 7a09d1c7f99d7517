//! Relay configuration types.
//!
//! `RelayConfig` mirrors `config.toml` in the data directory. Every field has
//! a default, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::intent::AiModel;

/// Placeholder written over secrets by [`RelayConfig::redacted`].
const REDACTED: &str = "<redacted>";

/// Top-level configuration for the relay server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub transcript: TranscriptConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl RelayConfig {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        match self.transcript.cipher {
            CipherKind::Legacy => {
                let len = self.transcript.key.len();
                if len != 16 {
                    return Err(ConfigError::LegacyKeyLength(len));
                }
            }
            CipherKind::Sealed => {
                if self
                    .transcript
                    .passphrase
                    .as_deref()
                    .is_none_or(|p| p.is_empty())
                {
                    return Err(ConfigError::MissingPassphrase);
                }
            }
        }
        if self.ai.program.trim().is_empty() {
            return Err(ConfigError::MissingProgram);
        }
        Ok(())
    }

    /// Copy of the config with key material blanked, safe to print or log.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.transcript.key = REDACTED.to_string();
        if copy.transcript.passphrase.is_some() {
            copy.transcript.passphrase = Some(REDACTED.to_string());
        }
        copy
    }
}

/// TCP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    12345
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which transform protects transcript lines at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// AES-128/ECB, deterministic, readable by existing `ChatLogs` files.
    #[default]
    Legacy,
    /// AES-256-GCM with a random nonce per line.
    Sealed,
}

/// Transcript storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Directory holding `user_<id>.txt` files. Relative paths are resolved
    /// against the data directory.
    #[serde(default = "default_transcript_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub cipher: CipherKind,

    /// 16-byte key for the legacy cipher.
    #[serde(default = "default_legacy_key")]
    pub key: String,

    /// Passphrase for the sealed cipher (Argon2id-derived key).
    #[serde(default)]
    pub passphrase: Option<String>,
}

fn default_transcript_dir() -> PathBuf {
    PathBuf::from("ChatLogs")
}

fn default_legacy_key() -> String {
    "MySecretKey12345".to_string()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            dir: default_transcript_dir(),
            cipher: CipherKind::default(),
            key: default_legacy_key(),
            passphrase: None,
        }
    }
}

/// External model command settings.
///
/// The command run for a query is `<program> <args...> <model tag> <prompt>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Concrete tag passed for `@ai`.
    #[serde(default = "default_general_model")]
    pub general_model: String,

    /// Concrete tag passed for `@math`.
    #[serde(default = "default_math_model")]
    pub math_model: String,

    /// Kill the model process after this many seconds. Unset means wait
    /// indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_program() -> String {
    "ollama".to_string()
}

fn default_args() -> Vec<String> {
    vec!["run".to_string()]
}

fn default_general_model() -> String {
    "deepseek-r1:1.5b".to_string()
}

fn default_math_model() -> String {
    "qwen2-math:1.5b".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            general_model: default_general_model(),
            math_model: default_math_model(),
            timeout_secs: None,
        }
    }
}

impl AiConfig {
    /// Concrete model tag for a model family.
    pub fn model_tag(&self, model: AiModel) -> &str {
        match model {
            AiModel::DeepseekR1 => &self.general_model,
            AiModel::Qwen2Math => &self.math_model,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_deployment() {
        let config = RelayConfig::default();
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:12345");
        assert_eq!(config.transcript.dir, PathBuf::from("ChatLogs"));
        assert_eq!(config.transcript.cipher, CipherKind::Legacy);
        assert_eq!(config.transcript.key.len(), 16);
        assert_eq!(config.ai.program, "ollama");
        assert_eq!(config.ai.args, vec!["run"]);
        assert!(config.ai.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.ai.model_tag(AiModel::DeepseekR1), "deepseek-r1:1.5b");
        assert_eq!(config.ai.model_tag(AiModel::Qwen2Math), "qwen2-math:1.5b");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
[server]
port = 4000

[transcript]
cipher = "sealed"
passphrase = "correct horse"

[ai]
timeout_secs = 90
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.transcript.cipher, CipherKind::Sealed);
        assert_eq!(config.ai.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.ai.program, "ollama");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_legacy_key() {
        let mut config = RelayConfig::default();
        config.transcript.key = "short".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LegacyKeyLength(5))
        ));
    }

    #[test]
    fn validate_requires_passphrase_for_sealed() {
        let mut config = RelayConfig::default();
        config.transcript.cipher = CipherKind::Sealed;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingPassphrase)
        ));
        config.transcript.passphrase = Some(String::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingPassphrase)
        ));
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = RelayConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn redacted_hides_key_material() {
        let mut config = RelayConfig::default();
        config.transcript.passphrase = Some("hunter2".to_string());
        let shown = config.redacted();
        assert_eq!(shown.transcript.key, REDACTED);
        assert_eq!(shown.transcript.passphrase.as_deref(), Some(REDACTED));
        // Original untouched
        assert_eq!(config.transcript.key, "MySecretKey12345");
    }

    #[test]
    fn serializes_back_to_toml() {
        let rendered = toml::to_string_pretty(&RelayConfig::default()).unwrap();
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("cipher = \"legacy\""));
    }
}
