//! Transcript line ciphers.
//!
//! - `legacy`: AES-128/ECB, compatible with existing chat logs
//! - `sealed`: AES-256-GCM with per-line random nonces

pub mod legacy;
pub mod sealed;

use std::sync::Arc;

use murmur_core::crypto::LineCipher;
use murmur_types::config::{CipherKind, TranscriptConfig};
use murmur_types::error::CipherError;

pub use legacy::LegacyAesCipher;
pub use sealed::SealedCipher;

/// Build the configured cipher.
pub fn build_cipher(config: &TranscriptConfig) -> Result<Arc<dyn LineCipher>, CipherError> {
    match config.cipher {
        CipherKind::Legacy => Ok(Arc::new(LegacyAesCipher::from_key_str(&config.key)?)),
        CipherKind::Sealed => {
            let passphrase = config
                .passphrase
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| CipherError::InvalidKey("missing passphrase".to_string()))?;
            Ok(Arc::new(SealedCipher::from_passphrase(passphrase)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_legacy() {
        let cipher = build_cipher(&TranscriptConfig::default()).unwrap();
        assert_eq!(cipher.name(), "legacy");
    }

    #[test]
    fn sealed_requires_passphrase() {
        let mut config = TranscriptConfig {
            cipher: CipherKind::Sealed,
            ..Default::default()
        };
        assert!(build_cipher(&config).is_err());

        config.passphrase = Some("open sesame".to_string());
        assert_eq!(build_cipher(&config).unwrap().name(), "sealed");
    }
}
