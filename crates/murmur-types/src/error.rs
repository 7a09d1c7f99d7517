//! Error enums shared across the relay crates.
//!
//! IMPORTANT: none of these carry plaintext, ciphertext or key material in
//! their Display/Debug output, so they are safe to log as-is.

use std::time::Duration;

use thiserror::Error;

use crate::session::SessionId;

/// Errors from transcript line encryption.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("stored line is not valid base64")]
    InvalidEncoding,

    #[error("invalid ciphertext: too short")]
    CiphertextTooShort,

    #[error("decrypted line is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("key derivation failed")]
    KeyDerivationFailed,
}

/// Errors from the per-user transcript store.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript I/O failed for user {user}: {source}")]
    Io {
        user: SessionId,
        #[source]
        source: std::io::Error,
    },

    #[error("transcript line could not be encrypted: {0}")]
    Cipher(#[from] CipherError),
}

/// Errors from invoking the external text-generation command.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect model output: {0}")]
    Output(#[source] std::io::Error),

    #[error("model process exited with {status}")]
    NonZeroExit { status: String },

    #[error("model process timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors from validating a loaded relay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("legacy transcript key must be exactly 16 bytes, got {0}")]
    LegacyKeyLength(usize),

    #[error("sealed transcripts require a non-empty passphrase")]
    MissingPassphrase,

    #[error("ai program must not be empty")]
    MissingProgram,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_error_names_user() {
        let err = TranscriptError::Io {
            user: SessionId(1002),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("1002"), "missing user id: {msg}");
    }

    #[test]
    fn cipher_errors_never_contain_secrets() {
        let secret_line = "You: (@1001) my bank pin is 4321";
        let key = "MySecretKey12345";

        let errors = [
            CipherError::EncryptionFailed,
            CipherError::DecryptionFailed,
            CipherError::InvalidEncoding,
            CipherError::CiphertextTooShort,
            CipherError::InvalidUtf8,
            CipherError::InvalidKey("expected 16 bytes".to_string()),
            CipherError::KeyDerivationFailed,
        ];

        for err in &errors {
            let msg = err.to_string();
            assert!(!msg.contains(secret_line), "error leaks plaintext: {msg}");
            assert!(!msg.contains(key), "error leaks key: {msg}");
        }
    }

    #[test]
    fn execution_error_display() {
        let err = ExecutionError::NonZeroExit {
            status: "exit status: 3".to_string(),
        };
        assert_eq!(err.to_string(), "model process exited with exit status: 3");
    }
}
