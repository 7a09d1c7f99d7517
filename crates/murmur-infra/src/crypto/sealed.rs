//! AES-256-GCM transcript cipher with a fresh nonce per line.
//!
//! Stored format: `base64(nonce (12 bytes) || ciphertext)`.
//! The key is derived from a passphrase with Argon2id.
//!
//! SECURITY: Error values never contain plaintext or key material.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use murmur_core::crypto::LineCipher;
use murmur_types::error::CipherError;

/// Nonce size for AES-256-GCM (96 bits / 12 bytes).
const NONCE_SIZE: usize = 12;

/// Fixed KDF salt. The passphrase supplies the entropy and the derived key
/// is never stored, so a per-install salt buys nothing here.
const KDF_SALT: &[u8] = b"murmur-transcript-v1";

/// Authenticated line cipher. Encrypting the same line twice yields
/// different stored text.
pub struct SealedCipher {
    cipher: Aes256Gcm,
}

impl SealedCipher {
    /// Create from a raw 32-byte key.
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Derive the key from a passphrase using Argon2id
    /// (19 MiB memory, 2 iterations, parallelism 1).
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CipherError> {
        use argon2::{Algorithm, Argon2, Params, Version};

        let params =
            Params::new(19456, 2, 1, Some(32)).map_err(|_| CipherError::KeyDerivationFailed)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = [0u8; 32];
        argon2
            .hash_password_into(passphrase.as_bytes(), KDF_SALT, &mut key)
            .map_err(|_| CipherError::KeyDerivationFailed)?;

        Ok(Self::new(&key))
    }
}

impl LineCipher for SealedCipher {
    fn name(&self) -> &str {
        "sealed"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    fn decrypt(&self, stored: &str) -> Result<String, CipherError> {
        let data = STANDARD
            .decode(stored.trim())
            .map_err(|_| CipherError::InvalidEncoding)?;
        if data.len() < NONCE_SIZE {
            return Err(CipherError::CiphertextTooShort);
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}
