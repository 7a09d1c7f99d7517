//! AES-128/ECB transcript cipher, byte-compatible with existing chat logs.
//!
//! Stored format: `base64(AES-128-ECB(PKCS#7(plaintext)))`, standard
//! alphabet with padding. There is no IV, so the same plaintext always
//! produces the same stored line and repeated messages are visible as
//! repeated ciphertext. Use [`super::SealedCipher`] when compatibility with
//! old logs is not required.

use aes::Aes128;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use murmur_core::crypto::LineCipher;
use murmur_types::error::CipherError;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

/// AES block size in bytes.
const BLOCK_SIZE: usize = 16;

/// Deterministic AES-128/ECB line cipher.
pub struct LegacyAesCipher {
    key: [u8; BLOCK_SIZE],
}

impl LegacyAesCipher {
    pub fn new(key: [u8; BLOCK_SIZE]) -> Self {
        Self { key }
    }

    /// Build from the configured key string, whose UTF-8 bytes must be
    /// exactly 16 long.
    pub fn from_key_str(key: &str) -> Result<Self, CipherError> {
        let bytes: [u8; BLOCK_SIZE] = key.as_bytes().try_into().map_err(|_| {
            CipherError::InvalidKey(format!(
                "expected {BLOCK_SIZE} bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Self::new(bytes))
    }
}

impl LineCipher for LegacyAesCipher {
    fn name(&self) -> &str {
        "legacy"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let encryptor = Aes128EcbEnc::new_from_slice(&self.key)
            .map_err(|_| CipherError::EncryptionFailed)?;
        let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(STANDARD.encode(ciphertext))
    }

    fn decrypt(&self, stored: &str) -> Result<String, CipherError> {
        let ciphertext = STANDARD
            .decode(stored.trim())
            .map_err(|_| CipherError::InvalidEncoding)?;
        if ciphertext.len() < BLOCK_SIZE {
            return Err(CipherError::CiphertextTooShort);
        }

        let decryptor = Aes128EcbDec::new_from_slice(&self.key)
            .map_err(|_| CipherError::DecryptionFailed)?;
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}
