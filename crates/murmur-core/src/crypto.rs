//! LineCipher trait for protecting transcript lines at rest.
//!
//! Defined in murmur-core so the transcript store can encrypt lines without
//! coupling to a specific algorithm. The AES adapters live in murmur-infra.

use murmur_types::error::CipherError;

/// Reversible transform applied to every persisted transcript line.
///
/// Implementations use one process-wide key. Output must be a single line of
/// printable text (no `\n`), since the store is line-oriented.
pub trait LineCipher: Send + Sync {
    /// Short name for logs (`legacy`, `sealed`).
    fn name(&self) -> &str;

    /// Encrypt one plaintext line into its stored form.
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;

    /// Decrypt one stored line back to plaintext.
    fn decrypt(&self, stored: &str) -> Result<String, CipherError>;
}
