//! TranscriptStore trait definition.
//!
//! Uses native async fn in traits (RPITIT) so implementations can do async
//! file I/O without boxing.

use murmur_types::error::TranscriptError;
use murmur_types::session::SessionId;

/// Append-only, per-user transcript of message events.
///
/// Implementations must serialise appends for the same user (a private
/// message can write to one transcript from two connections at once) while
/// letting different users proceed independently. Records are never
/// rewritten or reordered; `clear` removes a transcript wholesale.
pub trait TranscriptStore: Send + Sync {
    /// Encrypt `plaintext` and append it as one record to `user`'s transcript,
    /// creating the transcript if absent.
    fn append(
        &self,
        user: SessionId,
        plaintext: &str,
    ) -> impl std::future::Future<Output = Result<(), TranscriptError>> + Send;

    /// Encrypt `plaintext` once and append the identical record to every
    /// listed transcript.
    ///
    /// Stops at the first failing user; earlier users keep their record.
    fn append_to_all(
        &self,
        users: &[SessionId],
        plaintext: &str,
    ) -> impl std::future::Future<Output = Result<(), TranscriptError>> + Send;

    /// Read `user`'s transcript top-to-bottom as plaintext lines.
    ///
    /// A missing transcript yields an empty vector.
    fn replay(
        &self,
        user: SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<String>, TranscriptError>> + Send;

    /// Delete `user`'s transcript. Clearing a missing transcript succeeds.
    fn clear(
        &self,
        user: SessionId,
    ) -> impl std::future::Future<Output = Result<(), TranscriptError>> + Send;
}
