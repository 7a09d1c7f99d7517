//! File-backed transcript store.
//!
//! One file per user at `<dir>/user_<id>.txt`, one encrypted record per
//! `\n`-terminated line. Appends for the same user are serialised by a
//! per-user async mutex; different users never contend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use murmur_core::crypto::LineCipher;
use murmur_core::transcript::TranscriptStore;
use murmur_types::error::TranscriptError;
use murmur_types::session::SessionId;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Encrypted per-user transcript files in a single directory.
pub struct FileTranscriptStore {
    dir: PathBuf,
    cipher: Arc<dyn LineCipher>,
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl FileTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>, cipher: Arc<dyn LineCipher>) -> Self {
        Self {
            dir: dir.into(),
            cipher,
            locks: DashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `user`'s transcript file.
    pub fn path_for(&self, user: SessionId) -> PathBuf {
        self.dir.join(format!("user_{user}.txt"))
    }

    fn lock_for(&self, user: SessionId) -> Arc<Mutex<()>> {
        self.locks.entry(user).or_default().clone()
    }

    /// Append one already-encrypted record. Caller holds no lock.
    async fn write_record(&self, user: SessionId, record: &str) -> Result<(), TranscriptError> {
        let io_err = |source| TranscriptError::Io { user, source };

        let lock = self.lock_for(user);
        let _guard = lock.lock().await;

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(user))
            .await
            .map_err(io_err)?;

        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }
}

impl TranscriptStore for FileTranscriptStore {
    async fn append(&self, user: SessionId, plaintext: &str) -> Result<(), TranscriptError> {
        let record = self.cipher.encrypt(plaintext)?;
        self.write_record(user, &record).await
    }

    async fn append_to_all(
        &self,
        users: &[SessionId],
        plaintext: &str,
    ) -> Result<(), TranscriptError> {
        let record = self.cipher.encrypt(plaintext)?;
        for &user in users {
            self.write_record(user, &record).await?;
        }
        Ok(())
    }

    async fn replay(&self, user: SessionId) -> Result<Vec<String>, TranscriptError> {
        let lock = self.lock_for(user);
        let _guard = lock.lock().await;

        let content = match tokio::fs::read_to_string(self.path_for(user)).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(session_id = %user, "no transcript yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(TranscriptError::Io { user, source }),
        };

        let lines = content
            .lines()
            .map(|stored| {
                // Blank lines replay as-is; they never held a record.
                if stored.trim().is_empty() {
                    return stored.to_string();
                }
                match self.cipher.decrypt(stored) {
                    Ok(plaintext) => plaintext,
                    Err(e) => {
                        warn!(session_id = %user, cipher = self.cipher.name(), error = %e,
                            "undecryptable transcript line, replaying raw");
                        stored.to_string()
                    }
                }
            })
            .collect();
        Ok(lines)
    }

    async fn clear(&self, user: SessionId) -> Result<(), TranscriptError> {
        let lock = self.lock_for(user);
        let _guard = lock.lock().await;

        match tokio::fs::remove_file(self.path_for(user)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TranscriptError::Io { user, source }),
        }
    }
}

impl std::fmt::Debug for FileTranscriptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTranscriptStore")
            .field("dir", &self.dir)
            .field("cipher", &self.cipher.name())
            .finish()
    }
}
