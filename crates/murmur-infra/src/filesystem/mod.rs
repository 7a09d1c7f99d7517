//! Data directory layout for Murmur.

use std::path::{Path, PathBuf};

use murmur_types::config::TranscriptConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MURMUR_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MURMUR_DATA_DIR` environment variable
/// 2. `~/.murmur`
/// 3. `./.murmur` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".murmur");
    }

    PathBuf::from(".murmur")
}

/// Directory holding transcript files. Relative configured paths are taken
/// relative to the data directory.
pub fn resolve_transcript_dir(data_dir: &Path, config: &TranscriptConfig) -> PathBuf {
    if config.dir.is_absolute() {
        config.dir.clone()
    } else {
        data_dir.join(&config.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_transcript_dir_joins_data_dir() {
        let data_dir = PathBuf::from("/home/user/.murmur");
        let config = TranscriptConfig::default();
        assert_eq!(
            resolve_transcript_dir(&data_dir, &config),
            PathBuf::from("/home/user/.murmur/ChatLogs")
        );
    }

    #[test]
    fn test_absolute_transcript_dir_is_kept() {
        let data_dir = PathBuf::from("/home/user/.murmur");
        let config = TranscriptConfig {
            dir: PathBuf::from("/srv/chat/logs"),
            ..Default::default()
        };
        assert_eq!(
            resolve_transcript_dir(&data_dir, &config),
            PathBuf::from("/srv/chat/logs")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-murmur");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-murmur"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
