//! Overwrite-then-delete for source files removed with `-nopreserve`.
//!
//! Failures here are never fatal: the cipher output already exists, so the
//! worst case is a source file that survives and a warning in the log.

use tracing::{debug, warn};

use crate::config::{PROP_NO_DELETE, SHRED_PATTERNS};
use crate::file::File;

/// What the shredder managed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShredReport {
    /// Number of overwrite passes that completed.
    pub passes: usize,

    /// Whether the file is gone afterwards.
    pub deleted: bool,
}

/// Overwrites `file` with each of [`SHRED_PATTERNS`] in turn, then deletes it
/// unless `no_delete` is set. Deletion is attempted even when a pass fails.
pub async fn shred_and_delete(file: &File, no_delete: bool) -> ShredReport {
    let mut passes = 0;

    for pattern in SHRED_PATTERNS {
        match file.fill(pattern).await {
            Ok(()) => {
                debug!("shredded {} with {pattern:#04x}", file.path().display());
                passes += 1;
            }
            Err(err) => {
                warn!("could not shred {}: {err:#}", file.name());
                break;
            }
        }
    }

    let deleted = if no_delete {
        warn!("could not delete {}: deletion disabled by {PROP_NO_DELETE}", file.name());
        false
    } else {
        match file.delete().await {
            Ok(()) => true,
            Err(err) => {
                warn!("could not delete {}: {err:#}", file.name());
                false
            }
        }
    };

    ShredReport { passes, deleted }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn test_shred_and_delete() {
        let dir = tempdir().unwrap();
        let file = File::new(dir.path().join("plain.txt"));
        file.write_all(b"top secret").await.unwrap();

        let report = shred_and_delete(&file, false).await;

        assert_eq!(report, ShredReport { passes: 4, deleted: true });
        assert!(!file.exists().await);
    }

    #[tokio::test]
    async fn test_no_delete_leaves_last_pattern() {
        let dir = tempdir().unwrap();
        let file = File::new(dir.path().join("plain.txt"));
        file.write_all(b"top secret").await.unwrap();

        let report = shred_and_delete(&file, true).await;

        assert_eq!(report, ShredReport { passes: 4, deleted: false });
        let contents = file.read_all().await.unwrap();
        assert_eq!(contents.len(), 10);
        assert!(contents.iter().all(|&b| b == 0xFF));
    }

    #[tokio::test]
    async fn test_each_pass_fills_whole_file() {
        let dir = tempdir().unwrap();
        let file = File::new(dir.path().join("plain.txt"));
        file.write_all(&[0x13; 4096]).await.unwrap();

        for pattern in SHRED_PATTERNS {
            file.fill(pattern).await.unwrap();
            let contents = file.read_all().await.unwrap();
            assert_eq!(contents.len(), 4096);
            assert!(contents.iter().all(|&b| b == pattern));
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_fatal() {
        let dir = tempdir().unwrap();
        let file = File::new(dir.path().join("gone.txt"));

        let report = shred_and_delete(&file, false).await;

        assert_eq!(report, ShredReport { passes: 0, deleted: false });
    }
}
