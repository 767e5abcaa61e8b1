//! Audio artifact storage.
//!
//! Each successful synthesis produces one artifact stored under a
//! fresh unique name in a scratch directory. Prior artifacts are not
//! reused or garbage-collected within a session.

use std::path::{Path, PathBuf};

/// MIME type of stored artifacts.
pub const AUDIO_MEDIA_TYPE: &str = "audio/mpeg";

/// Suggested filename when an artifact is offered for download.
pub const DOWNLOAD_FILENAME: &str = "Summary.mp3";

/// A stored audio artifact.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Backing file, uniquely named.
    pub path: PathBuf,
    /// Media type tag, always MP3-compatible audio.
    pub media_type: &'static str,
    /// Size of the stored byte stream.
    pub len: u64,
}

/// Scratch-directory store for generated audio files.
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    /// Create a store rooted at `dir`. The directory is created on
    /// first write, not here.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Directory holding the artifacts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store audio bytes under a fresh unique identity.
    pub fn store(&self, bytes: &[u8]) -> std::io::Result<AudioArtifact> {
        std::fs::create_dir_all(&self.dir)?;

        let filename = format!("summary-{}.mp3", uuid::Uuid::new_v4());
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "stored audio artifact");

        Ok(AudioArtifact {
            path,
            media_type: AUDIO_MEDIA_TYPE,
            len: bytes.len() as u64,
        })
    }
}
