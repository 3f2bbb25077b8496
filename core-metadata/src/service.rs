//! Metadata Service
//!
//! The façade the host application calls for tag, artwork, and lyric I/O.
//! Reads forward straight to the platform tag engine. The three write kinds
//! (`write_metadata`, `write_pic`, `write_lyric`) all route through one
//! [`WriteQueue`] keyed by the target file path, so concurrent writers to
//! the same file serialize regardless of which kind of write they issue,
//! while writes to different files proceed concurrently.
//!
//! The path is used as the key exactly as given; no canonicalization is
//! performed, so two spellings of the same file count as distinct keys.
//!
//! Reads are deliberately not sequenced against queued writes: a read issued
//! while a write is in flight may observe the file mid-write. This is a known
//! consistency gap carried over from the original bridge behavior.
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::MetadataService;
//! use bridge_traits::metadata::AudioTags;
//! use std::path::Path;
//!
//! # async fn example(service: &MetadataService) -> core_metadata::Result<()> {
//! let tags = AudioTags {
//!     name: "Title".into(),
//!     singer: "Artist".into(),
//!     album_name: "Album".into(),
//! };
//! service.write_metadata(Path::new("/music/a.mp3"), tags, false).await?;
//! let metadata = service.read_metadata(Path::new("/music/a.mp3")).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bridge_traits::metadata::{AudioFileMetadata, AudioTags, MetadataBridge};
use core_queue::WriteQueue;
use tracing::debug;

use crate::error::Result;

/// Read/write façade over the platform tag engine, with per-file write
/// serialization.
pub struct MetadataService {
    bridge: Arc<dyn MetadataBridge>,
    write_queue: WriteQueue<PathBuf>,
}

impl MetadataService {
    /// Create a service over the given tag engine.
    pub fn new(bridge: Arc<dyn MetadataBridge>) -> Self {
        Self {
            bridge,
            write_queue: WriteQueue::new(),
        }
    }

    /// Read tags and audio properties from `path`.
    pub async fn read_metadata(&self, path: &Path) -> Result<Option<AudioFileMetadata>> {
        debug!(path = %path.display(), "reading metadata");
        Ok(self.bridge.read_metadata(path).await?)
    }

    /// Write `tags` to `path`, replacing existing tags when `overwrite` is
    /// set. Serialized against every other write targeting the same path.
    pub async fn write_metadata(&self, path: &Path, tags: AudioTags, overwrite: bool) -> Result<()> {
        debug!(path = %path.display(), overwrite, "queueing metadata write");
        let bridge = Arc::clone(&self.bridge);
        let target = path.to_path_buf();
        Ok(self
            .write_queue
            .enqueue(target.clone(), move || async move {
                bridge.write_metadata(&target, tags, overwrite).await
            })
            .await?)
    }

    /// Extract the first embedded artwork of `path` into `pic_dir`, returning
    /// the written image path, or `None` when the file has no artwork.
    pub async fn read_pic(&self, path: &Path, pic_dir: &Path) -> Result<Option<PathBuf>> {
        debug!(path = %path.display(), "reading embedded artwork");
        Ok(self.bridge.read_pic(path, pic_dir).await?)
    }

    /// Embed the image at `pic_path` into `path`, or clear the embedded
    /// artwork when `pic_path` is `None`. Serialized against every other
    /// write targeting the same path.
    pub async fn write_pic(&self, path: &Path, pic_path: Option<PathBuf>) -> Result<()> {
        debug!(path = %path.display(), clear = pic_path.is_none(), "queueing artwork write");
        let bridge = Arc::clone(&self.bridge);
        let target = path.to_path_buf();
        Ok(self
            .write_queue
            .enqueue(target.clone(), move || async move {
                bridge.write_pic(&target, pic_path).await
            })
            .await?)
    }

    /// Read lyrics for `path`, preferring a sibling `.lrc` file when
    /// `prefer_lrc_file` is set.
    pub async fn read_lyric(&self, path: &Path, prefer_lrc_file: bool) -> Result<Option<String>> {
        debug!(path = %path.display(), prefer_lrc_file, "reading lyrics");
        Ok(self.bridge.read_lyric(path, prefer_lrc_file).await?)
    }

    /// Write `lyric` into the lyrics field of `path`, or delete the field
    /// when `lyric` is `None`. Serialized against every other write targeting
    /// the same path.
    pub async fn write_lyric(&self, path: &Path, lyric: Option<String>) -> Result<()> {
        debug!(path = %path.display(), clear = lyric.is_none(), "queueing lyric write");
        let bridge = Arc::clone(&self.bridge);
        let target = path.to_path_buf();
        Ok(self
            .write_queue
            .enqueue(target.clone(), move || async move {
                bridge.write_lyric(&target, lyric).await
            })
            .await?)
    }

    /// Number of file paths with writes still pending. Useful for host
    /// shutdown checks; zero means the write queue is fully drained.
    pub async fn pending_write_paths(&self) -> usize {
        self.write_queue.active_keys().await
    }

    /// Number of writes still pending for `path` specifically.
    pub async fn pending_writes_for(&self, path: &Path) -> usize {
        self.write_queue.pending_for(&path.to_path_buf()).await
    }
}

impl std::fmt::Debug for MetadataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataService").finish_non_exhaustive()
    }
}
