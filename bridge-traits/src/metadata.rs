//! Native Tag Engine Abstraction
//!
//! Defines the async boundary between the core and the platform's tag engine
//! (jaudiotagger on Android, AVFoundation on iOS, a desktop tagger in tests).
//! The core never parses audio containers itself; every read and write of
//! tags, embedded artwork, or lyrics crosses this trait.
//!
//! # Example
//!
//! ```ignore
//! use bridge_traits::metadata::{AudioTags, MetadataBridge};
//! use std::path::Path;
//!
//! async fn retitle(bridge: &dyn MetadataBridge, path: &Path) -> bridge_traits::error::Result<()> {
//!     let tags = AudioTags {
//!         name: "New Title".into(),
//!         ..AudioTags::default()
//!     };
//!     bridge.write_metadata(path, tags, false).await
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The writable subset of an audio file's tags.
///
/// Field names serialize in the camelCase shape the host application layer
/// expects (`name`, `singer`, `albumName`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTags {
    /// Track title. Empty titles fall back to the file stem on read.
    pub name: String,
    /// Artist name. Tag engines joining multiple artists do so before
    /// crossing this boundary.
    pub singer: String,
    /// Album title.
    pub album_name: String,
}

/// Full metadata read back from an audio file: the tag fields plus the
/// properties of the audio header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFileMetadata {
    /// Tag fields (title, artist, album).
    #[serde(flatten)]
    pub tags: AudioTags,
    /// Encoding type reported by the audio header (e.g. "mp3", "flac").
    #[serde(rename = "type")]
    pub format: String,
    /// File extension, lower-case, without the leading dot.
    pub ext: String,
    /// Bitrate as reported by the audio header (e.g. "320").
    pub bitrate: String,
    /// Track length in seconds.
    #[serde(rename = "interval")]
    pub duration_secs: f64,
    /// File size in bytes.
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

/// Platform tag engine.
///
/// Implementations perform the actual container I/O. All methods take the
/// audio file path; none of them provide ordering guarantees of their own —
/// callers that need write serialization layer it on top (see `core-queue`).
#[async_trait]
pub trait MetadataBridge: Send + Sync {
    /// Read tags and audio properties from `path`.
    ///
    /// Returns `Ok(None)` when the file exists but carries no readable tags
    /// and no properties could be recovered.
    async fn read_metadata(&self, path: &Path) -> Result<Option<AudioFileMetadata>>;

    /// Write `tags` to `path`.
    ///
    /// With `overwrite` set, existing tags are discarded and replaced by a
    /// fresh default tag before the fields are applied; otherwise the fields
    /// are merged into the existing tag.
    async fn write_metadata(&self, path: &Path, tags: AudioTags, overwrite: bool) -> Result<()>;

    /// Extract the first embedded artwork of `path` into `pic_dir`.
    ///
    /// Returns the path of the written image file, or `Ok(None)` when the
    /// file has no embedded artwork.
    async fn read_pic(&self, path: &Path, pic_dir: &Path) -> Result<Option<PathBuf>>;

    /// Embed the image at `pic_path` into `path`.
    ///
    /// Passing `None` deletes any embedded artwork instead.
    async fn write_pic(&self, path: &Path, pic_path: Option<PathBuf>) -> Result<()>;

    /// Read lyrics for `path`.
    ///
    /// With `prefer_lrc_file` set, a sibling `.lrc` file takes precedence
    /// over lyrics embedded in the tag. Returns `Ok(None)` when neither
    /// source has lyrics.
    async fn read_lyric(&self, path: &Path, prefer_lrc_file: bool) -> Result<Option<String>>;

    /// Write `lyric` into the lyrics tag field of `path`.
    ///
    /// Passing `None` deletes the field.
    async fn write_lyric(&self, path: &Path, lyric: Option<String>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_tags_serde_shape() {
        let tags = AudioTags {
            name: "Track".to_string(),
            singer: "Artist".to_string(),
            album_name: "Album".to_string(),
        };

        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json["name"], "Track");
        assert_eq!(json["singer"], "Artist");
        assert_eq!(json["albumName"], "Album");
    }

    #[test]
    fn test_audio_file_metadata_serde_shape() {
        let metadata = AudioFileMetadata {
            tags: AudioTags {
                name: "Track".to_string(),
                singer: "Artist".to_string(),
                album_name: "Album".to_string(),
            },
            format: "mp3".to_string(),
            ext: "mp3".to_string(),
            bitrate: "320".to_string(),
            duration_secs: 215.0,
            size_bytes: 8_611_840,
        };

        let json = serde_json::to_value(&metadata).unwrap();
        // Flattened tag fields sit next to the header fields.
        assert_eq!(json["name"], "Track");
        assert_eq!(json["albumName"], "Album");
        // Wire names kept for the host application layer.
        assert_eq!(json["type"], "mp3");
        assert_eq!(json["interval"], 215.0);
        assert_eq!(json["size"], 8_611_840u64);
    }

    #[test]
    fn test_audio_file_metadata_round_trip() {
        let metadata = AudioFileMetadata {
            tags: AudioTags::default(),
            format: "flac".to_string(),
            ext: "flac".to_string(),
            bitrate: "1024".to_string(),
            duration_secs: 42.5,
            size_bytes: 1024,
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let back: AudioFileMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }
}
