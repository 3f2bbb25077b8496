//! # Metadata Module
//!
//! Exposes tag, embedded-artwork, and lyric read/write operations for local
//! audio files to the host application.
//!
//! ## Overview
//!
//! This module handles:
//! - Tag reads and writes (title, artist, album) through the platform bridge
//! - Embedded artwork extraction and embedding
//! - Lyric extraction (embedded or sibling `.lrc`) and embedding
//! - Per-file write serialization: concurrent writes to the same file never
//!   overlap, writes to different files run independently
//!
//! The actual container parsing lives behind
//! [`MetadataBridge`](bridge_traits::metadata::MetadataBridge); this crate is
//! the sequencing and error-propagation layer on top of it.

pub mod error;
pub mod service;

pub use error::{MetadataError, Result};
pub use service::MetadataService;
