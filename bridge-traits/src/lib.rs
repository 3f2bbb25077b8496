//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and the
//! platform-specific tag engine. The core treats the engine as an opaque
//! collaborator: it never opens an audio container itself, it only issues
//! asynchronous read/write requests through [`MetadataBridge`](metadata::MetadataBridge)
//! and relays the results.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Provide actionable error messages
//! - Include error context (e.g., file paths)
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Implementations must ensure thread safety; they
//! are not required to serialize calls — write ordering is the caller's job.

pub mod error;
pub mod metadata;

pub use error::BridgeError;

// Re-export commonly used types
pub use metadata::{AudioFileMetadata, AudioTags, MetadataBridge};
