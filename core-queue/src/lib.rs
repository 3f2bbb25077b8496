//! Keyed write-serialization queue for Local Media Metadata.
//!
//! Mutating operations addressed at the same resource (keyed by file path in
//! the metadata service) must never run concurrently with each other, while
//! operations on different resources stay independent. This crate provides
//! the sequencing primitive that enforces exactly that and nothing more: no
//! retries, no timeouts, no cancellation.
//!
//! # Examples
//!
//! ```rust
//! use core_queue::WriteQueue;
//! use std::path::PathBuf;
//!
//! async fn example(queue: &WriteQueue<PathBuf>) {
//!     let result: Result<(), String> = queue
//!         .enqueue(PathBuf::from("a.mp3"), || async {
//!             // Perform the write against the tag engine here. A second
//!             // enqueue for "a.mp3" waits for this closure to finish; an
//!             // enqueue for "b.mp3" does not.
//!             Ok(())
//!         })
//!         .await;
//!     assert!(result.is_ok());
//! }
//! ```

mod queue;

pub use queue::WriteQueue;
