//! # lzindex: Sliding-Window Suffix Trie Matching Engine
//!
//! This crate provides the matching and indexing core of an LZ77-family
//! byte-stream compressor: given a sliding window of recently committed
//! bytes and a buffer of pending input, it finds the longest back-reference
//! match (including self-overlapping repeats) and incrementally maintains a
//! trie of every suffix currently inside the window as the window slides
//! forward one byte at a time.
//!
//! ## Key Features
//!
//! - **Fixed-capacity ring buffer**: O(1) circular FIFO with random-offset
//!   peek and update, no reallocation ever
//! - **Arena-backed suffix trie**: nodes addressed by generational handles,
//!   so stale references fail loudly instead of aliasing recycled memory
//! - **Incremental window maintenance**: one trie growth pass per committed
//!   byte, FIFO eviction of the oldest suffix once the window is full
//! - **Self-overlap extension**: a stored pattern matches arbitrarily long
//!   runs of itself, the classic LZ77 run trick
//!
//! ## Quick Start
//!
//! ```rust
//! use lzindex::{ByteSource, SliceSource, SuffixTrieIndex};
//!
//! let mut index = SuffixTrieIndex::with_params(16, 8)?;
//!
//! // Commit some history one literal at a time.
//! for &byte in b"abc" {
//!     index.add_to_match(byte)?;
//!     index.advance()?;
//! }
//!
//! // Match pending input against the stored suffixes, extend through the
//! // self-overlap rule, then commit.
//! let mut pending = SliceSource::new(b"abcabcx");
//! let matched = index.start_new_match(&mut pending)?;
//! let extended = index.extend_match(&mut pending)?;
//! assert_eq!(matched + extended, 6);
//!
//! index.add_to_match(pending.next()?)?;  // trailing literal 'x'
//! index.advance()?;
//! # Ok::<(), lzindex::LzIndexError>(())
//! ```
//!
//! The engine is single-threaded and single-owner: use one index instance
//! per compression stream.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod containers;
pub mod error;
pub mod input;
pub mod trie;

pub use containers::{RingBuffer, RingBufferIter};
pub use error::{LzIndexError, Result};
pub use input::{ByteSource, SliceSource};
pub use trie::{
    EdgeLabel, IndexConfig, LeafQueue, NodeId, SuffixTrieIndex, TrieMap,
    DEFAULT_MAX_MATCH_LENGTH, DEFAULT_WINDOW_SIZE,
};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (logs the version at debug level)
pub fn init() {
    log::debug!("Initializing lzindex v{}", VERSION);
}
