//! Suffix trie structures
//!
//! This module holds the arena-backed trie map, the leaf bookkeeping queue,
//! and the sliding-window matching engine built on top of them.

pub mod leaf_queue;
pub mod map;
pub mod suffix_index;

pub use leaf_queue::LeafQueue;
pub use map::{EdgeLabel, NodeId, TrieMap};
pub use suffix_index::{
    IndexConfig, SuffixTrieIndex, DEFAULT_MAX_MATCH_LENGTH, DEFAULT_WINDOW_SIZE,
};
