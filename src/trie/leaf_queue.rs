//! Insertion-ordered FIFO of trie leaf handles
//!
//! Leaves are enqueued in creation order, and the engine only ever extends
//! or replaces them in that same order. The consequence the engine relies
//! on: the front of the queue is always the leaf terminating the longest
//! live suffix, so eviction of the oldest suffix is a single `pop_front`.

use crate::trie::map::NodeId;
use std::collections::VecDeque;

/// Unbounded FIFO of non-owning trie leaf handles
#[derive(Debug, Clone, Default)]
pub struct LeafQueue {
    inner: VecDeque<NodeId>,
}

impl LeafQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enqueued leaf handles
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no leaves are enqueued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Enqueues a leaf handle at the back
    pub fn push_back(&mut self, leaf: NodeId) {
        self.inner.push_back(leaf);
    }

    /// Dequeues the oldest leaf handle
    pub fn pop_front(&mut self) -> Option<NodeId> {
        self.inner.pop_front()
    }

    /// The oldest leaf handle without dequeuing it
    pub fn front(&self) -> Option<NodeId> {
        self.inner.front().copied()
    }

    /// Discards all enqueued handles
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
