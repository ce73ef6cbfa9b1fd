//! Sliding-window suffix trie matching engine
//!
//! [`SuffixTrieIndex`] maintains a trie of exactly the suffixes of a bounded
//! window of recently committed bytes, plus the empty suffix. A caller finds
//! back-references by matching pending input against the trie
//! ([`SuffixTrieIndex::start_new_match`]), optionally continuing the match
//! against its own just-recorded bytes ([`SuffixTrieIndex::extend_match`],
//! the LZ77 self-overlap rule), and then committing the matched bytes
//! ([`SuffixTrieIndex::advance`]), which slides the window forward one byte
//! at a time, growing every suffix and evicting the oldest one whenever the
//! window is full.
//!
//! The engine is single-threaded and not reentrant: one logical match
//! (`start_new_match` then `extend_match`/`add_to_match` then `advance`)
//! must complete before the next begins.

use crate::containers::RingBuffer;
use crate::error::{LzIndexError, Result};
use crate::input::ByteSource;
use crate::trie::leaf_queue::LeafQueue;
use crate::trie::map::{EdgeLabel, NodeId, TrieMap};

/// Default window size: 32 KiB, the DEFLATE convention
pub const DEFAULT_WINDOW_SIZE: usize = 32 * 1024;

/// Default maximum match length: 258 bytes, the DEFLATE convention
pub const DEFAULT_MAX_MATCH_LENGTH: usize = 258;

/// Configuration for a [`SuffixTrieIndex`]
///
/// Both sizes must be nonzero; `validate` (called by the constructor)
/// rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Capacity of the sliding window of committed bytes
    pub window_size: usize,
    /// Capacity of the current-match accumulator; one slot is always
    /// reserved for the trailing literal, so matches are bounded by
    /// `max_match_length - 1`
    pub max_match_length: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_match_length: DEFAULT_MAX_MATCH_LENGTH,
        }
    }
}

impl IndexConfig {
    /// Creates a configuration with explicit sizes
    pub fn new(window_size: usize, max_match_length: usize) -> Self {
        Self {
            window_size,
            max_match_length,
        }
    }

    /// Checks that both capacities are usable
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(LzIndexError::configuration("window_size must be > 0"));
        }
        if self.max_match_length == 0 {
            return Err(LzIndexError::configuration("max_match_length must be > 0"));
        }
        Ok(())
    }
}

/// Dynamic suffix trie bounded by a sliding window
///
/// # Examples
///
/// ```rust
/// use lzindex::{IndexConfig, SliceSource, SuffixTrieIndex};
///
/// let mut index = SuffixTrieIndex::new(IndexConfig::new(4, 3))?;
///
/// // Nothing committed yet: only the empty suffix is stored.
/// assert_eq!(index.suffix_count(), 1);
///
/// // Commit "ab" one literal at a time.
/// for &b in b"ab" {
///     index.add_to_match(b)?;
///     index.advance()?;
/// }
///
/// // "ab" is now a stored suffix and matches completely.
/// let mut pending = SliceSource::new(b"ab");
/// assert_eq!(index.start_new_match(&mut pending)?, 2);
/// # Ok::<(), lzindex::LzIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SuffixTrieIndex {
    /// Suffix storage: one terminator-marked path per live suffix
    trie: TrieMap<bool>,
    /// Most recently committed bytes, oldest at the front
    window: RingBuffer<u8>,
    /// Bytes tentatively matched but not yet committed
    current_match: RingBuffer<u8>,
    /// Every current leaf, in creation order; front = longest suffix
    leaves: LeafQueue,
    /// Node reached by the most recent `start_new_match` descent
    last_matched: NodeId,
    /// Number of suffixes stored, the empty suffix included
    size: usize,
}

impl SuffixTrieIndex {
    /// Creates an index from a validated configuration
    ///
    /// The fresh index stores exactly the empty suffix.
    ///
    /// # Errors
    ///
    /// Returns `LzIndexError::Configuration` if either size is zero.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;

        let mut trie = TrieMap::new();
        let root = trie.root();
        let terminator = trie.ensure_child(root, EdgeLabel::Terminator)?;
        trie.set_value(terminator, Some(true))?;

        let mut leaves = LeafQueue::new();
        leaves.push_back(root);

        log::debug!(
            "created suffix trie index (window={}, max_match={})",
            config.window_size,
            config.max_match_length
        );

        Ok(Self {
            trie,
            window: RingBuffer::with_capacity(config.window_size)?,
            current_match: RingBuffer::with_capacity(config.max_match_length)?,
            leaves,
            last_matched: root,
            size: 1,
        })
    }

    /// Convenience constructor from raw sizes
    pub fn with_params(window_size: usize, max_match_length: usize) -> Result<Self> {
        Self::new(IndexConfig::new(window_size, max_match_length))
    }

    /// Number of suffixes currently stored, the empty suffix included
    #[inline]
    pub fn suffix_count(&self) -> usize {
        self.size
    }

    /// Number of leaves tracked by the queue; always equals `suffix_count`
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of committed bytes currently inside the window
    #[inline]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Committed window contents, oldest byte first
    pub fn window_contents(&self) -> Vec<u8> {
        self.window.iter().copied().collect()
    }

    /// Number of bytes accumulated in the current match
    #[inline]
    pub fn match_len(&self) -> usize {
        self.current_match.len()
    }

    /// Returns true if `key` is one of the stored suffixes
    pub fn contains_suffix(&self, key: &[u8]) -> Result<bool> {
        self.trie.contains_key(key)
    }

    /// One slot of the accumulator is reserved for the trailing literal
    #[inline]
    fn match_has_room(&self) -> bool {
        self.current_match.len() < self.current_match.capacity() - 1
    }

    /// Gives `node` a terminator child, marking it as the end of a suffix
    fn make_leaf(&mut self, node: NodeId) -> Result<()> {
        let terminator = self.trie.ensure_child(node, EdgeLabel::Terminator)?;
        self.trie.set_value(terminator, Some(true))?;
        Ok(())
    }

    /// Matches a prefix of `buffer` against the stored suffixes
    ///
    /// Resets the match cursor to the root, then descends while the
    /// accumulator has room (one slot stays reserved for a trailing
    /// literal), the buffer has pending bytes, and the trie has a child for
    /// the next byte. Each matched byte is consumed from `buffer` and
    /// appended to the current match.
    ///
    /// Returns the total number of bytes now accumulated if the descent
    /// landed on a recorded suffix boundary (a complete match), and 0 for a
    /// partial match. The trie itself is never mutated, and no byte is
    /// consumed beyond the matched prefix.
    pub fn start_new_match(&mut self, buffer: &mut dyn ByteSource) -> Result<usize> {
        self.last_matched = self.trie.root();

        while self.match_has_room() && buffer.has_pending() {
            let pending = buffer.peek()?;
            let Some(child) = self.trie.child(self.last_matched, EdgeLabel::Byte(pending))?
            else {
                break;
            };

            let matched = buffer.next()?;
            self.current_match.push_back(matched)?;
            self.last_matched = child;
        }

        if self.trie.has_child(self.last_matched, EdgeLabel::Terminator)? {
            Ok(self.current_match.len())
        } else {
            Ok(0)
        }
    }

    /// Continues the current match against its own recorded bytes
    ///
    /// LZ77 self-overlap: the bytes just matched will be inside the window
    /// once committed, so the pending input may keep matching against the
    /// accumulator itself, cyclically. While there is room, the buffer has
    /// pending bytes, and the next pending byte equals the accumulated byte
    /// `k` positions from the front (`k` counts this call's matches), the
    /// byte is consumed and appended. A stored `"abc"` can this way cover an
    /// arbitrarily long `"abcabcabc…"` run.
    ///
    /// Returns the number of additional bytes matched by this call; 0 when
    /// nothing has been accumulated yet.
    pub fn extend_match(&mut self, buffer: &mut dyn ByteSource) -> Result<usize> {
        let mut matched = 0;
        while self.match_has_room()
            && buffer.has_pending()
            && matched < self.current_match.len()
            && *self.current_match.get(matched)? == buffer.peek()?
        {
            let byte = buffer.next()?;
            self.current_match.push_back(byte)?;
            matched += 1;
        }
        Ok(matched)
    }

    /// Appends the trailing literal byte to the current match
    ///
    /// This is the one operation allowed to fill the reserved slot. If the
    /// accumulator is already completely full the byte is silently ignored,
    /// per the matching contract. Never touches the match cursor.
    pub fn add_to_match(&mut self, byte: u8) -> Result<()> {
        if self.current_match.is_full() {
            return Ok(());
        }
        self.current_match.push_back(byte)
    }

    /// Returns an independent copy of the current match contents
    ///
    /// Mutating the returned vector has no effect on the engine.
    pub fn match_snapshot(&self) -> Vec<u8> {
        self.current_match.iter().copied().collect()
    }

    /// Steps from the last matched node to the nearest recorded suffix end
    ///
    /// Follows the smallest-labeled child at every node (the choice is
    /// arbitrary by contract; only the path length matters, and the
    /// smallest-first rule keeps it deterministic) until reaching a node
    /// with a terminator child. Returns the number of steps, 0 on a fresh
    /// index or right after a complete match.
    pub fn distance_to_leaf(&self) -> Result<usize> {
        let mut current = self.last_matched;
        let mut distance = 0;

        while !self.trie.has_child(current, EdgeLabel::Terminator)? {
            let (_, child) = self
                .trie
                .first_child(current)?
                .ok_or_else(|| LzIndexError::trie("interior node with no children"))?;
            current = child;
            distance += 1;
        }
        Ok(distance)
    }

    /// Commits the current match into the window and the trie
    ///
    /// Drains the accumulator byte by byte. For every byte: slide the
    /// window (evicting the oldest suffix first if the window is full),
    /// extend every stored suffix by the byte, then re-insert the empty
    /// suffix. Across one call, `suffix_count` grows by the number of
    /// committed bytes minus one per eviction.
    pub fn advance(&mut self) -> Result<()> {
        while !self.current_match.is_empty() {
            let byte = self.current_match.pop_front()?;

            self.slide_window(byte)?;
            self.grow_leaves(byte)?;

            // Keep the empty suffix alive
            let root = self.trie.root();
            self.make_leaf(root)?;
            self.leaves.push_back(root);
            self.size += 1;
        }

        // Handles into the mutated tree are meaningless until the next match
        self.last_matched = self.trie.root();
        Ok(())
    }

    /// Slides one byte into the window, evicting the oldest suffix if full
    fn slide_window(&mut self, byte: u8) -> Result<()> {
        if self.window.is_full() {
            // Invariant: the front of the leaf queue ends the longest
            // stored suffix, whose key is exactly the window contents.
            let evicted = self
                .leaves
                .pop_front()
                .ok_or(LzIndexError::empty_collection("pop_front"))?;

            self.trie.remove_child(evicted, EdgeLabel::Terminator)?;
            self.trie.set_value(evicted, Some(true))?;

            let key = self.window_contents();

            #[cfg(debug_assertions)]
            {
                let landing = self.trie.lookup_node(&key)?;
                debug_assert_eq!(
                    landing,
                    Some(evicted),
                    "window contents must spell the path to the evicted leaf"
                );
            }

            let removed = self.trie.remove_key(&key)?;
            debug_assert!(removed.is_some(), "evicted suffix must carry its marker");

            self.window.pop_front()?;
            self.size -= 1;
        }

        self.window.push_back(byte)
    }

    /// Extends every stored suffix by one committed byte
    ///
    /// Only the leaves present before this commit are processed; the count
    /// is snapshotted up front because each iteration enqueues the freshly
    /// created leaf at the back.
    fn grow_leaves(&mut self, byte: u8) -> Result<()> {
        let count = self.leaves.len();
        for _ in 0..count {
            let leaf = self
                .leaves
                .pop_front()
                .ok_or(LzIndexError::empty_collection("pop_front"))?;

            // Demote: the node stops being a suffix end
            self.trie.remove_child(leaf, EdgeLabel::Terminator)?;
            self.trie.set_value(leaf, None)?;

            let child = self.trie.ensure_child(leaf, EdgeLabel::Byte(byte))?;
            self.make_leaf(child)?;
            self.leaves.push_back(child);
        }
        Ok(())
    }

    /// Resets the index to its just-constructed state
    ///
    /// Afterwards only the empty suffix is stored and all previously issued
    /// node handles are stale.
    pub fn clear(&mut self) -> Result<()> {
        self.trie.clear();
        self.window.clear();
        self.current_match.clear();
        self.leaves.clear();

        let root = self.trie.root();
        self.make_leaf(root)?;
        self.leaves.push_back(root);
        self.last_matched = root;
        self.size = 1;

        log::debug!("suffix trie index cleared");
        Ok(())
    }
}
