//! Arena-backed byte-keyed trie map
//!
//! Nodes live in a slab with generational handles instead of owned child
//! pointers, so auxiliary structures (the leaf queue, the last-matched
//! cursor) can hold references into the tree without aliasing owned data.
//! A freed slot bumps its generation, turning any stale handle into a loud
//! [`LzIndexError::Trie`] instead of silently resolving to a recycled node.
//!
//! Edges are keyed by [`EdgeLabel`]: the 256 byte values plus one reserved
//! terminator label that marks "a key ends here" and can never collide with
//! real data.

use crate::error::{LzIndexError, Result};
use ahash::AHashMap;

/// Edge label in the trie: a real byte or the reserved end-of-key marker
///
/// The derived ordering (`Byte(0) < … < Byte(255) < Terminator`) is used
/// only as an arbitrary-but-deterministic tie-break when a traversal must
/// pick some child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeLabel {
    /// An actual input byte
    Byte(u8),
    /// Reserved marker: the key sequence ends at the parent node
    Terminator,
}

/// Opaque generational handle to a trie node
///
/// Handles stay valid until the node they name is freed; resolving a stale
/// handle is an error, never a silent hit on a recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// A single trie node: labeled edges to children plus an optional value
#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: AHashMap<EdgeLabel, NodeId>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        Self {
            children: AHashMap::new(),
            value: None,
        }
    }
}

/// Arena slot: occupied by a node, or free with a bumped generation
#[derive(Debug, Clone)]
struct Slot<V> {
    generation: u32,
    node: Option<TrieNode<V>>,
}

/// Byte-sequence-keyed trie map over an arena of nodes
///
/// Supports single-step child lookup (including the terminator label),
/// create-or-reuse child insertion, and delete-by-key-sequence with upward
/// pruning of dead branches. The root is always live.
///
/// # Examples
///
/// ```rust
/// use lzindex::{EdgeLabel, TrieMap};
///
/// let mut trie: TrieMap<bool> = TrieMap::new();
/// let root = trie.root();
///
/// let a = trie.ensure_child(root, EdgeLabel::Byte(b'a'))?;
/// trie.ensure_child(a, EdgeLabel::Terminator)?;
/// assert!(trie.contains_key(b"a")?);
/// assert!(!trie.contains_key(b"b")?);
/// # Ok::<(), lzindex::LzIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TrieMap<V> {
    slots: Vec<Slot<V>>,
    free: Vec<u32>,
    root: NodeId,
}

impl<V> TrieMap<V> {
    /// Creates a trie holding only a live root node
    pub fn new() -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(TrieNode::new()),
            }],
            free: Vec::new(),
            root,
        }
    }

    /// Handle of the root node; always valid
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn resolve(&self, id: NodeId) -> Result<&TrieNode<V>> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| LzIndexError::trie("stale or foreign node handle"))
    }

    fn resolve_mut(&mut self, id: NodeId) -> Result<&mut TrieNode<V>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| LzIndexError::trie("stale or foreign node handle"))
    }

    fn alloc(&mut self) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(TrieNode::new());
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(TrieNode::new()),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Frees one slot; the caller guarantees it is detached and childless
    fn release(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index as usize];
        debug_assert_eq!(slot.generation, id.generation);
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    /// Single-step child lookup
    pub fn child(&self, id: NodeId, label: EdgeLabel) -> Result<Option<NodeId>> {
        Ok(self.resolve(id)?.children.get(&label).copied())
    }

    /// Returns true if `id` has a child under `label`
    pub fn has_child(&self, id: NodeId, label: EdgeLabel) -> Result<bool> {
        Ok(self.resolve(id)?.children.contains_key(&label))
    }

    /// Number of outgoing edges from `id`
    pub fn child_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.resolve(id)?.children.len())
    }

    /// Smallest-labeled child of `id`, if any
    ///
    /// Deterministic across runs regardless of hash-map iteration order.
    pub fn first_child(&self, id: NodeId) -> Result<Option<(EdgeLabel, NodeId)>> {
        let node = self.resolve(id)?;
        Ok(node
            .children
            .iter()
            .min_by_key(|(label, _)| **label)
            .map(|(label, child)| (*label, *child)))
    }

    /// Returns the child of `id` under `label`, creating it if absent
    pub fn ensure_child(&mut self, id: NodeId, label: EdgeLabel) -> Result<NodeId> {
        if let Some(existing) = self.child(id, label)? {
            return Ok(existing);
        }

        let child = self.alloc();
        self.resolve_mut(id)?.children.insert(label, child);
        Ok(child)
    }

    /// Detaches and frees the child of `id` under `label`, subtree included
    ///
    /// Returns true if an edge was removed. Any handle into the freed
    /// subtree becomes stale.
    pub fn remove_child(&mut self, id: NodeId, label: EdgeLabel) -> Result<bool> {
        let Some(child) = self.resolve_mut(id)?.children.remove(&label) else {
            return Ok(false);
        };

        let mut pending = vec![child];
        while let Some(next) = pending.pop() {
            let node = self.resolve_mut(next)?;
            pending.extend(node.children.drain().map(|(_, grandchild)| grandchild));
            self.release(next);
        }
        Ok(true)
    }

    /// Value stored at `id`, if any
    pub fn value(&self, id: NodeId) -> Result<Option<&V>> {
        Ok(self.resolve(id)?.value.as_ref())
    }

    /// Replaces the value stored at `id`, returning the previous one
    pub fn set_value(&mut self, id: NodeId, value: Option<V>) -> Result<Option<V>> {
        let node = self.resolve_mut(id)?;
        Ok(std::mem::replace(&mut node.value, value))
    }

    /// Walks `key` byte by byte from the root, returning the landing node
    pub fn lookup_node(&self, key: &[u8]) -> Result<Option<NodeId>> {
        let mut current = self.root;
        for &byte in key {
            match self.child(current, EdgeLabel::Byte(byte))? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Returns true if `key` ends at a node carrying the terminator marker
    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        match self.lookup_node(key)? {
            Some(node) => self.has_child(node, EdgeLabel::Terminator),
            None => Ok(false),
        }
    }

    /// Deletes `key` from the map, pruning the dead branch it leaves behind
    ///
    /// Clears the value at the end of the path, then walks back up releasing
    /// every node left with no children and no value, stopping at the root.
    /// Returns the removed value, or `None` if the path does not exist or
    /// carried no value.
    pub fn remove_key(&mut self, key: &[u8]) -> Result<Option<V>> {
        // Record the descent so the prune pass can walk back up
        let mut path = Vec::with_capacity(key.len());
        let mut current = self.root;
        for &byte in key {
            match self.child(current, EdgeLabel::Byte(byte))? {
                Some(next) => {
                    path.push((current, EdgeLabel::Byte(byte), next));
                    current = next;
                }
                None => return Ok(None),
            }
        }

        let removed = self.set_value(current, None)?;

        for (parent, label, node) in path.into_iter().rev() {
            let entry = self.resolve(node)?;
            if !entry.children.is_empty() || entry.value.is_some() {
                break;
            }
            self.resolve_mut(parent)?.children.remove(&label);
            self.release(node);
        }

        Ok(removed)
    }

    /// Resets the map to a single empty root, invalidating all other handles
    pub fn clear(&mut self) {
        let root_index = self.root.index as usize;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if index == root_index {
                slot.node = Some(TrieNode::new());
            } else if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
    }
}

impl<V> Default for TrieMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
