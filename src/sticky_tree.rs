use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use core::cell::OnceCell as Memo;
#[cfg(feature = "std")]
use std::sync::OnceLock as Memo;

use crate::key::{EntryId, IdMap};
use crate::{Entry, EntryKey, VirtualizerError};

/// Handle to a node of a [`StickyTree`].
///
/// Only meaningful for the tree that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A sticky group header in the tree.
#[derive(Clone, Debug)]
pub struct StickyNode<K = EntryKey> {
    id: K,
    level: u32,
    entry_index: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    // Position inside the parent's children (or inside the roots).
    sibling_index: usize,
    depth: Memo<usize>,
    subtree_size: Memo<usize>,
    height: Memo<usize>,
}

impl<K> StickyNode<K> {
    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Position of the header entry in the input sequence.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }
}

/// Forest of sticky group headers, nested by `level` in sequence order.
///
/// Nodes live in a flat arena in the order their entries appear, with parent/child links
/// stored as [`NodeId`]s. A header becomes a child of the closest preceding open group with a
/// strictly greater level; a header with no such group starts a new root. Depth, subtree size
/// and height are computed lazily and cached; the tree is rebuilt, never edited.
///
/// With `std` the caches are `OnceLock`s and the tree is `Sync`; without it they are
/// `OnceCell`s and the tree stays on one thread.
#[derive(Clone, Debug)]
pub struct StickyTree<K = EntryKey> {
    nodes: Vec<StickyNode<K>>,
    roots: Vec<NodeId>,
    by_id: IdMap<K, NodeId>,
}

impl<K: EntryId> StickyTree<K> {
    /// Builds the forest from the header entries of `entries`, in one pass.
    ///
    /// Fails with [`VirtualizerError::DuplicateId`] when two headers share an id. Only header
    /// ids are checked here, so a standalone tree does not need a validated sequence;
    /// [`crate::Virtualizer::new`] has already rejected duplicates among all entries.
    pub fn build(entries: &[Entry<K>]) -> Result<Self, VirtualizerError> {
        let mut nodes: Vec<StickyNode<K>> = Vec::new();
        let mut roots = Vec::new();
        let mut by_id = IdMap::new();
        let mut cursor: Option<NodeId> = None;

        for (entry_index, entry) in entries.iter().enumerate() {
            let Some(level) = entry.level else {
                continue;
            };

            let mut parent = cursor;
            while let Some(p) = parent {
                if nodes[p.0].level > level {
                    break;
                }
                parent = nodes[p.0].parent;
            }

            let node = NodeId(nodes.len());
            if let Some(prev) = by_id.insert(entry.id.clone(), node) {
                return Err(VirtualizerError::DuplicateId {
                    first: nodes[prev.0].entry_index,
                    duplicate: entry_index,
                });
            }
            let siblings = match parent {
                Some(p) => &mut nodes[p.0].children,
                None => &mut roots,
            };
            let sibling_index = siblings.len();
            siblings.push(node);

            nodes.push(StickyNode {
                id: entry.id.clone(),
                level,
                entry_index,
                parent,
                children: Vec::new(),
                sibling_index,
                depth: Memo::new(),
                subtree_size: Memo::new(),
                height: Memo::new(),
            });
            cursor = Some(node);
        }

        Ok(Self {
            nodes,
            roots,
            by_id,
        })
    }

    pub fn find_node(&self, id: &K) -> Option<NodeId> {
        self.by_id.get(id).copied()
    }

    /// Returns the ancestors of the header `id`, root first, excluding the header itself.
    ///
    /// Empty when `id` is a root or not a header at all.
    pub fn find_ancestors(&self, id: &K) -> Vec<NodeId> {
        match self.find_node(id) {
            Some(node) => self.ancestors_of(node),
            None => Vec::new(),
        }
    }
}

impl<K> StickyTree<K> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// # Panics
    ///
    /// Panics if `node` belongs to a different tree.
    pub fn node(&self, node: NodeId) -> &StickyNode<K> {
        &self.nodes[node.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &StickyNode<K>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Ancestors of `node`, root first, excluding `node`.
    pub fn ancestors_of(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::with_capacity(self.depth(node));
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.parent(p);
        }
        chain.reverse();
        chain
    }

    fn siblings(&self, node: NodeId) -> &[NodeId] {
        match self.parent(node) {
            Some(p) => &self.nodes[p.0].children,
            None => &self.roots,
        }
    }

    /// The header that ends `node`'s group: its next sibling, or else the next sibling of the
    /// closest ancestor that has one.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = node;
        loop {
            let next = self.nodes[cur.0].sibling_index + 1;
            if let Some(&sibling) = self.siblings(cur).get(next) {
                return Some(sibling);
            }
            cur = self.parent(cur)?;
        }
    }

    /// The previous sibling of `node`, or its parent when `node` is the first child.
    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let n = &self.nodes[node.0];
        match n.sibling_index.checked_sub(1) {
            Some(prev) => self.siblings(node).get(prev).copied(),
            None => n.parent,
        }
    }

    /// Length of the ancestor chain (roots have depth 0).
    pub fn depth(&self, node: NodeId) -> usize {
        let n = &self.nodes[node.0];
        *n.depth.get_or_init(|| match n.parent {
            Some(p) => self.depth(p) + 1,
            None => 0,
        })
    }

    /// Number of headers in the subtree rooted at `node`, including `node`.
    pub fn subtree_size(&self, node: NodeId) -> usize {
        let n = &self.nodes[node.0];
        *n.subtree_size
            .get_or_init(|| 1 + n.children.iter().map(|&c| self.subtree_size(c)).sum::<usize>())
    }

    /// Number of nesting levels below `node` (leaves have height 0).
    pub fn height(&self, node: NodeId) -> usize {
        let n = &self.nodes[node.0];
        *n.height.get_or_init(|| {
            n.children
                .iter()
                .map(|&c| self.height(c) + 1)
                .max()
                .unwrap_or(0)
        })
    }

    /// The header node created for the entry at `entry_index`, if that entry is a header.
    pub fn node_for_entry(&self, entry_index: usize) -> Option<NodeId> {
        self.nodes
            .binary_search_by_key(&entry_index, |n| n.entry_index)
            .ok()
            .map(NodeId)
    }

    /// The closest header strictly before `entry_index` in sequence order.
    pub fn last_header_before(&self, entry_index: usize) -> Option<NodeId> {
        let count = self.nodes.partition_point(|n| n.entry_index < entry_index);
        count.checked_sub(1).map(NodeId)
    }
}
