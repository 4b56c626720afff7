//! The block-tree snapshot model.
//!
//! A [`BlockNode`] is one complete fetched copy of the allocator's
//! block tree. The buddy-split invariant — every internal node's two
//! children partition its range into two equal halves — is encoded in
//! the type: a node is either a [`Leaf`](BlockNode::Leaf) or a
//! [`Split`](BlockNode::Split) with both children present. A
//! single-child state is unrepresentable.
//!
//! Snapshots have value semantics on the client. Each fetch replaces
//! the previous snapshot wholesale; nothing here mutates in place.

use crate::path::{NodePath, Side};
use crate::units::format_size_kb;

/// One node of an allocator snapshot.
///
/// Sizes are in the server's base unit (KB). `size_label` is the
/// server-formatted human-readable size; when absent, renderers fall
/// back to [`format_size_kb`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockNode {
    /// An indivisible block, either free or occupied by one process.
    Leaf {
        /// Block size in KB.
        size_kb: u64,
        /// Server-formatted size label, if provided.
        size_label: Option<String>,
        /// Occupying process identifier; `None` iff the block is free.
        occupant: Option<String>,
    },
    /// A block split into two equal buddy halves.
    Split {
        /// Block size in KB (the sum of both children).
        size_kb: u64,
        /// Server-formatted size label, if provided.
        size_label: Option<String>,
        /// Lower half of the address range.
        left: Box<BlockNode>,
        /// Upper half of the address range.
        right: Box<BlockNode>,
    },
}

/// A leaf block flattened out of a snapshot, with its address-range
/// origin relative to the start of memory.
///
/// Leaves tile the root's range exactly: sorted by `start_kb`, their
/// sizes sum to the root size. Produced by [`BlockNode::leaves`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafBlock {
    /// Path identity of the leaf.
    pub path: NodePath,
    /// Offset of the block from the start of memory, in KB.
    pub start_kb: u64,
    /// Block size in KB.
    pub size_kb: u64,
    /// Occupying process, if any.
    pub occupant: Option<String>,
}

impl BlockNode {
    /// A free leaf of the given size.
    pub fn free_leaf(size_kb: u64) -> Self {
        Self::Leaf {
            size_kb,
            size_label: None,
            occupant: None,
        }
    }

    /// A leaf occupied by `process`.
    pub fn occupied_leaf(size_kb: u64, process: impl Into<String>) -> Self {
        Self::Leaf {
            size_kb,
            size_label: None,
            occupant: Some(process.into()),
        }
    }

    /// An internal node over two buddy halves.
    ///
    /// The parent size is taken as the sum of the children, matching
    /// the buddy-split invariant.
    pub fn split(left: BlockNode, right: BlockNode) -> Self {
        Self::Split {
            size_kb: left.size_kb() + right.size_kb(),
            size_label: None,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Attach a server-formatted size label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf { size_label, .. } | Self::Split { size_label, .. } => {
                *size_label = Some(label.into());
            }
        }
        self
    }

    /// Block size in KB.
    pub fn size_kb(&self) -> u64 {
        match self {
            Self::Leaf { size_kb, .. } | Self::Split { size_kb, .. } => *size_kb,
        }
    }

    /// Server-formatted size label, if provided.
    pub fn size_label(&self) -> Option<&str> {
        match self {
            Self::Leaf { size_label, .. } | Self::Split { size_label, .. } => {
                size_label.as_deref()
            }
        }
    }

    /// The label to render: the server's if present, else the KB size
    /// formatted with the largest exact unit.
    pub fn display_label(&self) -> String {
        match self.size_label() {
            Some(label) => label.to_owned(),
            None => format_size_kb(self.size_kb()),
        }
    }

    /// Occupying process of a leaf; always `None` for splits.
    pub fn occupant(&self) -> Option<&str> {
        match self {
            Self::Leaf { occupant, .. } => occupant.as_deref(),
            Self::Split { .. } => None,
        }
    }

    /// Whether the node holds no process.
    ///
    /// Splits report `true`: occupancy lives only at the leaves, and
    /// the service renders internal nodes as free.
    pub fn is_free(&self) -> bool {
        self.occupant().is_none()
    }

    /// Whether the node is an indivisible leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// The two children of a split, or `None` for a leaf.
    pub fn children(&self) -> Option<(&BlockNode, &BlockNode)> {
        match self {
            Self::Leaf { .. } => None,
            Self::Split { left, right, .. } => Some((left, right)),
        }
    }

    /// Total nodes in the tree (splits and leaves).
    pub fn node_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((l, r)) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((l, r)) => l.leaf_count() + r.leaf_count(),
        }
    }

    /// Maximum depth below this node; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 0,
            Some((l, r)) => 1 + l.depth().max(r.depth()),
        }
    }

    /// KB occupied by processes.
    pub fn used_kb(&self) -> u64 {
        match self {
            Self::Leaf { size_kb, occupant, .. } => {
                if occupant.is_some() {
                    *size_kb
                } else {
                    0
                }
            }
            Self::Split { left, right, .. } => left.used_kb() + right.used_kb(),
        }
    }

    /// KB not occupied by any process.
    pub fn free_kb(&self) -> u64 {
        self.size_kb() - self.used_kb()
    }

    /// Whether any leaf is occupied by the named process.
    pub fn contains_occupant(&self, process: &str) -> bool {
        match self {
            Self::Leaf { occupant, .. } => occupant.as_deref() == Some(process),
            Self::Split { left, right, .. } => {
                left.contains_occupant(process) || right.contains_occupant(process)
            }
        }
    }

    /// Active processes with their block sizes, in address order.
    pub fn occupants(&self) -> Vec<(String, u64)> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| leaf.occupant.map(|p| (p, leaf.size_kb)))
            .collect()
    }

    /// Flatten the leaves in address order with their range origins.
    ///
    /// The returned blocks tile `[0, size_kb)` exactly; this is the
    /// input for proportional (fragmentation) rendering.
    ///
    /// # Examples
    ///
    /// ```
    /// use buddyscope_core::BlockNode;
    ///
    /// let tree = BlockNode::split(
    ///     BlockNode::occupied_leaf(512, "P1"),
    ///     BlockNode::free_leaf(512),
    /// );
    /// let leaves = tree.leaves();
    /// assert_eq!(leaves.len(), 2);
    /// assert_eq!(leaves[0].start_kb, 0);
    /// assert_eq!(leaves[1].start_kb, 512);
    /// assert_eq!(leaves[0].occupant.as_deref(), Some("P1"));
    /// ```
    pub fn leaves(&self) -> Vec<LeafBlock> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(NodePath::root(), 0, &mut out);
        out
    }

    fn collect_leaves(&self, path: NodePath, start_kb: u64, out: &mut Vec<LeafBlock>) {
        match self {
            Self::Leaf { size_kb, occupant, .. } => out.push(LeafBlock {
                path,
                start_kb,
                size_kb: *size_kb,
                occupant: occupant.clone(),
            }),
            Self::Split { left, right, .. } => {
                left.collect_leaves(path.child(Side::Left), start_kb, out);
                right.collect_leaves(path.child(Side::Right), start_kb + left.size_kb(), out);
            }
        }
    }
}
