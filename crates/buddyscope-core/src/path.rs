//! Path-encoded node identities.
//!
//! A [`NodePath`] names a node by the left/right turns taken from the
//! root. The encoding is stable across re-layouts of the same tree
//! shape, which lets transition and animation layers track node
//! identity across snapshot updates and lets renderers find a node's
//! parent for edge drawing.

use smallvec::SmallVec;
use std::fmt;

/// Which buddy a child is within its split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The lower half of the parent's address range.
    Left,
    /// The upper half of the parent's address range.
    Right,
}

impl Side {
    /// Single-character suffix used in the display form.
    pub fn as_char(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

/// Path from the root to a node: the sequence of sides taken.
///
/// Displays as `"0"` for the root with one `L`/`R` appended per level,
/// e.g. `"0RL"` for root → right child → left child. Inline storage
/// covers trees up to 16 levels deep without heap allocation; deeper
/// paths spill transparently.
///
/// # Examples
///
/// ```
/// use buddyscope_core::{NodePath, Side};
///
/// let root = NodePath::root();
/// let child = root.child(Side::Right).child(Side::Left);
/// assert_eq!(child.to_string(), "0RL");
/// assert_eq!(child.depth(), 2);
/// assert_eq!(child.parent(), Some(root.child(Side::Right)));
/// assert_eq!(root.parent(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(SmallVec<[Side; 16]>);

impl NodePath {
    /// The root path (no turns taken).
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// The path of this node's child on the given side.
    pub fn child(&self, side: Side) -> Self {
        let mut segments = self.0.clone();
        segments.push(side);
        Self(segments)
    }

    /// The parent's path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        let mut segments = self.0.clone();
        segments.pop();
        Some(Self(segments))
    }

    /// Number of turns from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The sides taken from the root, in order.
    pub fn segments(&self) -> &[Side] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0")?;
        for side in &self.0 {
            write!(f, "{}", side.as_char())?;
        }
        Ok(())
    }
}
