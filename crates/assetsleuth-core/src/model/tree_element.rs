/// A single element of the arena-allocated tree model.
///
/// Elements are stored in a flat `Vec<TreeNode<T>>` owned by the model.
/// Parent-child relationships use indices rather than pointers, so there
/// are no reference cycles and reordering siblings never copies payloads.
use compact_str::CompactString;

/// Depth reserved for the single virtual root.
pub const ROOT_DEPTH: i32 = -1;

/// Id conventionally given to the virtual root.
pub const ROOT_ID: i32 = 0;

/// Lightweight index into the arena `Vec<TreeNode<T>>`.
///
/// Uses `u32` to keep nodes small; analysis trees never come close to the limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One record of the flat, depth-tagged sequence a tree is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeElement<T> {
    /// Unique within a model.
    pub id: i32,
    /// `-1` for the virtual root, `0` for top-level rows.
    pub depth: i32,
    /// Display label.
    pub name: CompactString,
    /// Kind-specific row data.
    pub data: T,
}

impl<T> TreeElement<T> {
    pub fn new(name: impl Into<CompactString>, depth: i32, id: i32, data: T) -> Self {
        Self {
            id,
            depth,
            name: name.into(),
            data,
        }
    }

    /// The virtual root element, id [`ROOT_ID`].
    pub fn root(data: T) -> Self {
        Self::new("Root", ROOT_DEPTH, ROOT_ID, data)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth == ROOT_DEPTH
    }
}

/// An element placed in the arena, with its navigation links.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub element: TreeElement<T>,

    /// Index of the parent node. `None` only for the root.
    /// Navigation only; the parent's `children` list owns the ordering.
    pub parent: Option<NodeIndex>,

    /// Direct children in display order.
    pub children: Vec<NodeIndex>,
}

impl<T> TreeNode<T> {
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
