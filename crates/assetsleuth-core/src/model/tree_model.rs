/// Arena-backed tree model rebuilt from a flat, depth-tagged row sequence.
///
/// All nodes live in a single `Vec<TreeNode<T>>`. Relationships between
/// nodes use `NodeIndex` (a thin `u32` wrapper) rather than heap pointers,
/// and an id table gives O(1) lookup by element id.
use super::tree_element::{NodeIndex, TreeElement, TreeNode, ROOT_DEPTH};
use std::collections::HashMap;

/// A hierarchy of [`TreeElement`]s under a single virtual root.
#[derive(Debug, Clone)]
pub struct TreeModel<T> {
    /// Arena. The root is always at index 0.
    nodes: Vec<TreeNode<T>>,
    /// Element id -> arena slot.
    ids: HashMap<i32, NodeIndex>,
}

impl<T> TreeModel<T> {
    /// Reconstruct parent/child links from rows in canonical pre-order.
    ///
    /// The first row must be the root (depth `-1`). Each later row at depth
    /// `d` becomes the last child of the most recent row seen at depth
    /// `d - 1`, tracked in a depth-indexed table, so the whole build is a
    /// single linear pass with no recursion.
    ///
    /// # Panics
    ///
    /// On an invalid sequence: empty input, a first row that is not the
    /// root, a second root, a depth jump greater than +1 (a row before its
    /// parent), or a duplicate id. These are caller bugs, not data errors.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = TreeElement<T>>,
    {
        let mut rows = rows.into_iter();
        let Some(root) = rows.next() else {
            panic!("tree rows must start with the root element");
        };
        assert_eq!(
            root.depth, ROOT_DEPTH,
            "first tree row must be the root (depth {ROOT_DEPTH})"
        );

        let (lower, _) = rows.size_hint();
        let mut model = Self {
            nodes: Vec::with_capacity(lower + 1),
            ids: HashMap::with_capacity(lower + 1),
        };
        let root_idx = model.push(root, None);

        // latest[d + 1] is the most recent node at depth d; latest[0] is the root.
        let mut latest: Vec<NodeIndex> = vec![root_idx];

        for element in rows {
            let depth = element.depth;
            assert!(
                depth >= 0,
                "row {} has depth {depth}; only the first row may be the root",
                element.id
            );
            // The parent lives at depth - 1, i.e. slot `depth`.
            let slot = depth as usize;
            assert!(
                slot < latest.len(),
                "row {} at depth {depth} has no preceding parent at depth {}",
                element.id,
                depth - 1
            );
            let parent = latest[slot];
            let idx = model.push(element, Some(parent));
            model.nodes[parent.idx()].children.push(idx);

            // Anything deeper than this row belongs to a closed branch.
            latest.truncate(slot + 1);
            latest.push(idx);
        }

        model
    }

    fn push(&mut self, element: TreeElement<T>, parent: Option<NodeIndex>) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        let previous = self.ids.insert(element.id, idx);
        assert!(
            previous.is_none(),
            "duplicate tree element id {}",
            element.id
        );
        self.nodes.push(TreeNode {
            element,
            parent,
            children: Vec::new(),
        });
        idx
    }

    /// The virtual root.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Look up an element by id.
    pub fn find(&self, id: i32) -> Option<&TreeElement<T>> {
        self.index_of(id).map(|idx| &self.nodes[idx.idx()].element)
    }

    /// Arena slot of the element with this id.
    #[inline]
    pub fn index_of(&self, id: i32) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode<T> {
        &self.nodes[index.idx()]
    }

    /// Get the element at the given index.
    #[inline]
    pub fn element(&self, index: NodeIndex) -> &TreeElement<T> {
        &self.nodes[index.idx()].element
    }

    /// Direct children of a node, in current order.
    #[inline]
    pub fn children(&self, parent: NodeIndex) -> &[NodeIndex] {
        &self.nodes[parent.idx()].children
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index.idx()].parent
    }

    /// Mutable child list, for reordering siblings in place.
    #[inline]
    pub(crate) fn children_mut(&mut self, parent: NodeIndex) -> &mut Vec<NodeIndex> {
        &mut self.nodes[parent.idx()].children
    }

    /// Canonical pre-order traversal including the root: visit a node, then
    /// each child in current order, depth-first.
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            // Push in reverse so the first child is visited first.
            stack.extend(self.children(idx).iter().rev().copied());
        }
        order
    }

    /// Display rows: the pre-order traversal without the virtual root.
    pub fn rows(&self) -> Vec<NodeIndex> {
        let mut order = self.preorder();
        order.remove(0);
        order
    }

    /// Reproduce the flat row sequence in canonical pre-order.
    ///
    /// Feeding the result back into [`TreeModel::build`] yields a model equal
    /// to this one.
    pub fn flatten(&self) -> Vec<TreeElement<T>>
    where
        T: Clone,
    {
        self.preorder()
            .into_iter()
            .map(|idx| self.element(idx).clone())
            .collect()
    }

    /// Total number of elements, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the model holds nothing but the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// Structural equality: same ids, depths, payloads, and per-parent child
/// order. Arena layout is irrelevant.
impl<T: PartialEq> PartialEq for TreeModel<T> {
    fn eq(&self, other: &Self) -> bool {
        let ours = self.preorder();
        let theirs = other.preorder();
        ours.len() == theirs.len()
            && ours
                .iter()
                .zip(theirs.iter())
                .all(|(&a, &b)| self.element(a) == other.element(b))
    }
}
