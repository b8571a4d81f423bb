/// Multi-column sorting over a [`TreeModel`].
///
/// Columns are declared per row schema as an enum implementing
/// [`SortColumn`], which maps each column to a typed [`SortKey`] extractor.
/// Reordering columns in a frontend therefore never changes what a column
/// sorts by.
use super::tree_element::{NodeIndex, TreeElement};
use super::tree_model::TreeModel;
use compact_str::CompactString;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A comparable value extracted from one row for one column.
#[derive(Debug, Clone)]
pub enum SortKey {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Compared ASCII case-insensitively.
    Text(CompactString),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
            // A column always yields one variant; this only keeps the order total.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// The declared column set of one row schema.
pub trait SortColumn<T>: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every column, in default display order.
    fn all() -> &'static [Self];

    /// Header label.
    fn title(self) -> &'static str;

    /// Stable machine identifier (kebab-case), e.g. for command-line flags.
    fn id(self) -> &'static str;

    /// Key this column sorts `element` by.
    fn key(self, element: &TreeElement<T>) -> SortKey;

    /// Display text of this column's cell for `element`.
    fn cell(self, element: &TreeElement<T>) -> String;

    /// Look a column up by [`id`](SortColumn::id) or title, ignoring case.
    fn parse(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(name) || c.title().eq_ignore_ascii_case(name))
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: C,
    pub ascending: bool,
}

/// A tree model plus its current sort and flattened display rows.
#[derive(Debug, Clone)]
pub struct SortableTree<T, C> {
    model: TreeModel<T>,
    sort: Option<SortState<C>>,
    rows: Vec<NodeIndex>,
}

impl<T, C: SortColumn<T>> SortableTree<T, C> {
    /// Wrap a model; rows start in model order with no active column.
    pub fn new(model: TreeModel<T>) -> Self {
        let rows = model.rows();
        Self {
            model,
            sort: None,
            rows,
        }
    }

    #[inline]
    pub fn model(&self) -> &TreeModel<T> {
        &self.model
    }

    /// Flattened display rows (root excluded) in current order.
    #[inline]
    pub fn rows(&self) -> &[NodeIndex] {
        &self.rows
    }

    /// Display rows as elements.
    pub fn row_elements(&self) -> impl Iterator<Item = &TreeElement<T>> + '_ {
        self.rows.iter().map(|&idx| self.model.element(idx))
    }

    #[inline]
    pub fn sort_state(&self) -> Option<SortState<C>> {
        self.sort
    }

    pub fn find(&self, id: i32) -> Option<&TreeElement<T>> {
        self.model.find(id)
    }

    /// Make `column` the active column and reorder.
    pub fn sort_by(&mut self, column: C, ascending: bool) {
        self.set_sort_state(Some(SortState { column, ascending }));
    }

    /// Replace the active sort (or clear it with `None`) and reorder.
    ///
    /// Clearing keeps the current order; it only stops further sorting.
    pub fn set_sort_state(&mut self, sort: Option<SortState<C>>) {
        self.sort = sort;
        self.sort_if_needed();
    }

    /// Stably reorder the root's direct children by the active column.
    ///
    /// Only one level is sorted; nested children keep their order. Rows with
    /// equal keys keep their prior relative order in both directions.
    fn sort_if_needed(&mut self) {
        let Some(SortState { column, ascending }) = self.sort else {
            return;
        };
        let root = self.model.root();
        if self.model.children(root).len() < 2 {
            return;
        }

        // Extract each key once rather than per comparison.
        let mut keyed: Vec<(SortKey, NodeIndex)> = self
            .model
            .children(root)
            .iter()
            .map(|&idx| (column.key(self.model.element(idx)), idx))
            .collect();
        // `sort_by` is stable; reversing the comparator (not the output)
        // keeps ties in their prior order when descending.
        if ascending {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        } else {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        }

        let children = self.model.children_mut(root);
        children.clear();
        children.extend(keyed.into_iter().map(|(_, idx)| idx));

        self.rows = self.model.rows();
    }
}
