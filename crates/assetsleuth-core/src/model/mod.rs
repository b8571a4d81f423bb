/// Data model shared by every analysis.
///
/// Re-exports the arena-allocated tree, its sortable view, and the row
/// schemas for each analysis kind.
pub mod attributes;
pub mod columns;
pub mod rows;
pub mod size;
pub mod sortable;
pub mod tree_element;
pub mod tree_model;

pub use rows::{AssetRow, BuildLogRecord, ProjectPath, SizeUnit};
pub use sortable::{SortColumn, SortKey, SortState, SortableTree};
pub use tree_element::{NodeIndex, TreeElement, TreeNode, ROOT_DEPTH, ROOT_ID};
pub use tree_model::TreeModel;
