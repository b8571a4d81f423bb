/// Analysis runners and the per-kind result snapshots they produce.
///
/// Every analysis kind shares the same pipeline (rows → [`TreeModel`] →
/// [`SortableTree`]); only the row schema and column set differ.
/// [`AnalysisTree`] erases that difference so a [`Session`] can hold one
/// current result per kind.
pub mod runner;
pub mod session;

pub use runner::{
    analyse_assets, analyse_build_log, analyse_build_log_text, AssetAttributes, AssetReport,
};
pub use session::{AnalysisEvent, AnalysisHandle, Session};

use crate::model::attributes::{AudioAttributes, ModelAttributes, TextureAttributes};
use crate::model::columns::{AudioColumn, BuildLogColumn, ModelColumn, TextureColumn};
use crate::model::{AssetRow, BuildLogRecord, ProjectPath, SortColumn, SortableTree, ROOT_ID};
use chrono::{DateTime, Local};

/// One of the four analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Textures,
    Audio,
    Models,
    BuildLog,
}

impl AnalysisKind {
    pub const ALL: [Self; 4] = [Self::Textures, Self::Audio, Self::Models, Self::BuildLog];

    pub fn label(self) -> &'static str {
        match self {
            Self::Textures => "Textures",
            Self::Audio => "Audio",
            Self::Models => "Models",
            Self::BuildLog => "Build log",
        }
    }

    /// Stable machine identifier, e.g. for command-line flags.
    pub fn id(self) -> &'static str {
        match self {
            Self::Textures => "textures",
            Self::Audio => "audio",
            Self::Models => "models",
            Self::BuildLog => "build-log",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Textures => 0,
            Self::Audio => 1,
            Self::Models => 2,
            Self::BuildLog => 3,
        }
    }
}

pub type TextureTree = SortableTree<AssetRow<TextureAttributes>, TextureColumn>;
pub type AudioTree = SortableTree<AssetRow<AudioAttributes>, AudioColumn>;
pub type ModelTree = SortableTree<AssetRow<ModelAttributes>, ModelColumn>;
pub type BuildLogTree = SortableTree<BuildLogRecord, BuildLogColumn>;

/// The sortable result of one analysis, whatever its row schema.
#[derive(Debug, Clone)]
pub enum AnalysisTree {
    Textures(TextureTree),
    Audio(AudioTree),
    Models(ModelTree),
    BuildLog(BuildLogTree),
}

/// Apply the same generic expression to whichever tree is inside.
macro_rules! each_tree {
    ($tree:expr, $t:ident => $body:expr) => {
        match $tree {
            AnalysisTree::Textures($t) => $body,
            AnalysisTree::Audio($t) => $body,
            AnalysisTree::Models($t) => $body,
            AnalysisTree::BuildLog($t) => $body,
        }
    };
}

impl AnalysisTree {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::Textures(_) => AnalysisKind::Textures,
            Self::Audio(_) => AnalysisKind::Audio,
            Self::Models(_) => AnalysisKind::Models,
            Self::BuildLog(_) => AnalysisKind::BuildLog,
        }
    }

    /// Number of display rows (root excluded).
    pub fn len(&self) -> usize {
        each_tree!(self, t => t.rows().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Project path behind row `id`, for "reveal in project".
    ///
    /// The virtual root and unknown ids have no path.
    pub fn path_of(&self, id: i32) -> Option<&str> {
        if id == ROOT_ID {
            return None;
        }
        each_tree!(self, t => t.find(id).map(|e| e.data.project_path()))
    }

    /// Sort by the column whose id or title is `column`.
    ///
    /// Returns `false` (and leaves the order alone) for an unknown column.
    pub fn sort(&mut self, column: &str, ascending: bool) -> bool {
        each_tree!(self, t => sort_named(t, column, ascending))
    }

    /// Active column id and direction, if any.
    pub fn sort_state(&self) -> Option<(&'static str, bool)> {
        each_tree!(self, t => t.sort_state().map(|s| (s.column.id(), s.ascending)))
    }

    /// Re-apply `previous`'s sort so a refresh keeps the user's ordering.
    pub(crate) fn carry_sort_from(&mut self, previous: &AnalysisTree) {
        match (self, previous) {
            (Self::Textures(new), Self::Textures(old)) => new.set_sort_state(old.sort_state()),
            (Self::Audio(new), Self::Audio(old)) => new.set_sort_state(old.sort_state()),
            (Self::Models(new), Self::Models(old)) => new.set_sort_state(old.sort_state()),
            (Self::BuildLog(new), Self::BuildLog(old)) => new.set_sort_state(old.sort_state()),
            _ => {}
        }
    }
}

fn sort_named<T, C: SortColumn<T>>(
    tree: &mut SortableTree<T, C>,
    column: &str,
    ascending: bool,
) -> bool {
    match C::parse(column) {
        Some(c) => {
            tree.sort_by(c, ascending);
            true
        }
        None => false,
    }
}

/// A completed analysis as displayed to the user.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    pub tree: AnalysisTree,
    pub completed_at: DateTime<Local>,
    /// Paths left out because their importer settings could not be read.
    pub skipped: Vec<String>,
}

impl AnalysisSnapshot {
    pub fn kind(&self) -> AnalysisKind {
        self.tree.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildLogRecord, SizeUnit, TreeElement, TreeModel};

    fn build_log_tree(sizes: &[(f64, &str)]) -> AnalysisTree {
        let mut rows = vec![TreeElement::root(BuildLogRecord::default())];
        for (i, (size, path)) in sizes.iter().enumerate() {
            let record = BuildLogRecord {
                size: *size,
                size_unit: SizeUnit::Kb,
                size_percentage: 1.0,
                file_path: path.to_string(),
            };
            rows.push(TreeElement::new(*path, 0, i as i32 + 1, record));
        }
        AnalysisTree::BuildLog(SortableTree::new(TreeModel::build(rows)))
    }

    fn paths(tree: &AnalysisTree) -> Vec<String> {
        let AnalysisTree::BuildLog(t) = tree else {
            panic!("expected a build log tree");
        };
        t.row_elements().map(|e| e.data.file_path.clone()).collect()
    }

    #[test]
    fn path_lookup_by_row_id() {
        let tree = build_log_tree(&[(1.0, "Assets/a.png"), (2.0, "Assets/b.png")]);
        assert_eq!(tree.path_of(2), Some("Assets/b.png"));
        assert_eq!(tree.path_of(ROOT_ID), None);
        assert_eq!(tree.path_of(99), None);
        assert_eq!(tree.kind(), AnalysisKind::BuildLog);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn sort_by_column_name() {
        let mut tree = build_log_tree(&[(1.0, "Assets/a.png"), (2.0, "Assets/b.png")]);
        assert!(tree.sort("size", false));
        assert_eq!(paths(&tree), vec!["Assets/b.png", "Assets/a.png"]);
        assert_eq!(tree.sort_state(), Some(("size", false)));

        assert!(!tree.sort("no-such-column", true));
        assert_eq!(paths(&tree), vec!["Assets/b.png", "Assets/a.png"]);
    }

    #[test]
    fn refresh_keeps_previous_sort() {
        let mut old = build_log_tree(&[(1.0, "Assets/a.png")]);
        old.sort("size", false);
        let mut new = build_log_tree(&[(1.0, "Assets/a.png"), (5.0, "Assets/c.png")]);
        new.carry_sort_from(&old);
        assert_eq!(paths(&new), vec!["Assets/c.png", "Assets/a.png"]);
    }

    #[test]
    fn slots_cover_every_kind() {
        let slots: Vec<usize> = AnalysisKind::ALL.iter().map(|k| k.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);
    }
}
