/// Analysis runners, one blocking call per analysis kind.
///
/// Each runner builds a fresh row set from scratch and returns the finished
/// tree; nothing is shared with earlier runs. Cancellation is cooperative:
/// the flag is polled between roots during resolution and between assets
/// while attributes are fetched.
use super::{AnalysisKind, AnalysisTree, BuildLogTree};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, AttributeError, ReportError};
use crate::model::attributes::{AudioAttributes, ModelAttributes, TextureAttributes};
use crate::model::columns::{AudioColumn, ModelColumn, TextureColumn};
use crate::model::{AssetRow, BuildLogRecord, SortColumn, SortableTree, TreeElement, TreeModel};
use crate::report::{read_editor_log, BuildReportParser};
use crate::resolver::{AssetKind, AttributeProvider, DependencyResolver, ProjectEnvironment};
use compact_str::CompactString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Ties an attribute schema to its asset kind, column set and provider call.
pub trait AssetAttributes: Clone + Default + Send + Sync + 'static {
    type Column: SortColumn<AssetRow<Self>>;

    const KIND: AnalysisKind;

    /// Which assets this analysis lists.
    fn asset_kind(config: &AnalyzerConfig) -> AssetKind;

    /// Read this schema's settings for one asset.
    fn fetch(
        provider: &dyn AttributeProvider,
        path: &str,
        platform: &str,
    ) -> Result<Self, AttributeError>;

    fn into_tree(tree: SortableTree<AssetRow<Self>, Self::Column>) -> AnalysisTree;
}

impl AssetAttributes for TextureAttributes {
    type Column = TextureColumn;
    const KIND: AnalysisKind = AnalysisKind::Textures;

    fn asset_kind(_config: &AnalyzerConfig) -> AssetKind {
        AssetKind::textures()
    }

    fn fetch(
        provider: &dyn AttributeProvider,
        path: &str,
        platform: &str,
    ) -> Result<Self, AttributeError> {
        provider.texture(path, platform)
    }

    fn into_tree(tree: SortableTree<AssetRow<Self>, Self::Column>) -> AnalysisTree {
        AnalysisTree::Textures(tree)
    }
}

impl AssetAttributes for AudioAttributes {
    type Column = AudioColumn;
    const KIND: AnalysisKind = AnalysisKind::Audio;

    fn asset_kind(_config: &AnalyzerConfig) -> AssetKind {
        AssetKind::audio()
    }

    fn fetch(
        provider: &dyn AttributeProvider,
        path: &str,
        platform: &str,
    ) -> Result<Self, AttributeError> {
        provider.audio(path, platform)
    }

    fn into_tree(tree: SortableTree<AssetRow<Self>, Self::Column>) -> AnalysisTree {
        AnalysisTree::Audio(tree)
    }
}

impl AssetAttributes for ModelAttributes {
    type Column = ModelColumn;
    const KIND: AnalysisKind = AnalysisKind::Models;

    fn asset_kind(config: &AnalyzerConfig) -> AssetKind {
        AssetKind::models(&config.model_extensions)
    }

    fn fetch(
        provider: &dyn AttributeProvider,
        path: &str,
        platform: &str,
    ) -> Result<Self, AttributeError> {
        provider.model(path, platform)
    }

    fn into_tree(tree: SortableTree<AssetRow<Self>, Self::Column>) -> AnalysisTree {
        AnalysisTree::Models(tree)
    }
}

/// Result of an asset analysis.
#[derive(Debug, Clone)]
pub struct AssetReport<A: AssetAttributes> {
    pub tree: SortableTree<AssetRow<A>, A::Column>,
    /// Paths whose settings could not be read, in resolution order.
    pub skipped: Vec<String>,
}

/// List every shipped asset of `A`'s kind with its importer settings.
///
/// Rows are depth-0 children of a virtual root with ids `1..=n` in sorted
/// path order, so identical inputs give identical trees. An asset whose
/// settings cannot be read is logged and left out; the batch continues.
pub fn analyse_assets<A: AssetAttributes>(
    env: &dyn ProjectEnvironment,
    provider: &dyn AttributeProvider,
    config: &AnalyzerConfig,
    cancel: &AtomicBool,
) -> Result<AssetReport<A>, AnalysisError> {
    let start = Instant::now();
    info!(kind = A::KIND.label(), platform = %config.platform, "Starting analysis");

    let kind = A::asset_kind(config);
    let paths = DependencyResolver::new(env)
        .include_packages(config.include_packages)
        .resolve_until(&kind, || cancel.load(Ordering::Relaxed))
        .ok_or(AnalysisError::Cancelled(A::KIND))?;

    let mut rows = Vec::with_capacity(paths.len() + 1);
    rows.push(TreeElement::root(AssetRow::new("", A::default())));
    let mut skipped = Vec::new();
    let mut next_id: i32 = 0;

    for path in paths {
        if cancel.load(Ordering::Relaxed) {
            info!(kind = A::KIND.label(), "Analysis cancelled");
            return Err(AnalysisError::Cancelled(A::KIND));
        }
        match A::fetch(provider, &path, &config.platform) {
            Ok(attributes) => {
                next_id += 1;
                let row = AssetRow::new(path, attributes);
                let name = CompactString::from(row.file_name());
                rows.push(TreeElement::new(name, 0, next_id, row));
            }
            Err(err) => {
                warn!(path = %path, "Skipping asset: {err}");
                skipped.push(path);
            }
        }
    }

    let tree = SortableTree::new(TreeModel::build(rows));
    info!(
        kind = A::KIND.label(),
        rows = tree.rows().len(),
        skipped = skipped.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Analysis complete"
    );
    Ok(AssetReport { tree, skipped })
}

/// Parse the latest build report out of the configured editor log.
pub fn analyse_build_log(
    config: &AnalyzerConfig,
    cancel: &AtomicBool,
) -> Result<BuildLogTree, AnalysisError> {
    let start = Instant::now();
    let path = config
        .editor_log_path()
        .ok_or(ReportError::NoLogLocation)?;
    info!(log = %path.display(), "Starting build log analysis");

    let text = read_editor_log(&path)?;
    if cancel.load(Ordering::Relaxed) {
        return Err(AnalysisError::Cancelled(AnalysisKind::BuildLog));
    }
    let tree = analyse_build_log_text(&text, config)?;

    info!(
        rows = tree.rows().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Build log analysis complete"
    );
    Ok(tree)
}

/// Build the report tree from log text already in memory.
pub fn analyse_build_log_text(
    text: &str,
    config: &AnalyzerConfig,
) -> Result<BuildLogTree, ReportError> {
    let records = BuildReportParser::new()
        .include_packages(config.include_packages)
        .parse(text)?;

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(TreeElement::root(BuildLogRecord::default()));
    rows.extend(records);
    Ok(SortableTree::new(TreeModel::build(rows)))
}
