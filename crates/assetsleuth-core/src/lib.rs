/// AssetSleuth Core: dependency resolution, build-report parsing, and the
/// sortable tree model shared by every analysis.
///
/// All analysis logic lives here with no UI dependencies; a frontend only
/// parses input and renders the snapshots a [`analysis::Session`] holds.
///
/// # Modules
///
/// - [`model`]: Arena-allocated tree model, sortable view, and row schemas.
/// - [`resolver`]: Transitive dependency resolution from build scenes and `Resources` folders.
/// - [`project`]: Filesystem-backed project environment (asset index, `.meta` GUIDs, build scenes).
/// - [`report`]: Build-report extraction from the editor log.
/// - [`export`]: WebGL export settings audit over `ProjectSettings/`.
/// - [`analysis`]: Analysis runners and the caller-owned [`analysis::Session`].
/// - [`config`]: Versioned analyser configuration.
/// - [`error`]: Error types for every fallible operation.
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod project;
pub mod report;
pub mod resolver;
