/// Error types for the AssetSleuth core.
///
/// Per-item failures ([`AttributeError`]) are recoverable: the item is
/// skipped and the batch continues. Everything else aborts only the single
/// analysis that raised it and leaves previous results in place.
use crate::analysis::AnalysisKind;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read importer settings for a single asset.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The provider has no settings for this path.
    #[error("no importer settings available for {path}")]
    Missing { path: String },

    /// The importer exists but could not be read.
    #[error("could not read importer settings for {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Failure to obtain or understand a build report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The log file could not be copied or read.
    #[error("failed to read editor log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable editor log location is known on this machine.
    #[error("could not determine the editor log location; pass it explicitly")]
    NoLogLocation,

    /// The log holds no build report (or the latest one has an unexpected header).
    #[error(
        "no build report found in the editor log; make sure the project was recently built on this machine"
    )]
    NotFound,

    /// The report has no "Used Assets" section.
    #[error("build report has no \"Used Assets and files from the Resources folder\" section")]
    MissingAssetSection,

    /// An asset line did not match the expected grammar.
    #[error("malformed build report line {line_number} ({line:?}): expected `<size> <kb|mb> <percentage>% <path>`")]
    MalformedLine { line_number: usize, line: String },

    /// The asset list ran to the end of the log without its closing dash line.
    #[error("build report asset list is not terminated by a dash line; the log may be truncated")]
    Unterminated,
}

/// Failure to index a project directory.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The directory does not look like a project (no `Assets/` folder).
    #[error("{} is not a project directory (missing Assets/)", path.display())]
    NotAProject { path: PathBuf },

    /// A project file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exported importer-settings file is not valid JSON of the expected shape.
    #[error("invalid importer settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to load an [`AnalyzerConfig`](crate::config::AnalyzerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported config version {found} (this build understands version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Failure of a whole analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Another run of the same kind is still in progress.
    #[error("{} analysis is already running", .0.label())]
    Busy(AnalysisKind),

    /// The run was cancelled before it completed.
    #[error("{} analysis was cancelled", .0.label())]
    Cancelled(AnalysisKind),

    /// An asset analysis was requested on a session without a project.
    #[error("{} analysis needs a project; open one first", .0.label())]
    NoProject(AnalysisKind),

    /// Sorting was requested before the kind produced any results.
    #[error("no {} results to sort yet", .0.label())]
    NoResults(AnalysisKind),

    /// The column name is not part of the kind's column set.
    #[error("{} has no column named {column:?}", kind.label())]
    UnknownColumn { kind: AnalysisKind, column: String },

    /// The background worker thread could not be started.
    #[error("failed to start analysis thread: {0}")]
    Thread(#[source] std::io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}
