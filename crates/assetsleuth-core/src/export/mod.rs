/// WebGL export settings audit.
///
/// Reads the player settings in `ProjectSettings/ProjectSettings.asset` and
/// the graphics settings in `ProjectSettings/GraphicsSettings.asset` and
/// reports each recommended setting as OK or FAIL, plus advisory INFO lines.
/// A check whose key is absent from the file (an editor version without that
/// setting) is left out of the report.
pub mod settings;

use crate::error::ProjectError;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const PLAYER_SETTINGS: &str = "ProjectSettings/ProjectSettings.asset";
const GRAPHICS_SETTINGS: &str = "ProjectSettings/GraphicsSettings.asset";

/// One audited export setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportCheck {
    BrotliCompression,
    NameFilesAsHashes,
    ExceptionSupport,
    StripEngineCode,
    PreloadedShaders,
    RenderPipeline,
}

impl ExportCheck {
    pub fn label(self) -> &'static str {
        match self {
            Self::BrotliCompression => "Brotli compression",
            Self::NameFilesAsHashes => "Name files as hashes",
            Self::ExceptionSupport => "Exception support",
            Self::StripEngineCode => "Strip engine code",
            Self::PreloadedShaders => "Preloaded shaders",
            Self::RenderPipeline => "Render pipeline",
        }
    }

    /// Stable machine-readable name.
    pub fn id(self) -> &'static str {
        match self {
            Self::BrotliCompression => "brotli-compression",
            Self::NameFilesAsHashes => "name-files-as-hashes",
            Self::ExceptionSupport => "exception-support",
            Self::StripEngineCode => "strip-engine-code",
            Self::PreloadedShaders => "preloaded-shaders",
            Self::RenderPipeline => "render-pipeline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The setting has the recommended value.
    Ok,
    /// The setting should be changed.
    Fail,
    /// Advice that does not fail the audit.
    Info,
}

impl CheckStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
            Self::Info => "INFO",
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFinding {
    pub check: ExportCheck,
    pub status: CheckStatus,
    /// Current value and, when it fails, what it should be.
    pub detail: String,
}

/// Every check that could be evaluated, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub findings: Vec<ExportFinding>,
}

impl ExportReport {
    /// `true` if no check failed.
    pub fn passed(&self) -> bool {
        self.findings.iter().all(|f| f.status != CheckStatus::Fail)
    }

    pub fn status_of(&self, check: ExportCheck) -> Option<CheckStatus> {
        self.findings
            .iter()
            .find(|f| f.check == check)
            .map(|f| f.status)
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }

    fn push(&mut self, check: ExportCheck, status: CheckStatus, detail: impl Into<String>) {
        self.findings.push(ExportFinding {
            check,
            status,
            detail: detail.into(),
        });
    }
}

/// Audit the export settings of the project rooted at `root`.
///
/// The player settings file is required. A missing graphics settings file
/// only drops the graphics checks.
pub fn audit_export_settings(root: &Path) -> Result<ExportReport, ProjectError> {
    if !root.join("Assets").is_dir() {
        return Err(ProjectError::NotAProject {
            path: root.to_path_buf(),
        });
    }

    let player_path = root.join(PLAYER_SETTINGS);
    let player = fs::read_to_string(&player_path).map_err(|source| ProjectError::Io {
        path: player_path.clone(),
        source,
    })?;

    let graphics_path = root.join(GRAPHICS_SETTINGS);
    let graphics = match fs::read_to_string(&graphics_path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %graphics_path.display(), error = %e, "Graphics settings unreadable; skipping graphics checks");
            None
        }
    };

    let report = audit_settings_text(&player, graphics.as_deref());
    info!(
        ok = report.count(CheckStatus::Ok),
        failed = report.count(CheckStatus::Fail),
        info = report.count(CheckStatus::Info),
        "Export settings audited"
    );
    Ok(report)
}

/// Evaluate every check against the raw settings text.
pub fn audit_settings_text(player: &str, graphics: Option<&str>) -> ExportReport {
    let mut report = ExportReport::default();

    match settings::int_value(player, "webGLCompressionFormat") {
        Some(0) => report.push(ExportCheck::BrotliCompression, CheckStatus::Ok, "Brotli"),
        Some(format) => report.push(
            ExportCheck::BrotliCompression,
            CheckStatus::Fail,
            format!("{}; use Brotli", compression_name(format)),
        ),
        None => skipped(ExportCheck::BrotliCompression),
    }

    match settings::int_value(player, "webGLNameFilesAsHashes") {
        Some(1) => report.push(ExportCheck::NameFilesAsHashes, CheckStatus::Ok, "enabled"),
        Some(_) => report.push(
            ExportCheck::NameFilesAsHashes,
            CheckStatus::Fail,
            "disabled; enable it",
        ),
        None => skipped(ExportCheck::NameFilesAsHashes),
    }

    match settings::int_value(player, "webGLExceptionSupport") {
        Some(1) => report.push(
            ExportCheck::ExceptionSupport,
            CheckStatus::Ok,
            exception_name(1),
        ),
        Some(mode) => report.push(
            ExportCheck::ExceptionSupport,
            CheckStatus::Fail,
            format!("{}; use {}", exception_name(mode), exception_name(1)),
        ),
        None => skipped(ExportCheck::ExceptionSupport),
    }

    match settings::int_value(player, "stripEngineCode") {
        Some(1) => report.push(ExportCheck::StripEngineCode, CheckStatus::Ok, "enabled"),
        Some(_) => report.push(
            ExportCheck::StripEngineCode,
            CheckStatus::Fail,
            "disabled; enable it",
        ),
        None => skipped(ExportCheck::StripEngineCode),
    }

    let Some(graphics) = graphics else {
        return report;
    };

    match settings::sequence_len(graphics, "m_PreloadedShaders") {
        Some(0) => report.push(ExportCheck::PreloadedShaders, CheckStatus::Ok, "none"),
        Some(n) => report.push(
            ExportCheck::PreloadedShaders,
            CheckStatus::Info,
            format!("{n} shader(s) preloaded; preloading increases the initial load time"),
        ),
        None => skipped(ExportCheck::PreloadedShaders),
    }

    match settings::scalar(graphics, "m_CustomRenderPipeline") {
        Some(value) if settings::is_reference_set(value) => report.push(
            ExportCheck::RenderPipeline,
            CheckStatus::Info,
            "scriptable render pipeline set; check that expensive post-processing is off",
        ),
        Some(_) => report.push(ExportCheck::RenderPipeline, CheckStatus::Ok, "built-in"),
        None => skipped(ExportCheck::RenderPipeline),
    }

    report
}

fn skipped(check: ExportCheck) {
    debug!(check = check.id(), "Setting not present; check skipped");
}

fn compression_name(format: i64) -> String {
    match format {
        0 => "Brotli".to_string(),
        1 => "Gzip".to_string(),
        2 => "Disabled".to_string(),
        other => format!("unknown format {other}"),
    }
}

fn exception_name(mode: i64) -> String {
    match mode {
        0 => "None".to_string(),
        1 => "Explicitly thrown exceptions only".to_string(),
        2 => "Full without stacktrace".to_string(),
        3 => "Full with stacktrace".to_string(),
        other => format!("unknown mode {other}"),
    }
}
