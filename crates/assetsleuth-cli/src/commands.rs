/// Command dispatch: build a session, run one analysis, print the result.
/// The export audit reads settings files directly and needs no session.
use crate::args::{Cli, Command};
use crate::output::{write_export, write_tree};
use anyhow::{bail, Context, Result};
use assetsleuth_core::analysis::{AnalysisKind, Session};
use assetsleuth_core::config::AnalyzerConfig;
use assetsleuth_core::export::{audit_export_settings, CheckStatus};
use assetsleuth_core::project::{MetaImporterSettings, ProjectIndex};
use assetsleuth_core::resolver::{load_attribute_file, AttributeProvider};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Execute `cli`, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if cli.include_packages {
        config.include_packages = true;
    }

    let (session, kind) = match &cli.command {
        Command::Report { log } => {
            if let Some(log) = log {
                config.editor_log = Some(log.clone());
            }
            (Session::new(config), AnalysisKind::BuildLog)
        }
        Command::Deps {
            project,
            kind,
            attributes,
            platform,
        } => {
            if let Some(platform) = platform {
                config.platform = platform.clone();
            }
            let session = project_session(config, project, attributes.as_deref())?;
            (session, kind.analysis_kind())
        }
        Command::Export { project } => return run_export(cli, project, out),
    };

    let snapshot = session
        .run(kind)
        .with_context(|| format!("{} analysis failed", kind.label()))?;

    let snapshot = match &cli.output.sort {
        Some(column) => {
            debug!(column = %column, descending = cli.output.desc, "Sorting results");
            session.sort(kind, column, !cli.output.desc)?;
            session
                .snapshot(kind)
                .context("Sorted snapshot disappeared")?
        }
        None => snapshot,
    };

    write_tree(&snapshot.tree, cli.output.format, out)?;
    out.flush()?;
    Ok(())
}

fn run_export(cli: &Cli, project: &Path, out: &mut dyn Write) -> Result<()> {
    if let Some(column) = &cli.output.sort {
        bail!("export results cannot be sorted (got --sort {column})");
    }
    let report = audit_export_settings(project)
        .with_context(|| format!("Failed to audit export settings of {}", project.display()))?;
    if !report.passed() {
        warn!(
            failed = report.count(CheckStatus::Fail),
            "Export settings differ from the recommended values"
        );
    }
    write_export(&report, cli.output.format, out)?;
    out.flush()?;
    Ok(())
}

fn project_session(
    config: AnalyzerConfig,
    root: &Path,
    attributes: Option<&Path>,
) -> Result<Session> {
    let index = ProjectIndex::open(root)
        .with_context(|| format!("Failed to index project {}", root.display()))?;
    if index.error_count() > 0 {
        warn!(
            errors = index.error_count(),
            "Some project files could not be read"
        );
    }

    let provider: Arc<dyn AttributeProvider> = match attributes {
        Some(path) => Arc::new(
            load_attribute_file(path)
                .with_context(|| format!("Failed to load importer settings {}", path.display()))?,
        ),
        None => Arc::new(MetaImporterSettings::new(root)),
    };
    Ok(Session::with_project(config, Arc::new(index), provider))
}
