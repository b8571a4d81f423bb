/// Command-line arguments.
use assetsleuth_core::analysis::AnalysisKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "assetsleuth",
    version,
    about = "Lists what actually ships in a game build: texture, audio and model settings plus build-report sizes, and audits WebGL export settings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Analyser config file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep assets under Packages/ in the results
    #[arg(long, global = true)]
    pub include_packages: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Size breakdown of the latest build report in the editor log
    Report {
        /// Editor log to read instead of the default location
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Shipped assets of one kind with their importer settings
    Deps {
        /// Project root (the folder holding Assets/)
        #[arg(index = 1)]
        project: PathBuf,

        /// Which assets to list
        #[arg(long, value_enum)]
        kind: AssetKindArg,

        /// Exported importer settings (JSON) to use instead of the .meta files
        #[arg(long)]
        attributes: Option<PathBuf>,

        /// Platform whose importer overrides are reported
        #[arg(long)]
        platform: Option<String>,
    },

    /// Audit the WebGL export settings under ProjectSettings/
    Export {
        /// Project root (the folder holding Assets/)
        #[arg(index = 1)]
        project: PathBuf,
    },
}

/// Output formatting arguments shared across commands
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Column to sort by (id or title, e.g. "size" or "max-size")
    #[arg(long, global = true)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, global = true, requires = "sort")]
    pub desc: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetKindArg {
    Textures,
    Audio,
    Models,
}

impl AssetKindArg {
    pub fn analysis_kind(self) -> AnalysisKind {
        match self {
            Self::Textures => AnalysisKind::Textures,
            Self::Audio => AnalysisKind::Audio,
            Self::Models => AnalysisKind::Models,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns with human-readable sizes
    Table,
    /// Comma-separated, same cells as the table
    Csv,
    /// Array of objects with raw values (sizes in bytes)
    Json,
}
