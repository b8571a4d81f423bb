//! AssetSleuth: inventories of what actually ships in a game build.
//!
//! Thin binary entry point. All logic lives in the `assetsleuth-core`
//! and `assetsleuth-cli` crates.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = assetsleuth_cli::Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // Results go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("AssetSleuth starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    assetsleuth_cli::run(&cli, &mut out)
}
