/// AssetSleuth CLI: argument parsing, command dispatch and result rendering
/// on top of `assetsleuth-core`.
pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Command, OutputFormat};
pub use commands::run;
