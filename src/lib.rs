//! Convert the file and folder names of a JavaScript/TypeScript codebase to
//! kebab-case or snake_case, and rewrite every local import/export path so the
//! code keeps resolving.
//!
//! Renames happen in two phases so that case-only changes (`Foo.ts` →
//! `foo.ts`) are safe on case-insensitive filesystems; see [`rename`]. Module
//! references are then updated by [`rewrite`], which edits only the path
//! literals and leaves the rest of each file byte-identical.

pub mod casing;
pub mod cli;
pub mod convert;
pub mod error;
pub mod fs;
pub mod git;
pub mod rename;
pub mod rewrite;
pub mod steps;
pub mod verify;

pub use error::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    let options = steps::ConvertOptions::from(&cli);
    init_logging(options.log_level);
    steps::execute(&cli, options)
}

/// Installs the global logger. `RUST_LOG`, when set, overrides `level`.
fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .try_init();
}
