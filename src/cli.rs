use crate::casing::Casing;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Convert file and folder names in a JS/TS codebase to kebab-case or
/// snake_case, then update import and export paths to match.
#[derive(Parser, Debug, Clone)]
#[command(name = "codebase-casing", version, about)]
pub struct Cli {
    /// Directory to convert
    pub directory: PathBuf,

    /// Target casing style
    #[arg(long, short = 'c', value_enum, default_value_t = Casing::Kebab)]
    pub casing: Casing,

    /// Log verbosity (RUST_LOG overrides when set)
    #[arg(long, short = 'l', value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Comma-separated list of file extensions to process
    #[arg(long, short = 'e', value_name = "LIST", default_value = ".ts,.tsx,.js,.jsx")]
    pub extensions: String,

    /// Fail when no .gitignore is found instead of running without one
    #[arg(long)]
    pub require_gitignore: bool,

    /// Preview changes without touching the file system or git
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Skip the checkpoint commit after each stage
    #[arg(long)]
    pub no_commit: bool,

    /// Allow running with uncommitted git changes
    #[arg(long)]
    pub allow_dirty: bool,

    /// Run a single stage only
    ///
    /// Examples:
    ///   --phase strip      Finish a run interrupted after phase 1
    ///   --phase imports    Only rewrite import/export paths
    #[arg(long, value_enum, default_value_t = Stage::All, verbatim_doc_comment)]
    pub phase: Stage,
}

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Stage selection for `--phase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Both rename phases followed by the import rewrite
    All,
    /// Rename phase 1 only
    Rename,
    /// Rename phase 2 only (strip temporary markers)
    Strip,
    /// Import/export rewrite only
    Imports,
}

impl Stage {
    pub fn runs_convert(self) -> bool {
        matches!(self, Stage::All | Stage::Rename)
    }

    pub fn runs_strip(self) -> bool {
        matches!(self, Stage::All | Stage::Strip)
    }

    pub fn runs_imports(self) -> bool {
        matches!(self, Stage::All | Stage::Imports)
    }
}
