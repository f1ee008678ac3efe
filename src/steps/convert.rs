//! Orchestration of a full conversion run.
//!
//! Stages run strictly in order, each on a fresh discovery snapshot:
//!
//! 1. Rename phase 1/2 (convert names, mark case-only changes)
//! 2. Rename phase 2/2 (strip markers, prune emptied directories)
//! 3. Import/export rewrite
//!
//! A git checkpoint is committed after each stage so an interrupted run always
//! leaves a revertible boundary. Per-item failures never stop a stage; they are
//! counted and reported once the run finishes.

use crate::casing::Casing;
use crate::cli::{Cli, Stage};
use crate::convert::SegmentConverter;
use crate::error::Result;
use crate::fs::{Batch, Discovery};
use crate::git;
use crate::rename::{Phase, rename};
use crate::rewrite::rewrite_sources;
use crate::verify::preflight_checks;
use colored::Colorize;

/// Commit message for the rewrite checkpoint.
pub const REWRITE_CHECKPOINT: &str = "Update import and export statements";

/// Settings for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub casing: Casing,
    pub stage: Stage,
    pub dry_run: bool,
    /// Commit a checkpoint after each stage.
    pub commit: bool,
    pub log_level: log::LevelFilter,
}

impl From<&Cli> for ConvertOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            casing: cli.casing,
            stage: cli.phase,
            dry_run: cli.dry_run,
            commit: !cli.no_commit && !cli.dry_run,
            log_level: cli.log_level.into(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub files_renamed: usize,
    pub dirs_renamed: usize,
    pub files_rewritten: usize,
    pub failed: usize,
    pub checkpoints: usize,
}

impl ConvertReport {
    fn absorb(&mut self, batch: &Batch) {
        let stats = batch.stats();
        self.files_renamed += stats.files_moved;
        self.dirs_renamed += stats.dirs_renamed;
        self.files_rewritten += stats.files_rewritten;
        self.failed += stats.failed;
    }
}

/// Executes a conversion run from parsed command-line arguments and the
/// options derived from them.
///
/// Returns an error only for configuration problems detected before the first
/// stage starts, or when the file tree cannot be walked at all.
pub fn execute(cli: &Cli, options: ConvertOptions) -> Result<()> {
    let discovery = preflight_checks(cli)?;

    let report = run(&discovery, options)?;

    if options.dry_run {
        return Ok(());
    }

    if report.failed > 0 {
        println!(
            "\n{} {} item(s) failed; see the log above. Re-running completes unfinished renames.",
            "⚠".yellow().bold(),
            report.failed.to_string().yellow().bold()
        );
    }

    println!("\n{}", "✓ Conversion completed".green().bold());
    Ok(())
}

/// Runs the selected stages against a validated discovery.
pub fn run(discovery: &Discovery, options: ConvertOptions) -> Result<ConvertReport> {
    let root = discovery.root();
    let converter = SegmentConverter::new(options.casing);
    let mut report = ConvertReport::default();

    let commit = options.commit && git::is_git_repo(root);
    if options.commit && !commit {
        log::info!("Not a git repository; checkpoint commits are skipped");
    }

    println!(
        "{} {} to {}{}",
        "Converting".bold(),
        root.display().to_string().cyan(),
        options.casing.to_string().green().bold(),
        if options.dry_run { " (dry run)" } else { "" }
    );

    for phase in Phase::ORDER {
        let selected = match phase {
            Phase::Convert => options.stage.runs_convert(),
            Phase::StripMarkers => options.stage.runs_strip(),
        };
        if !selected {
            continue;
        }

        println!("\n{}...", phase.to_string().bold());
        let files = discovery.files()?;
        log::info!("{}: {} candidate file(s)", phase, files.len());

        let batch = rename(root, &files, phase, &converter, options.dry_run);
        batch.print_summary(&phase.to_string(), root);
        report.absorb(&batch);

        if commit && git::checkpoint(root, &phase.checkpoint_message()) {
            report.checkpoints += 1;
        }
    }

    if options.stage.runs_imports() {
        println!("\n{}...", "Updating imports".bold());
        let files = discovery.files()?;
        log::info!("Import rewrite: {} candidate file(s)", files.len());

        let batch = rewrite_sources(&files, &converter, options.dry_run);
        batch.print_summary("Import rewrite", root);
        report.absorb(&batch);

        if commit && git::checkpoint(root, REWRITE_CHECKPOINT) {
            report.checkpoints += 1;
        }
    }

    log::debug!("Run report: {:?}", report);
    Ok(report)
}
