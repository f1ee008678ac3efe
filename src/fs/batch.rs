//! Staged file system operations with per-item failure tolerance.
//!
//! A [`Batch`] collects file moves, directory renames and content rewrites,
//! then applies them one at a time. An item that fails is logged with its
//! paths, recorded, and skipped; the rest of the batch still runs. Partial
//! progress is kept because every stage is safe to re-run.
//!
//! ## Ordering
//!
//! File operations run before directory renames. Directory renames run in the
//! order they were staged, which callers arrange deepest-first so a parent is
//! never renamed out from under a pending child.
//!
//! ## Example
//!
//! ```no_run
//! # use codebase_casing::fs::Batch;
//! # use std::path::PathBuf;
//! let mut batch = Batch::new(false);
//! batch.move_file(PathBuf::from("src/MyButton.tsx"), PathBuf::from("src/my-button.tsx"));
//! batch.rename_directory(PathBuf::from("src/UserCard"), PathBuf::from("src/user-card"));
//! batch.apply();
//! assert!(batch.failures().is_empty());
//! ```

use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single staged operation.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Rename a file, creating the target's parent if needed.
    MoveFile { from: PathBuf, to: PathBuf },
    /// Rename a directory in place.
    RenameDirectory { from: PathBuf, to: PathBuf },
    /// Replace file contents.
    RewriteFile {
        path: PathBuf,
        original: String,
        new: String,
    },
}

/// An item that could not be processed.
#[derive(Debug, Clone)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    /// Staging operations.
    Staging,
    /// `apply()` has run.
    Applied,
}

/// Ordered set of file system operations applied as one stage.
///
/// In dry-run mode operations are reported but never executed.
#[must_use = "check the batch for failures"]
pub struct Batch {
    operations: Vec<Operation>,
    dry_run: bool,
    state: BatchState,
    applied: Vec<usize>,
    failures: Vec<Failure>,
}

impl Batch {
    pub fn new(dry_run: bool) -> Self {
        Self {
            operations: Vec::new(),
            dry_run,
            state: BatchState::Staging,
            applied: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Stages a file move. No-op when source and target are equal.
    pub fn move_file(&mut self, from: PathBuf, to: PathBuf) {
        if from == to {
            return;
        }
        if self.dry_run {
            log::info!("Would move: {} → {}", from.display(), to.display());
        }
        self.stage(Operation::MoveFile { from, to });
    }

    /// Stages a directory rename. No-op when source and target are equal.
    pub fn rename_directory(&mut self, from: PathBuf, to: PathBuf) {
        if from == to {
            return;
        }
        if self.dry_run {
            log::info!("Would rename: {} → {}", from.display(), to.display());
        }
        self.stage(Operation::RenameDirectory { from, to });
    }

    /// Stages a content rewrite. Skipped when the content is unchanged.
    pub fn rewrite_file(&mut self, path: PathBuf, original: String, new: String) {
        if original == new {
            log::debug!("Content unchanged, skipping: {}", path.display());
            return;
        }
        if self.dry_run {
            log::info!("Would rewrite: {}", path.display());
        }
        self.stage(Operation::RewriteFile {
            path,
            original,
            new,
        });
    }

    /// Records an item that failed before it could be staged.
    pub fn record_failure(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.failures.push(Failure {
            path,
            reason: reason.into(),
        });
    }

    fn stage(&mut self, op: Operation) {
        if self.state != BatchState::Staging {
            log::warn!("Ignoring operation staged after apply: {:?}", op);
            return;
        }
        self.operations.push(op);
    }

    /// Applies staged operations: file operations first, then directory
    /// renames in staged order. Failures are logged and recorded.
    pub fn apply(&mut self) {
        if self.state != BatchState::Staging {
            log::warn!("Batch already applied");
            return;
        }
        self.state = BatchState::Applied;

        if self.dry_run {
            return;
        }

        let (dir_ops, file_ops): (Vec<usize>, Vec<usize>) = (0..self.operations.len())
            .partition(|&idx| {
                matches!(
                    self.operations[idx],
                    Operation::RenameDirectory { .. }
                )
            });

        for idx in file_ops.into_iter().chain(dir_ops) {
            let op = &self.operations[idx];
            match Self::execute(op) {
                Ok(true) => self.applied.push(idx),
                Ok(false) => {}
                Err((path, e)) => {
                    log::error!("{}", e);
                    self.failures.push(Failure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// Runs one operation. `Ok(false)` means it was skipped as moot.
    fn execute(op: &Operation) -> std::result::Result<bool, (PathBuf, io::Error)> {
        match op {
            Operation::MoveFile { from, to } => Self::move_path(from, to)
                .map(|_| {
                    log::debug!("Moved: {} → {}", from.display(), to.display());
                    true
                })
                .map_err(|e| (from.clone(), e)),
            Operation::RenameDirectory { from, to } => {
                if !from.is_dir() {
                    log::debug!("Skipping non-existent directory: {}", from.display());
                    return Ok(false);
                }
                Self::move_path(from, to)
                    .map(|_| {
                        log::debug!("Renamed directory: {} → {}", from.display(), to.display());
                        true
                    })
                    .map_err(|e| (from.clone(), e))
            }
            Operation::RewriteFile { path, new, .. } => fs::write(path, new)
                .map(|_| {
                    log::debug!("Rewrote: {}", path.display());
                    true
                })
                .map_err(|e| {
                    (
                        path.clone(),
                        io::Error::new(
                            e.kind(),
                            format!("Failed to write {}: {}", path.display(), e),
                        ),
                    )
                }),
        }
    }

    /// Renames without overwriting an existing target.
    fn move_path(from: &Path, to: &Path) -> io::Result<()> {
        let context = |e: io::Error| {
            io::Error::new(
                e.kind(),
                format!("Failed to move {} → {}: {}", from.display(), to.display(), e),
            )
        };

        if to.exists() {
            return Err(context(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "target already exists",
            )));
        }

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(context)?;
        }

        fs::rename(from, to).map_err(context)
    }

    /// Removes directories that applied moves left empty, walking upward but
    /// never removing `root` itself. Returns the number removed.
    pub fn prune_emptied(&self, root: &Path) -> usize {
        if self.dry_run {
            return 0;
        }

        let mut removed = 0;
        for &idx in &self.applied {
            let from = match &self.operations[idx] {
                Operation::MoveFile { from, .. } | Operation::RenameDirectory { from, .. } => from,
                Operation::RewriteFile { .. } => continue,
            };

            let mut current = from.parent();
            while let Some(dir) = current {
                if dir == root || !dir.starts_with(root) || !is_empty_dir(dir) {
                    break;
                }
                match fs::remove_dir(dir) {
                    Ok(()) => {
                        log::debug!("Removed empty directory: {}", dir.display());
                        removed += 1;
                    }
                    Err(e) => {
                        log::warn!("Could not remove {}: {}", dir.display(), e);
                        break;
                    }
                }
                current = dir.parent();
            }
        }
        removed
    }

    /// Operations that took effect: every staged one in dry-run mode,
    /// otherwise only those that were applied without error.
    fn completed(&self) -> impl Iterator<Item = &Operation> {
        let indices: Box<dyn Iterator<Item = usize> + '_> = if self.dry_run {
            Box::new(0..self.operations.len())
        } else {
            Box::new(self.applied.iter().copied())
        };
        indices.map(|idx| &self.operations[idx])
    }

    /// Prints categorised summary to stdout.
    ///
    /// Paths are relative to `root` with forward slashes.
    pub fn print_summary(&self, title: &str, root: &Path) {
        println!("\n{}", title.bold().cyan());

        if self.completed().next().is_none() && self.failures.is_empty() {
            println!("   {}", "No changes needed".yellow());
            return;
        }

        let display_path = |path: &Path| -> String {
            let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
            relative.to_string_lossy().replace('\\', "/")
        };

        let mut moves = Vec::new();
        let mut dirs = Vec::new();
        let mut rewrites = Vec::new();

        for op in self.completed() {
            match op {
                Operation::MoveFile { from, to } => {
                    moves.push((display_path(from), display_path(to)))
                }
                Operation::RenameDirectory { from, to } => {
                    dirs.push((display_path(from), display_path(to)))
                }
                Operation::RewriteFile { path, .. } => rewrites.push(display_path(path)),
            }
        }

        let bullet = if self.dry_run {
            "•".to_string()
        } else {
            "✓".green().to_string()
        };

        if !moves.is_empty() {
            println!("\n{} Files ({})", "📄".bold(), moves.len());
            for (from, to) in moves.iter().take(8) {
                println!("   {} {} → {}", bullet, from.dimmed(), to.green());
            }
            if moves.len() > 8 {
                println!("   {} {} more...", bullet, moves.len() - 8);
            }
        }

        if !dirs.is_empty() {
            println!("\n{} Directories ({})", "📁".bold(), dirs.len());
            for (from, to) in dirs.iter().take(8) {
                println!("   {} {} → {}", bullet, from.dimmed(), to.green());
            }
            if dirs.len() > 8 {
                println!("   {} {} more...", bullet, dirs.len() - 8);
            }
        }

        if !rewrites.is_empty() {
            println!(
                "\n{} Source code ({} file{})",
                "📝".bold(),
                rewrites.len(),
                if rewrites.len() == 1 { "" } else { "s" }
            );
            for path in rewrites.iter().take(8) {
                println!("   {} {}", bullet, path.dimmed());
            }
            if rewrites.len() > 8 {
                println!("   {} {} more...", bullet, rewrites.len() - 8);
            }
        }

        if !self.failures.is_empty() {
            println!(
                "\n{} Failed ({})",
                "✗".red().bold(),
                self.failures.len()
            );
            for failure in &self.failures {
                println!("   {} {}", display_path(&failure.path).red(), failure.reason.dimmed());
            }
        }

        if self.dry_run {
            println!(
                "\n{} operation(s) planned. Run without {} to apply.",
                self.operations.len().to_string().cyan().bold(),
                "--dry-run".cyan()
            );
        }
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        if self.state == BatchState::Staging && !self.operations.is_empty() && !self.dry_run {
            log::warn!("Batch dropped without being applied");
        }
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Statistics about batch operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub files_moved: usize,
    pub dirs_renamed: usize,
    pub files_rewritten: usize,
    pub failed: usize,
}

impl Batch {
    /// Returns operation statistics.
    pub fn stats(&self) -> BatchStats {
        let mut stats = BatchStats {
            failed: self.failures.len(),
            ..Default::default()
        };

        for op in self.completed() {
            match op {
                Operation::MoveFile { .. } => stats.files_moved += 1,
                Operation::RenameDirectory { .. } => stats.dirs_renamed += 1,
                Operation::RewriteFile { .. } => stats.files_rewritten += 1,
            }
        }

        stats
    }
}
