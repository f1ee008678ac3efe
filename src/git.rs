//! Git integration: dirty working-tree guard and phase checkpoints.
//!
//! Every git failure here is soft. Without git (or outside a repository) the
//! tool still runs; it just cannot leave checkpoints behind.

use crate::error::{CasingError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Number of dirty paths echoed before the list is abbreviated.
const DIRTY_PREVIEW: usize = 5;

/// Runs `git <args>` in `dir`. `None` when git could not be spawned.
fn git(dir: &Path, args: &[&str]) -> Option<Output> {
    match Command::new("git").args(args).current_dir(dir).output() {
        Ok(output) => Some(output),
        Err(e) => {
            log::debug!("Failed to execute git {}: {}", args.join(" "), e);
            None
        }
    }
}

/// Returns true if `dir` is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    git(dir, &["rev-parse", "--is-inside-work-tree"]).is_some_and(|o| o.status.success())
}

/// Tracked paths with uncommitted changes, as porcelain status lines.
/// `None` when the status cannot be read.
fn dirty_paths(dir: &Path) -> Option<Vec<String>> {
    let output = git(dir, &["status", "--porcelain", "--untracked-files=no"])?;
    if !output.status.success() {
        log::warn!(
            "git status failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
    )
}

/// Refuses to start on a working tree with uncommitted **tracked** changes.
///
/// Checkpoints run `git add --all`, so such edits would be folded into the
/// rename commits. Untracked files are ignored. Outside a repository, or
/// without git, the check passes.
pub fn check_git_status(dir: &Path) -> Result<()> {
    if !is_git_repo(dir) {
        log::debug!("{} is not in a git work tree, skipping status check", dir.display());
        return Ok(());
    }

    let Some(dirty) = dirty_paths(dir) else {
        return Ok(());
    };
    if dirty.is_empty() {
        return Ok(());
    }

    log::warn!("{} tracked file(s) have uncommitted changes:", dirty.len());
    for line in dirty.iter().take(DIRTY_PREVIEW) {
        log::warn!("  {}", line);
    }
    if dirty.len() > DIRTY_PREVIEW {
        log::warn!("  ... and {} more", dirty.len() - DIRTY_PREVIEW);
    }

    Err(CasingError::DirtyWorkspace)
}

/// Stages all changes under `dir` and commits them with `message`.
///
/// Returns whether a commit was created. Failures (including "nothing to
/// commit") are logged, never returned.
pub fn checkpoint(dir: &Path, message: &str) -> bool {
    let Some(add) = git(dir, &["add", "--all", "."]) else {
        return false;
    };
    if !add.status.success() {
        log::warn!(
            "Checkpoint '{}' not recorded, git add failed: {}",
            message,
            String::from_utf8_lossy(&add.stderr).trim()
        );
        return false;
    }

    let Some(commit) = git(dir, &["commit", "-m", message]) else {
        return false;
    };
    if commit.status.success() {
        log::info!("Committed checkpoint: {}", message);
        return true;
    }

    let stdout = String::from_utf8_lossy(&commit.stdout);
    if stdout.contains("nothing to commit") || stdout.contains("no changes added") {
        log::info!("Nothing to commit for: {}", message);
    } else {
        log::warn!(
            "Checkpoint '{}' not recorded, git commit failed: {} {}",
            message,
            stdout.trim(),
            String::from_utf8_lossy(&commit.stderr).trim()
        );
    }
    false
}
