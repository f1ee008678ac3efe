//! Two-phase, case-collision-safe renaming.
//!
//! Case-insensitive filesystems cannot rename `Foo` to `foo` in one step, so a
//! case-only change is split across two phases:
//!
//! 1. [`Phase::Convert`] applies the casing to every file and directory name.
//!    Case-only changes are written with the temporary marker (`foo__tmp`).
//! 2. [`Phase::StripMarkers`] removes the marker (`foo__tmp` → `foo`).
//!
//! The phases always run in that order. A tree left after phase 1 is
//! unfinished but recoverable: running phase 2 alone completes it, and
//! re-running either phase on a finished tree changes nothing.

mod plan;

pub use plan::{RenamePlan, plan};

use crate::convert::{
    SegmentConverter, file_has_stray_marker, has_stray_marker, strip_file_marker,
    strip_segment_marker,
};
use crate::fs::Batch;
use std::fmt;
use std::path::{Path, PathBuf};

/// Rename pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Convert names, marking case-only changes.
    Convert,
    /// Strip markers left by [`Phase::Convert`].
    StripMarkers,
}

impl Phase {
    /// Both phases in execution order.
    pub const ORDER: [Phase; 2] = [Phase::Convert, Phase::StripMarkers];

    pub fn number(self) -> usize {
        match self {
            Phase::Convert => 1,
            Phase::StripMarkers => 2,
        }
    }

    /// Commit message recorded after the phase.
    pub fn checkpoint_message(self) -> String {
        format!("Rename files and folders phase {}/2", self.number())
    }

    /// New name for a file, or `None` when it stays as is.
    pub fn rename_file(self, name: &str, converter: &SegmentConverter) -> Option<String> {
        if file_has_stray_marker(name) {
            log::warn!(
                "File name '{}' contains the temporary marker mid-name; leaving it untouched",
                name
            );
            return None;
        }

        let new_name = match self {
            Phase::Convert => converter.convert_file_name(name),
            Phase::StripMarkers => strip_file_marker(name)?,
        };

        (new_name != name).then_some(new_name)
    }

    /// New name for a directory, or `None` when it stays as is.
    pub fn rename_directory(self, name: &str, converter: &SegmentConverter) -> Option<String> {
        if has_stray_marker(name) {
            log::warn!(
                "Directory name '{}' contains the temporary marker mid-name; leaving it untouched",
                name
            );
            return None;
        }

        let new_name = match self {
            Phase::Convert => converter.convert_segment(name),
            Phase::StripMarkers => strip_segment_marker(name)?.to_string(),
        };

        (new_name != name).then_some(new_name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rename phase {}/2", self.number())
    }
}

/// Runs one phase over a discovered file snapshot and returns the applied batch.
///
/// Individual failures are logged and recorded on the batch; they never stop
/// the phase. After [`Phase::StripMarkers`], directories the moves left empty
/// are removed.
pub fn rename(
    root: &Path,
    files: &[PathBuf],
    phase: Phase,
    converter: &SegmentConverter,
    dry_run: bool,
) -> Batch {
    let plan = plan(root, files, phase, converter);
    log::info!("{}: {} rename(s) planned", phase, plan.len());
    let mut batch = Batch::new(dry_run);

    for (from, to) in plan.files {
        log::debug!("Staging file rename {} → {}", from.display(), to.display());
        batch.move_file(from, to);
    }

    for (from, to) in plan.directories {
        log::debug!(
            "Staging directory rename {} → {}",
            from.display(),
            to.display()
        );
        batch.rename_directory(from, to);
    }

    batch.apply();

    if phase == Phase::StripMarkers {
        let pruned = batch.prune_emptied(root);
        if pruned > 0 {
            log::info!("Removed {} empty director(ies)", pruned);
        }
    }

    batch
}
