//! Rename planning over a discovered file snapshot.
//!
//! A plan is computed entirely from the path list captured before any
//! mutation, so no entry goes stale because of another rename in the same
//! phase: files keep their directory, and directories are ordered
//! deepest-first so each is renamed while its parent still has the old name.

use super::Phase;
use crate::convert::SegmentConverter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Renames to perform for one phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// `(old, new)` file paths, both inside the file's original directory.
    pub files: Vec<(PathBuf, PathBuf)>,
    /// `(old, new)` directory paths, deepest first.
    pub directories: Vec<(PathBuf, PathBuf)>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.directories.len()
    }
}

/// Builds the plan for `phase` from `files`, all of which live under `root`.
///
/// Every directory between a file and `root` is a directory candidate; `root`
/// itself is never renamed.
pub fn plan(
    root: &Path,
    files: &[PathBuf],
    phase: Phase,
    converter: &SegmentConverter,
) -> RenamePlan {
    let mut plan = RenamePlan::default();
    let mut directories = BTreeSet::new();

    for file in files {
        collect_ancestors(root, file, &mut directories);

        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 file name: {}", file.display());
            continue;
        };

        if let Some(new_name) = phase.rename_file(name, converter) {
            plan.files.push((file.clone(), file.with_file_name(new_name)));
        }
    }

    let mut directories: Vec<PathBuf> = directories.into_iter().collect();
    directories.sort_by(|a, b| {
        b.components()
            .count()
            .cmp(&a.components().count())
            .then_with(|| a.cmp(b))
    });

    for dir in directories {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 directory name: {}", dir.display());
            continue;
        };

        if let Some(new_name) = phase.rename_directory(name, converter) {
            let new_dir = dir.with_file_name(new_name);
            plan.directories.push((dir, new_dir));
        }
    }

    log::debug!(
        "{}: {} file rename(s), {} directory rename(s)",
        phase,
        plan.files.len(),
        plan.directories.len()
    );

    plan
}

fn collect_ancestors(root: &Path, file: &Path, into: &mut BTreeSet<PathBuf>) {
    for ancestor in file.ancestors().skip(1) {
        if ancestor == root || !ancestor.starts_with(root) {
            break;
        }
        into.insert(ancestor.to_path_buf());
    }
}
