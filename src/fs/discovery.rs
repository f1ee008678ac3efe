//! Candidate file discovery.
//!
//! Walks the target directory honoring `.gitignore` rules and returns a sorted
//! snapshot of matching files. Callers treat the snapshot as closed: renames
//! performed while consuming it are never re-observed.

use crate::error::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Entries skipped regardless of ignore rules.
pub const ALWAYS_EXCLUDED: &[&str] = &[
    ".git",
    "node_modules",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
];

/// Default extensions processed when `--extensions` is not given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// Enumerates candidate files below a root directory.
#[derive(Debug, Clone)]
pub struct Discovery {
    root: PathBuf,
    ignore_file: Option<PathBuf>,
    extensions: Vec<String>,
}

impl Discovery {
    pub fn new(root: PathBuf, ignore_file: Option<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root,
            ignore_file,
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns every file under the root whose name ends with one of the
    /// configured extensions, sorted by path.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(false)
            .require_git(false)
            .filter_entry(|e| {
                let name = e.file_name().to_str();
                !name.is_some_and(|n| ALWAYS_EXCLUDED.contains(&n))
            });

        if let Some(ignore_file) = &self.ignore_file
            && let Some(err) = builder.add_ignore(ignore_file)
        {
            log::warn!(
                "Could not fully load ignore rules from {}: {}",
                ignore_file.display(),
                err
            );
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::debug!("Skipping entry due to error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        log::debug!(
            "Discovered {} file(s) under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 file name: {}", path.display());
            return false;
        };

        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Locates the `.gitignore` to apply: the current directory's first, then the
/// target directory's.
pub fn locate_gitignore(directory: &Path) -> Option<PathBuf> {
    let cwd_candidate = std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".gitignore"));

    cwd_candidate
        .into_iter()
        .chain(std::iter::once(directory.join(".gitignore")))
        .find(|candidate| candidate.is_file())
}
