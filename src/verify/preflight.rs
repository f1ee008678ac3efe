//! Pre-flight checks performed before any file is touched.
//!
//! These checks turn the command line into a ready-to-walk [`Discovery`].
//! Unlike `rules`, these functions perform I/O (resolving the directory,
//! looking for `.gitignore`, checking git status). Every error returned here
//! is a configuration error: the run stops before anything is mutated.

use crate::cli::Cli;
use crate::error::{CasingError, Result};
use crate::fs::{Discovery, locate_gitignore};
use crate::git::check_git_status;
use crate::verify::rules::parse_extensions;
use std::path::{Path, PathBuf};

/// Resolves `directory` to an absolute, existing directory.
pub fn resolve_directory(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        return Err(CasingError::DirectoryNotFound(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(CasingError::NotADirectory(directory.to_path_buf()));
    }
    Ok(directory.canonicalize()?)
}

/// Performs validation before a conversion run.
///
/// # Checks Performed
///
/// 1. Target directory exists and is a directory
/// 2. Extension list is well formed
/// 3. A `.gitignore` is found (only fatal with `--require-gitignore`)
/// 4. Git workspace is clean (unless `--allow-dirty` or `--dry-run`)
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn preflight_checks(cli: &Cli) -> Result<Discovery> {
    let root = resolve_directory(&cli.directory)?;
    log::debug!("Target directory: {}", root.display());

    let extensions = parse_extensions(&cli.extensions)?;
    log::debug!("Extensions: {}", extensions.join(", "));

    let ignore_file = match locate_gitignore(&root) {
        Some(path) => {
            log::debug!("Using ignore rules from {}", path.display());
            Some(path)
        }
        None if cli.require_gitignore => {
            return Err(CasingError::IgnoreFileMissing(root));
        }
        None => {
            log::info!("No .gitignore found; only the built-in exclusions apply");
            None
        }
    };

    if !cli.allow_dirty
        && !cli.dry_run
        && let Err(e) = check_git_status(&root)
    {
        log::error!("{}", e);
        log::info!("Hint: Use --allow-dirty to bypass this check");
        return Err(e);
    }

    Ok(Discovery::new(root, ignore_file, extensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["codebase-casing"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = preflight_checks(&cli(&[missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CasingError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        fs::write(&file, "").unwrap();
        let err = preflight_checks(&cli(&[file.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CasingError::NotADirectory(_)));
    }

    #[test]
    fn test_bad_extension_list() {
        let temp = TempDir::new().unwrap();
        let err = preflight_checks(&cli(&[temp.path().to_str().unwrap(), "-e", "ts"])).unwrap_err();
        assert!(matches!(err, CasingError::InvalidExtension(..)));
    }

    #[test]
    fn test_target_gitignore_picked_up() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "dist/\n").unwrap();

        let discovery = preflight_checks(&cli(&[temp.path().to_str().unwrap()])).unwrap();

        assert_eq!(discovery.root(), temp.path().canonicalize().unwrap());
        assert_eq!(discovery.extensions(), [".ts", ".tsx", ".js", ".jsx"]);
    }
}
