//! Import/export path rewriting.
//!
//! Runs once the tree is in its final state. Every module reference with a
//! local prefix has its segments converted with the same rules the renamer
//! used, so in-source paths keep pointing at the renamed files.

pub mod references;
pub mod specifier;

pub use references::{Dialect, ModuleReference, find_references};
pub use specifier::{LOCAL_PREFIXES, rewrite_specifier, rewrite_specifier_in};

use crate::convert::SegmentConverter;
use crate::error::Result;
use crate::fs::Batch;
use std::fs;
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

/// Rewrites the module references in `source`.
///
/// Relative references are checked against the directory holding `path`;
/// see [`rewrite_specifier_in`].
///
/// Returns `Ok(None)` when no reference changes, so callers can leave the
/// file byte-identical.
pub fn rewrite_references(
    path: &Path,
    source: &str,
    dialect: Dialect,
    converter: &SegmentConverter,
) -> Result<Option<String>> {
    let (bom, body) = match source.strip_prefix(BOM) {
        Some(body) => (Some(BOM), body),
        None => (None, source),
    };

    let references = find_references(path, body, dialect)?;
    let importer_dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());

    let mut result = body.to_string();
    let mut changed = false;

    // back to front so earlier ranges stay valid
    for reference in references.iter().rev() {
        let new_value = match importer_dir {
            Some(dir) => rewrite_specifier_in(dir, &reference.value, converter),
            None => rewrite_specifier(&reference.value, converter),
        };
        if let Some(new_value) = new_value {
            log::debug!(
                "{}: {} → {}",
                path.display(),
                reference.value,
                new_value
            );
            let literal = format!("{q}{new_value}{q}", q = reference.quote);
            result.replace_range(reference.range.clone(), &literal);
            changed = true;
        }
    }

    if !changed {
        return Ok(None);
    }

    if let Some(bom) = bom {
        result.insert(0, bom);
    }
    Ok(Some(result))
}

/// Rewrites every source file in `files` and returns the applied batch.
///
/// Files without a recognised source extension are ignored. Read and parse
/// failures are logged and recorded; the remaining files are still processed.
pub fn rewrite_sources(files: &[PathBuf], converter: &SegmentConverter, dry_run: bool) -> Batch {
    let mut batch = Batch::new(dry_run);

    for path in files {
        let Some(dialect) = Dialect::from_path(path) else {
            log::debug!("Skipping non-source file: {}", path.display());
            continue;
        };

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                batch.record_failure(path.clone(), e.to_string());
                continue;
            }
        };

        match rewrite_references(path, &content, dialect, converter) {
            Ok(Some(new_content)) => {
                log::debug!("Updated references in {}", path.display());
                batch.rewrite_file(path.clone(), content, new_content);
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("{}", e);
                batch.record_failure(path.clone(), e.to_string());
            }
        }
    }

    batch.apply();
    batch
}
