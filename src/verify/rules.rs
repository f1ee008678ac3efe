//! Validation rules for command-line values.
//!
//! Pure functions with no I/O or side effects.

use crate::error::{CasingError, Result};

/// Parses a comma-separated extension list such as `.ts,.tsx`.
///
/// ## Rules
/// - Entries are trimmed; empty entries between commas are ignored
/// - Each entry starts with `.` followed by at least one character
/// - Entries contain no path separators or whitespace
/// - At least one entry remains
///
/// Duplicates are dropped, keeping first-seen order.
pub fn parse_extensions(raw: &str) -> Result<Vec<String>> {
    let mut extensions: Vec<String> = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        validate_extension(entry)?;
        if !extensions.iter().any(|e| e == entry) {
            extensions.push(entry.to_string());
        }
    }

    if extensions.is_empty() {
        return Err(CasingError::InvalidExtension(
            raw.to_string(),
            "no extensions given".to_string(),
        ));
    }

    Ok(extensions)
}

fn validate_extension(ext: &str) -> Result<()> {
    let Some(rest) = ext.strip_prefix('.') else {
        return Err(CasingError::InvalidExtension(
            ext.to_string(),
            "must start with '.'".to_string(),
        ));
    };

    if rest.is_empty() {
        return Err(CasingError::InvalidExtension(
            ext.to_string(),
            "missing name after '.'".to_string(),
        ));
    }

    if let Some(ch) = rest
        .chars()
        .find(|c| *c == '/' || *c == '\\' || c.is_whitespace())
    {
        return Err(CasingError::InvalidExtension(
            ext.to_string(),
            format!("contains invalid character {:?}", ch),
        ));
    }

    Ok(())
}
