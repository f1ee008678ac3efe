//! Word-boundary casing transforms.
//!
//! Both styles split on a lowercase/digit → uppercase transition, collapse runs
//! of the other delimiters (and whitespace) into the target delimiter, and
//! lowercase the result. Total over any input, including the empty string.

use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid boundary pattern"));
static KEBAB_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid kebab delimiter pattern"));
static SNAKE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("valid snake delimiter pattern"));

/// Target naming style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Casing {
    /// lowercase words joined by hyphens
    Kebab,
    /// lowercase words joined by underscores
    Snake,
}

impl Casing {
    pub fn delimiter(self) -> &'static str {
        match self {
            Casing::Kebab => "-",
            Casing::Snake => "_",
        }
    }

    /// Converts `text` to this casing.
    pub fn apply(self, text: &str) -> String {
        let replacement = format!("${{1}}{}${{2}}", self.delimiter());
        let split = CASE_BOUNDARY.replace_all(text, replacement.as_str());

        let runs = match self {
            Casing::Kebab => &*KEBAB_RUNS,
            Casing::Snake => &*SNAKE_RUNS,
        };

        runs.replace_all(&split, self.delimiter()).to_lowercase()
    }
}

impl fmt::Display for Casing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Casing::Kebab => f.write_str("kebab-case"),
            Casing::Snake => f.write_str("snake_case"),
        }
    }
}
