//! Validation performed before a conversion run.

pub mod preflight;
pub mod rules;

pub use preflight::{preflight_checks, resolve_directory};
pub use rules::parse_extensions;
