//! Top-level workflows driven by the command line.

pub mod convert;

pub use convert::{ConvertOptions, ConvertReport, execute};
