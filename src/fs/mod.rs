//! File system collaborators.
//!
//! Discovery of candidate files, and the batch executor that applies renames
//! and rewrites one item at a time.

pub mod batch;
pub mod discovery;

pub use batch::{Batch, BatchStats, Failure, Operation};
pub use discovery::{Discovery, locate_gitignore};
