//! Port contracts for the roster.
//!
//! The review workflow depends only on these traits, never on a concrete
//! directory.

pub mod directory;

pub use directory::{DirectoryError, DirectoryResult, TeamDirectory, UserDirectory};
