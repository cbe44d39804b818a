//! Step definitions for pull request workflow scenarios.

mod given;
mod then;
mod when;
pub mod world;
