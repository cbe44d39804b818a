//! Review assigner: automatic pull request reviewer assignment.
//!
//! Teams register their members; opening a pull request picks up to two
//! active teammates of the author as reviewers. Reviewers can be swapped for
//! another active member of their own team until the pull request is merged,
//! and merging is idempotent.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`roster`]: Teams, users, and review eligibility
//! - [`review`]: Pull request lifecycle and reviewer assignment
//! - [`error`]: Caller-facing error codes and envelope
//! - [`config`]: Environment-driven service configuration
//! - [`postgres`]: Connection pool shared by the `PostgreSQL` adapters

pub mod config;
pub mod error;
pub mod postgres;
pub mod review;
pub mod roster;
