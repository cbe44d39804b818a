//! Pull request review workflow.
//!
//! Opens pull requests with up to two reviewers drawn from the author's
//! team, swaps individual reviewers while a pull request is open, and merges
//! pull requests idempotently. Layout:
//!
//! - Domain types and the selection policy in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Workflow and query services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
