//! Team and user roster.
//!
//! The roster answers "who is on team X", "which team is user Y on", and
//! "is user Y eligible for review duty". It follows the same hexagonal
//! layout as the review workflow:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Application services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
