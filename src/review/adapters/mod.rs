//! Adapter implementations of the review ports.

pub mod memory;
pub mod postgres;
